//! Enumerates markdown notes and reads one frontmatter attribute from each.

use anyhow::{Context, Result};
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// A note and the raw value of the requested frontmatter attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// File name without extension, used for `[[links]]`.
    pub name: String,
    pub path: PathBuf,
    pub date_value: Option<String>,
}

/// A file that could not be read or whose frontmatter is malformed.
#[derive(Debug)]
pub struct ScanError {
    pub path: PathBuf,
    pub error: anyhow::Error,
}

/// Notes found by a [`NoteSource`], plus the files it had to skip.
#[derive(Debug, Default)]
pub struct NoteScan {
    pub notes: Vec<Note>,
    pub errors: Vec<ScanError>,
}

/// Something that can list notes with a date-valued attribute.
pub trait NoteSource {
    fn scan(&self, field: &str) -> NoteScan;
}

/// A directory tree of `.md` files. Hidden directories are skipped.
#[derive(Debug, Clone)]
pub struct VaultDir {
    pub root: PathBuf,
}

impl VaultDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn markdown_files(dir: &Path, files: &mut Vec<PathBuf>, errors: &mut Vec<ScanError>) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(error) => {
                errors.push(ScanError {
                    path: dir.to_path_buf(),
                    error: anyhow::Error::new(error).context("reading directory"),
                });
                return;
            }
        };
        for entry in entries.flatten() {
            let path = entry.path();
            let hidden = entry.file_name().to_string_lossy().starts_with('.');
            if path.is_dir() {
                if !hidden {
                    Self::markdown_files(&path, files, errors);
                }
            } else if path.extension().is_some_and(|ext| ext == "md") {
                files.push(path);
            }
        }
    }
}

impl NoteSource for VaultDir {
    fn scan(&self, field: &str) -> NoteScan {
        let mut files = Vec::new();
        let mut scan = NoteScan::default();
        Self::markdown_files(&self.root, &mut files, &mut scan.errors);
        files.sort();

        for path in files {
            let name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            let date_value = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))
                .and_then(|content| frontmatter_value(&content, field));
            match date_value {
                Ok(date_value) => scan.notes.push(Note {
                    name,
                    path,
                    date_value,
                }),
                Err(error) => {
                    tracing::warn!("skipping {}: {error:#}", path.display());
                    scan.errors.push(ScanError { path, error });
                }
            }
        }
        tracing::debug!(
            "scanned {} notes under {}",
            scan.notes.len(),
            self.root.display()
        );
        scan
    }
}

/// Reads `field` from the YAML frontmatter at the top of `content`.
///
/// Returns `Ok(None)` when there is no frontmatter, the field is missing, or
/// its value is not a scalar. Malformed YAML is an error.
pub fn frontmatter_value(content: &str, field: &str) -> Result<Option<String>> {
    let Some(yaml) = frontmatter(content) else {
        return Ok(None);
    };
    if yaml.trim().is_empty() {
        return Ok(None);
    }
    let mapping: serde_yaml::Mapping =
        serde_yaml::from_str(yaml).context("parsing frontmatter")?;
    Ok(match mapping.get(field) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// The text between a leading `---` line and the next `---` line.
fn frontmatter(content: &str) -> Option<&str> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');
    if lines.next()?.trim_end() != "---" {
        return None;
    }
    let start = content.find('\n')? + 1;
    let mut offset = start;
    for line in lines {
        if line.trim_end() == "---" {
            return Some(&content[start..offset]);
        }
        offset += line.len();
    }
    None
}
