use crate::Cli;
use crate::render::Renderer;
use anyhow::{Context, Result, bail};
use std::io::{self, Read};
use std::path::Path;
use timeline_core::{Config, fences::timeline_blocks, parse_block, render::render_html};

/// Renders every timeline block of the input, in the terminal or as HTML.
pub fn render_mode(cli: &Cli, renderer: &Renderer, config: &Config) -> Result<()> {
    let input = read_input(cli.file.as_deref())?;

    let mut blocks = timeline_blocks(&input);
    if blocks.is_empty() {
        tracing::debug!("no fenced timeline block, reading the whole input as one");
        blocks.push(input);
    }

    let mut failed = 0;
    for (i, block) in blocks.iter().enumerate() {
        let result = parse_block(block, config.sort_direction);
        if cli.html {
            print!("{}", render_html(&result, config));
        } else {
            match &result {
                Ok(events) => renderer.print_timeline(events),
                Err(error) => renderer.print_block_error(error),
            }
            if i + 1 < blocks.len() {
                renderer.print_separator();
            }
        }
        if result.is_err() {
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{failed} of {} timeline blocks could not be parsed", blocks.len());
    }
    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}
