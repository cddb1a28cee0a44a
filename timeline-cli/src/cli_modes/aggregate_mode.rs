use crate::Cli;
use crate::render::Renderer;
use anyhow::Result;
use timeline_core::{
    Config,
    aggregate::{DateRange, aggregate_notes, fence},
    notes::VaultDir,
};

/// Prints a fenced timeline of the notes dated inside the requested range.
pub fn aggregate_mode(cli: &Cli, renderer: &Renderer, config: &Config) -> Result<()> {
    let range = match cli.range.as_deref() {
        Some(input) => DateRange::parse(input)?,
        None => DateRange::current_month(config.reference_date),
    };
    let dir = cli.dir.clone().unwrap_or_else(|| config.vault_dir.clone());
    tracing::debug!("aggregating `{}` in {} for {range}", config.created_date_field, dir.display());

    let result = aggregate_notes(
        &VaultDir::new(dir),
        &config.created_date_field,
        range,
        config.sort_direction,
    );

    if result.note_count == 0 {
        renderer.print_info(&format!("No notes found between {} and {}.", range.start, range.end));
    } else {
        print!("{}", fence(&result.timeline));
    }
    renderer.print_aggregate_errors(&result.errors);
    Ok(())
}
