mod cli_modes;
mod logging;
mod render;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use cli_modes::{aggregate_mode, render_mode, use_color};
use render::{ColorMode, RenderOptions, Renderer};
use std::{path::PathBuf, process::ExitCode};
use timeline_core::{Config, SortDirection};

/// timeline — Render dated markdown events as a timeline
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Markdown file with ```timeline blocks, or a bare block of events. Reads stdin when omitted.
    file: Option<PathBuf>,
    /// Prints HTML markup instead of the terminal view.
    #[arg(long)]
    html: bool,
    /// Event order, `asc` or `desc`. Overrides `sort_direction` from the config.
    #[arg(long, env = "TIMELINE_SORT")]
    sort: Option<SortDirection>,
    /// Day used as today for relative days and highlighting (e.g. `--today 2025-08-15`).
    #[arg(long)]
    today: Option<NaiveDate>,
    /// Builds a timeline of notes grouped by the date in their frontmatter.
    #[arg(long, short, conflicts_with_all = ["file", "html"])]
    aggregate: bool,
    /// Dates to aggregate, `YYYY-MM-DD,YYYY-MM-DD`. Defaults to the current month.
    #[arg(long, requires = "aggregate")]
    range: Option<String>,
    /// Notes directory to aggregate. Defaults to `vault_dir` from the config.
    #[arg(long, requires = "aggregate")]
    dir: Option<PathBuf>,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, env = "TIMELINE_COLOR", default_value_t = ColorMode::Auto)]
    color: ColorMode,
    /// Logs debug information to stderr.
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("timeline: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;

    let loaded = Config::load()?;
    let config = Config {
        sort_direction: cli.sort.unwrap_or(loaded.sort_direction),
        reference_date: cli.today.unwrap_or(loaded.reference_date),
        ..loaded
    };

    let renderer = Renderer::new(
        RenderOptions {
            use_color: use_color(&cli),
        },
        &config,
    );

    if cli.aggregate {
        aggregate_mode(&cli, &renderer, &config)
    } else {
        render_mode(&cli, &renderer, &config)
    }
}
