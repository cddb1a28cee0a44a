use std::io::{self, IsTerminal};

use crate::{Cli, render::ColorMode};

/// Resolves `--color`, honoring `NO_COLOR` and redirection in auto mode.
pub fn use_color(cli: &Cli) -> bool {
    match cli.color {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal(),
    }
}
