use clap::ValueEnum;

/// When to emit ANSI colors.
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ColorMode {
    /// Colors only when stdout is a terminal and `NO_COLOR` is unset.
    Auto,
    Always,
    Never,
}
