// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "verdant_catalogue")]
#[command(version, about = "Verdant color system and chart catalogue")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub(crate) verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub(crate) quiet: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Render every catalogue section into one HTML file
    Render(RenderArgs),
    /// Copy a token's hex value to the system clipboard
    Copy(CopyArgs),
}

#[derive(Args, Debug)]
pub(crate) struct RenderArgs {
    /// Output file
    #[arg(short, long, default_value = "verdant_catalogue.html")]
    pub(crate) out: PathBuf,

    /// Draw the previous period with diagonal stripes instead of flat gray
    #[arg(long)]
    pub(crate) stripes: bool,

    /// Minimum segment height in pixels for inline stacked-bar labels
    #[arg(long, value_name = "PX", default_value_t = verdant_charts::DEFAULT_LABEL_THRESHOLD)]
    pub(crate) label_threshold: f64,

    /// Render the bar lists with this row hovered
    #[arg(long, value_name = "INDEX")]
    pub(crate) hover: Option<usize>,
}

#[derive(Args, Debug)]
pub(crate) struct CopyArgs {
    /// Token path such as `primary/800`, or a core token name such as `surface`
    pub(crate) token: String,
}

impl Cli {
    /// Log level implied by `-v` / `-q`.
    pub(crate) fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Warn;
        }
        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn render_defaults() {
        let cli = Cli::parse_from(["verdant_catalogue", "render"]);
        let Command::Render(ref args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.out, PathBuf::from("verdant_catalogue.html"), "default path");
        assert_eq!(args.label_threshold, 20.0, "default threshold");
        assert!(!args.stripes, "flat by default");
        assert_eq!(args.hover, None, "no hover");
        assert_eq!(cli.log_level(), log::LevelFilter::Info, "default level");
    }

    #[test]
    fn verbosity_flags() {
        let cli = Cli::parse_from(["verdant_catalogue", "-vv", "copy", "primary/800"]);
        assert_eq!(cli.log_level(), log::LevelFilter::Trace, "-vv is trace");
        let cli = Cli::parse_from(["verdant_catalogue", "copy", "surface", "-q"]);
        assert_eq!(cli.log_level(), log::LevelFilter::Warn, "-q is warn");
    }
}
