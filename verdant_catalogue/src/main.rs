// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Verdant catalogue: renders the color system and chart examples, copies tokens.

mod cli;
mod copy;
mod error;
mod html;
mod sections;
mod svg;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::{Cli, Command, RenderArgs};
use crate::error::{CatalogueError, Result};
use crate::sections::RenderOptions;

fn init_logging(level: log::LevelFilter) -> Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ));
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

fn render(args: &RenderArgs) -> Result<()> {
    let opts = RenderOptions {
        stripes: args.stripes,
        label_threshold: args.label_threshold,
        hover: args.hover,
    };
    let sections = sections::build(&opts);
    let html = html::render_report("Verdant color system", &sections);
    std::fs::write(&args.out, html).map_err(|source| CatalogueError::Write {
        path: args.out.clone(),
        source,
    })?;
    log::info!("wrote {} sections to {}", sections.len(), args.out.display());
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    init_logging(cli.log_level())?;
    match cli.command {
        Command::Render(args) => render(&args),
        Command::Copy(args) => copy::run(&args.token, &mut copy::SystemClipboard::open()),
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
