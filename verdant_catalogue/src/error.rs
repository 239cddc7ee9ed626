// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::io;
use std::path::PathBuf;

/// Errors surfaced to the command line.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CatalogueError {
    /// The report could not be written.
    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// No token matches the requested name.
    #[error("unknown color token `{0}` (expected `ramp/name`, e.g. `primary/800`)")]
    UnknownToken(String),
    /// A logger was already installed.
    #[error("failed to install logger")]
    Logger(#[from] log::SetLoggerError),
}

pub(crate) type Result<T, E = CatalogueError> = std::result::Result<T, E>;
