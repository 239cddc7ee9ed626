// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The clipboard boundary.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

/// Why a clipboard write failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    /// No clipboard is reachable (headless session, missing display server).
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    /// The host refused the write.
    #[error("clipboard write rejected: {0}")]
    Rejected(String),
}

/// A sink for copied text.
pub trait Clipboard {
    /// Writes `text` to the clipboard.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

impl<C: Clipboard + ?Sized> Clipboard for &mut C {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        (**self).write_text(text)
    }
}

/// An in-memory clipboard that records every successful write.
#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    writes: Vec<String>,
    reject: Option<String>,
}

impl MemoryClipboard {
    /// Creates a clipboard that accepts every write.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clipboard that rejects every write with `reason`.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            writes: Vec::new(),
            reject: Some(reason.into()),
        }
    }

    /// Most recent accepted write.
    pub fn contents(&self) -> Option<&str> {
        self.writes.last().map(String::as_str)
    }

    /// Every accepted write, oldest first.
    pub fn writes(&self) -> &[String] {
        &self.writes
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if let Some(reason) = &self.reject {
            return Err(ClipboardError::Rejected(reason.clone()));
        }
        self.writes.push(text.into());
        Ok(())
    }
}
