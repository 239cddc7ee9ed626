// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `copy` command: system clipboard plus copy feedback on a real clock.

use std::thread;
use std::time::Instant;

use verdant_interact::{Clipboard, ClipboardError, CopyFeedback, TimerQueue};
use verdant_palette::{ColorToken, TextTone, tokens};

use crate::error::{CatalogueError, Result};

/// The host clipboard through `arboard`.
///
/// Opening the clipboard can fail (for example without a display server); the failure is
/// kept and reported on every write.
pub(crate) struct SystemClipboard {
    inner: std::result::Result<arboard::Clipboard, String>,
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("available", &self.inner.is_ok())
            .finish_non_exhaustive()
    }
}

impl SystemClipboard {
    pub(crate) fn open() -> Self {
        let inner = arboard::Clipboard::new().map_err(|err| err.to_string());
        if let Err(err) = &inner {
            log::debug!("system clipboard unavailable: {err}");
        }
        Self { inner }
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> std::result::Result<(), ClipboardError> {
        match &mut self.inner {
            Ok(clipboard) => clipboard
                .set_text(text)
                .map_err(|err| ClipboardError::Rejected(err.to_string())),
            Err(reason) => Err(ClipboardError::Unavailable(reason.clone())),
        }
    }
}

/// Resolves `ramp/name`, or a bare name against the core ramp.
pub(crate) fn resolve_token(path: &str) -> Result<&'static ColorToken> {
    let found = if path.contains('/') {
        tokens::lookup(path)
    } else {
        tokens::ramp("core").and_then(|r| r.find(path))
    };
    found.ok_or_else(|| CatalogueError::UnknownToken(path.to_string()))
}

/// Copies the token's hex value and holds the confirmation until it reverts.
pub(crate) fn run(path: &str, clipboard: &mut impl Clipboard) -> Result<()> {
    let token = resolve_token(path)?;
    let start = Instant::now();
    let mut timers = TimerQueue::new();
    let mut feedback = CopyFeedback::new();

    feedback.click(start.elapsed(), &mut timers, clipboard, &token.hex);
    let tone = match token.text_tone() {
        TextTone::Dark => "dark",
        TextTone::Light => "light",
    };
    println!("{} {} ({tone} text) Copied!", token.name, token.hex);

    while feedback.is_copied() {
        let Some(deadline) = timers.next_deadline() else {
            break;
        };
        if let Some(wait) = deadline.checked_sub(start.elapsed()) {
            thread::sleep(wait);
        }
        for fired in timers.advance(start.elapsed()) {
            feedback.on_timer(fired.handle);
        }
    }
    log::info!("copy confirmation for {} cleared", token.name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use verdant_interact::MemoryClipboard;

    use super::*;

    #[test]
    fn resolves_paths_and_core_names() {
        assert_eq!(
            resolve_token("primary/800").map(|t| &*t.hex).ok(),
            Some("#11362A"),
            "ramp path"
        );
        assert_eq!(
            resolve_token("surface").map(|t| &*t.hex).ok(),
            Some("#FFFFFF"),
            "bare core name"
        );
        assert!(
            matches!(resolve_token("primary/999"), Err(CatalogueError::UnknownToken(_))),
            "unknown step"
        );
    }

    #[test]
    fn run_writes_the_hex_and_returns_after_the_revert() {
        let mut clipboard = MemoryClipboard::new();
        let start = Instant::now();
        let result = run("sage/300", &mut clipboard);
        assert!(result.is_ok(), "copy succeeds");
        assert_eq!(clipboard.contents(), Some("#BDC8AB"), "hex on the clipboard");
        assert!(start.elapsed() >= Duration::from_millis(1500), "waited for the revert");
    }

    #[test]
    fn rejected_write_still_completes() {
        let mut clipboard = MemoryClipboard::rejecting("denied");
        assert!(run("core/primary", &mut clipboard).is_ok(), "failure is not surfaced");
    }
}
