// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction state for Verdant widgets.
//!
//! - [`HoverTracker`] keeps at most one hovered index per chart.
//! - [`CopyFeedback`] shows a "Copied!" confirmation and reverts it after
//!   [`COPY_REVERT_DELAY`], restarting the delay on every click.
//! - [`TimerQueue`] holds the cancellable revert timers; time is passed in by the caller.
//! - [`Clipboard`] is the write-only boundary to the host clipboard.
//!
//! All state is owned by one widget instance and mutated synchronously; nothing here blocks
//! or spawns.

#![no_std]

extern crate alloc;

mod clipboard;
mod copy;
mod hover;
mod timer;

pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard};
pub use copy::{COPY_REVERT_DELAY, CopyFeedback, CopyState};
pub use hover::HoverTracker;
pub use timer::{Fired, TimerHandle, TimerQueue};
