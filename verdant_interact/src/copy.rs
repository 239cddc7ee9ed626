// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! "Copied!" feedback with a restartable revert timer.

use core::time::Duration;

use crate::clipboard::Clipboard;
use crate::timer::{TimerHandle, TimerQueue};

/// How long the copy confirmation stays visible.
pub const COPY_REVERT_DELAY: Duration = Duration::from_millis(1500);

/// Visual state of a copyable widget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CopyState {
    /// No confirmation shown.
    #[default]
    Idle,
    /// The confirmation is shown until the revert timer fires.
    Copied,
}

/// Copy feedback of one widget.
///
/// A click writes to the clipboard, shows the confirmation and (re)starts a single revert
/// timer; at most one timer is pending per widget. The confirmation is shown even if the
/// clipboard write fails: the failure is logged and never reaches the state.
///
/// `T` is the tag scheduled with the revert timer, so several widgets can share one
/// [`TimerQueue`] and route fired timers back to their owner.
#[derive(Clone, Debug)]
pub struct CopyFeedback<T = ()> {
    tag: T,
    delay: Duration,
    state: CopyState,
    pending: Option<TimerHandle>,
}

impl CopyFeedback<()> {
    /// Creates idle feedback with the default delay.
    pub fn new() -> Self {
        Self::tagged(())
    }
}

impl Default for CopyFeedback<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> CopyFeedback<T> {
    /// Creates idle feedback whose timers carry `tag`.
    pub fn tagged(tag: T) -> Self {
        Self {
            tag,
            delay: COPY_REVERT_DELAY,
            state: CopyState::Idle,
            pending: None,
        }
    }

    /// Sets the revert delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// The tag scheduled with revert timers.
    pub fn tag(&self) -> &T {
        &self.tag
    }

    /// Revert delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Current state.
    pub fn state(&self) -> CopyState {
        self.state
    }

    /// Whether the confirmation is shown.
    pub fn is_copied(&self) -> bool {
        self.state == CopyState::Copied
    }

    /// The pending revert timer, if any.
    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending
    }

    /// Copies `text` and shows the confirmation until `now + delay`.
    ///
    /// A click while already copied replaces the pending timer instead of adding one.
    pub fn click(
        &mut self,
        now: Duration,
        timers: &mut TimerQueue<T>,
        clipboard: &mut impl Clipboard,
        text: &str,
    ) -> TimerHandle {
        if let Err(err) = clipboard.write_text(text) {
            log::warn!("copy of {text:?} failed: {err}");
        }
        if let Some(old) = self.pending.take() {
            timers.cancel(old);
        }
        let handle = timers.schedule(now, self.delay, self.tag.clone());
        log::trace!("copy {:?} -> copied (timer {})", self.state, handle.raw());
        self.state = CopyState::Copied;
        self.pending = Some(handle);
        handle
    }

    /// Handles a fired timer. Returns `true` if this reverted the widget to idle.
    ///
    /// Handles other than the pending one are stale and ignored.
    pub fn on_timer(&mut self, handle: TimerHandle) -> bool {
        if self.pending != Some(handle) {
            log::trace!("ignoring stale copy timer {}", handle.raw());
            return false;
        }
        self.pending = None;
        self.state = CopyState::Idle;
        log::trace!("copy reverted (timer {})", handle.raw());
        true
    }

    /// Tears the widget down, cancelling its pending timer.
    pub fn unmount(&mut self, timers: &mut TimerQueue<T>) {
        if let Some(handle) = self.pending.take() {
            timers.cancel(handle);
        }
        self.state = CopyState::Idle;
    }
}
