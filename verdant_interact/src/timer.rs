// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A deterministic, cancellable timer queue.
//!
//! Time is supplied by the caller as a [`Duration`] since an arbitrary origin, so the same
//! queue drives a real clock in the catalogue binary and a fake one in tests.

extern crate alloc;

use alloc::vec::Vec;
use core::time::Duration;

/// Identifies one scheduled timer.
///
/// Handles are never reused by a queue, so a handle from a cancelled or fired timer can never
/// match a later one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Raw handle value.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// A timer that reached its deadline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fired<E> {
    /// Handle returned by [`TimerQueue::schedule`].
    pub handle: TimerHandle,
    /// Deadline the timer was scheduled for.
    pub deadline: Duration,
    /// Payload passed to [`TimerQueue::schedule`].
    pub event: E,
}

#[derive(Clone, Debug)]
struct Entry<E> {
    handle: TimerHandle,
    deadline: Duration,
    event: E,
}

/// Pending one-shot timers, fired in deadline order.
#[derive(Clone, Debug)]
pub struct TimerQueue<E> {
    entries: Vec<Entry<E>>,
    next: u64,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next: 0,
        }
    }
}

impl<E> TimerQueue<E> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `event` to fire `delay` after `now`.
    pub fn schedule(&mut self, now: Duration, delay: Duration, event: E) -> TimerHandle {
        let handle = TimerHandle(self.next);
        self.next += 1;
        let deadline = now.saturating_add(delay);
        // Keep entries sorted by (deadline, handle); equal deadlines fire in schedule order.
        let at = self
            .entries
            .partition_point(|e| (e.deadline, e.handle) <= (deadline, handle));
        self.entries.insert(
            at,
            Entry {
                handle,
                deadline,
                event,
            },
        );
        log::trace!("timer {} scheduled for {deadline:?}", handle.0);
        handle
    }

    /// Cancels `handle`; returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.entries.iter().position(|e| e.handle == handle) {
            Some(i) => {
                self.entries.remove(i);
                log::trace!("timer {} cancelled", handle.0);
                true
            }
            None => false,
        }
    }

    /// Removes and returns every timer whose deadline is at or before `now`.
    pub fn advance(&mut self, now: Duration) -> Vec<Fired<E>> {
        let due = self.entries.partition_point(|e| e.deadline <= now);
        self.entries
            .drain(..due)
            .map(|e| Fired {
                handle: e.handle,
                deadline: e.deadline,
                event: e.event,
            })
            .collect()
    }

    /// Number of pending timers.
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Whether `handle` is still pending.
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.first().map(|e| e.deadline)
    }
}
