// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A deterministic timer queue for hosts without their own scheduler.
//!
//! ## Usage
//!
//! 1) Feed every effect batch to [`TimerQueue::apply`]; it picks out the
//!    timer schedules and cancellations and ignores the rest.
//! 2) When time passes, call [`TimerQueue::advance`] and report each returned
//!    [`TimerId`] back to the engine, in order.
//!
//! Deadlines are relative to the queue's own clock, which only moves when
//! [`TimerQueue::advance`] is called. Timers with equal deadlines fire in
//! scheduling order.

use alloc::vec::Vec;

use crate::effect::{TimerId, ZoomEffect};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Entry {
    id: TimerId,
    deadline: f64,
    seq: u64,
}

/// Pending one-shot timers keyed by [`TimerId`].
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    now_ms: f64,
    seq: u64,
    entries: Vec<Entry>,
}

impl TimerQueue {
    /// Creates an empty queue at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current queue time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `id` is pending.
    #[must_use]
    pub fn contains(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Schedules `id` to fire `delay_ms` from now.
    pub fn schedule(&mut self, id: TimerId, delay_ms: f64) {
        self.cancel(id);
        self.seq += 1;
        self.entries.push(Entry {
            id,
            deadline: self.now_ms + delay_ms.max(0.0),
            seq: self.seq,
        });
    }

    /// Cancels `id` if it is pending.
    pub fn cancel(&mut self, id: TimerId) {
        self.entries.retain(|e| e.id != id);
    }

    /// Applies the timer-related effects in `effects`.
    pub fn apply<'a>(&mut self, effects: impl IntoIterator<Item = &'a ZoomEffect>) {
        for effect in effects {
            match *effect {
                ZoomEffect::ScheduleTimer { id, delay_ms, .. } => self.schedule(id, delay_ms),
                ZoomEffect::CancelTimer(id) => self.cancel(id),
                _ => {}
            }
        }
    }

    /// Advances the clock by `ms` and returns the timers that came due, in
    /// firing order.
    pub fn advance(&mut self, ms: f64) -> Vec<TimerId> {
        self.now_ms += ms.max(0.0);
        let now = self.now_ms;
        let mut due: Vec<Entry> = Vec::new();
        self.entries.retain(|e| {
            if e.deadline <= now {
                due.push(*e);
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.deadline.total_cmp(&b.deadline).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|e| e.id).collect()
    }

    /// Removes every pending timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::TimerKind;

    #[test]
    fn fires_in_deadline_then_schedule_order() {
        let mut q = TimerQueue::new();
        q.schedule(TimerId(1), 300.0);
        q.schedule(TimerId(2), 250.0);
        q.schedule(TimerId(3), 250.0);
        assert!(q.advance(249.0).is_empty());
        assert_eq!(q.advance(100.0), [TimerId(2), TimerId(3), TimerId(1)]);
        assert!(q.is_empty());
        assert_eq!(q.now_ms(), 349.0);
    }

    #[test]
    fn apply_schedules_and_cancels() {
        let mut q = TimerQueue::new();
        q.apply(&[
            ZoomEffect::ScheduleTimer {
                id: TimerId(7),
                kind: TimerKind::Settle,
                delay_ms: 10.0,
            },
            ZoomEffect::Repaint,
        ]);
        assert!(q.contains(TimerId(7)));
        q.apply(&[ZoomEffect::CancelTimer(TimerId(7))]);
        assert!(q.is_empty());
    }

    #[test]
    fn rescheduling_replaces_deadline() {
        let mut q = TimerQueue::new();
        q.schedule(TimerId(1), 10.0);
        q.schedule(TimerId(1), 50.0);
        assert_eq!(q.len(), 1);
        assert!(q.advance(20.0).is_empty());
        assert_eq!(q.advance(30.0), [TimerId(1)]);
    }
}
