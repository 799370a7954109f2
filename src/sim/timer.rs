//! Run tokens and a virtual-time timer queue
//!
//! Timers are plain values. Whoever owns the game state hands each timer a
//! [`RunToken`] and remembers the token of the run it currently cares about;
//! a timer whose token no longer matches is stale and must be ignored.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Identifies one run of a repeating or chained timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunToken(u64);

impl RunToken {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Hands out strictly increasing run tokens
#[derive(Debug, Clone, Default)]
pub struct TokenSource {
    next: u64,
}

impl TokenSource {
    pub fn issue(&mut self) -> RunToken {
        self.next += 1;
        RunToken(self.next)
    }
}

/// Which timer a callback belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKind {
    /// Power accumulation while the launch control is held
    Charge,
    /// Arrow flight stepping
    Flight,
    /// Post-defeat delays (burning, victory banner)
    Defeat,
}

/// A scheduled callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timer {
    pub kind: TimerKind,
    pub token: RunToken,
}

/// Anything that can deliver a timer back after a delay
pub trait Scheduler {
    fn schedule(&mut self, delay_ms: u64, timer: Timer);
}

/// Deterministic single-threaded timer queue driven by a virtual clock
///
/// Timers due at the same instant fire in scheduling order.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now_ms: u64,
    seq: u64,
    pending: BinaryHeap<Reverse<(u64, u64, Timer)>>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of timers waiting (stale ones included)
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Due time of the earliest pending timer
    pub fn next_due(&self) -> Option<u64> {
        self.pending.peek().map(|Reverse((due, _, _))| *due)
    }

    /// Pop the earliest timer due at or before `until_ms`, moving the clock to it
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Timer> {
        match self.pending.peek() {
            Some(Reverse((due, _, _))) if *due <= until_ms => {}
            _ => return None,
        }
        let Reverse((due, _, timer)) = self.pending.pop()?;
        self.now_ms = self.now_ms.max(due);
        Some(timer)
    }

    /// Move the clock forward without firing anything
    pub fn advance_to(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, delay_ms: u64, timer: Timer) {
        self.seq += 1;
        self.pending
            .push(Reverse((self.now_ms + delay_ms, self.seq, timer)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer(tokens: &mut TokenSource, kind: TimerKind) -> Timer {
        Timer {
            kind,
            token: tokens.issue(),
        }
    }

    #[test]
    fn test_tokens_are_unique() {
        let mut tokens = TokenSource::default();
        let a = tokens.issue();
        let b = tokens.issue();
        assert_ne!(a, b);
        assert!(b.id() > a.id());
    }

    #[test]
    fn test_pop_due_respects_deadline() {
        let mut tokens = TokenSource::default();
        let mut queue = TimerQueue::new();
        let t = timer(&mut tokens, TimerKind::Charge);
        queue.schedule(50, t);

        assert_eq!(queue.pop_due(49), None);
        assert_eq!(queue.pop_due(50), Some(t));
        assert_eq!(queue.now_ms(), 50);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_fires_in_due_then_schedule_order() {
        let mut tokens = TokenSource::default();
        let mut queue = TimerQueue::new();
        let late = timer(&mut tokens, TimerKind::Defeat);
        let first = timer(&mut tokens, TimerKind::Flight);
        let second = timer(&mut tokens, TimerKind::Charge);
        queue.schedule(2000, late);
        queue.schedule(50, first);
        queue.schedule(50, second);

        assert_eq!(queue.next_due(), Some(50));
        assert_eq!(queue.pop_due(5000), Some(first));
        assert_eq!(queue.pop_due(5000), Some(second));
        assert_eq!(queue.pop_due(5000), Some(late));
        assert_eq!(queue.now_ms(), 2000);
    }

    #[test]
    fn test_delays_are_relative_to_now() {
        let mut tokens = TokenSource::default();
        let mut queue = TimerQueue::new();
        queue.advance_to(1000);
        let t = timer(&mut tokens, TimerKind::Flight);
        queue.schedule(50, t);
        assert_eq!(queue.next_due(), Some(1050));

        // The clock never runs backwards
        queue.advance_to(10);
        assert_eq!(queue.now_ms(), 1000);
    }
}
