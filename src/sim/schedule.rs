//! One-shot delayed callbacks on the simulation thread
//!
//! Payloads are plain data; the session decides what to do with them when they
//! come due (and whether it is still allowed to).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Pending<T> {
    due_ms: f64,
    /// Insertion order, breaks ties between equal due times
    seq: u64,
    payload: T,
}

/// Fire-and-forget timer queue measured in simulation milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scheduler<T> {
    /// Monotonic clock; f64 so long sessions keep millisecond resolution
    now_ms: f64,
    next_seq: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now_ms: 0.0,
            next_seq: 0,
            pending: Vec::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `payload` once, `delay_ms` from now
    pub fn schedule_once(&mut self, delay_ms: f32, payload: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            due_ms: self.now_ms + f64::from(delay_ms.max(0.0)),
            seq,
            payload,
        });
    }

    /// Advance the clock and hand back everything now due, earliest first
    pub fn advance(&mut self, dt_ms: f32) -> Vec<T> {
        self.now_ms += f64::from(dt_ms.max(0.0));
        let now = self.now_ms;

        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due_ms <= now);
        self.pending = waiting;

        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|p| p.payload).collect()
    }

    /// Number of callbacks still waiting
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop everything still pending
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_order() {
        let mut sched = Scheduler::new();
        sched.schedule_once(400.0, "c");
        sched.schedule_once(0.0, "a");
        sched.schedule_once(200.0, "b");

        assert_eq!(sched.advance(0.0), vec!["a"]);
        assert!(sched.advance(150.0).is_empty());
        assert_eq!(sched.advance(300.0), vec!["b", "c"]);
        assert!(sched.is_empty());
    }

    #[test]
    fn test_delay_is_relative_to_schedule_time() {
        let mut sched = Scheduler::new();
        sched.advance(1000.0);
        sched.schedule_once(200.0, 7);
        assert!(sched.advance(199.0).is_empty());
        assert_eq!(sched.advance(1.0), vec![7]);
    }

    #[test]
    fn test_clock_keeps_resolution_in_long_sessions() {
        let mut sched = Scheduler::new();
        // Roughly six days of simulated time
        sched.advance((1u32 << 29) as f32);
        sched.schedule_once(200.0, "late");

        let mut steps = 0;
        while sched.advance(1000.0 / 60.0).is_empty() {
            steps += 1;
            assert!(steps < 20, "clock stopped advancing");
        }
        assert!((11..=13).contains(&steps), "steps = {steps}");
    }

    #[test]
    fn test_clear_cancels_pending() {
        let mut sched = Scheduler::new();
        sched.schedule_once(100.0, 1);
        sched.schedule_once(200.0, 2);
        assert_eq!(sched.len(), 2);
        sched.clear();
        assert!(sched.advance(1000.0).is_empty());
    }
}
