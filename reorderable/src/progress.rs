use alloc::sync::Arc;
use core::sync::atomic::{AtomicUsize, Ordering};

/// Lifecycle of a progress controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProgressStatus {
    /// Stopped at 0.
    Dismissed,
    /// Running towards 1.
    Forward,
    /// Running towards 0.
    Reverse,
    /// Stopped at 1.
    Completed,
}

/// Counts of progress controllers created and released by one reorder controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationStats {
    pub created: usize,
    pub released: usize,
}

impl AnimationStats {
    /// Controllers that are still owned by an item, slot or session.
    pub fn live(&self) -> usize {
        self.created.saturating_sub(self.released)
    }
}

#[derive(Debug, Default)]
struct Counters {
    created: AtomicUsize,
    released: AtomicUsize,
}

/// Shared bookkeeping for every [`Progress`] a controller hands out.
#[derive(Clone, Debug, Default)]
pub(crate) struct AnimationTracker {
    counters: Arc<Counters>,
}

impl AnimationTracker {
    pub(crate) fn stats(&self) -> AnimationStats {
        AnimationStats {
            created: self.counters.created.load(Ordering::Relaxed),
            released: self.counters.released.load(Ordering::Relaxed),
        }
    }

    fn lease(&self) -> Lease {
        self.counters.created.fetch_add(1, Ordering::Relaxed);
        Lease {
            counters: Arc::clone(&self.counters),
        }
    }
}

#[derive(Debug)]
struct Lease {
    counters: Arc<Counters>,
}

impl Drop for Lease {
    fn drop(&mut self) {
        self.counters.released.fetch_add(1, Ordering::Relaxed);
    }
}

/// A time-driven value in `[0, 1]`.
///
/// Owned by exactly one ledger item, slot gap or drag session; dropping it releases it.
#[derive(Debug)]
pub(crate) struct Progress {
    duration_ms: u64,
    from: f32,
    to: f32,
    start_ms: u64,
    run_ms: u64,
    value: f32,
    status: ProgressStatus,
    _lease: Lease,
}

impl Progress {
    pub(crate) fn new(tracker: &AnimationTracker, duration_ms: u64, value: f32) -> Self {
        let value = value.clamp(0.0, 1.0);
        Self {
            duration_ms,
            from: value,
            to: value,
            start_ms: 0,
            run_ms: 0,
            value,
            status: if value >= 1.0 {
                ProgressStatus::Completed
            } else {
                ProgressStatus::Dismissed
            },
            _lease: tracker.lease(),
        }
    }

    pub(crate) fn value(&self) -> f32 {
        self.value
    }

    pub(crate) fn status(&self) -> ProgressStatus {
        self.status
    }

    pub(crate) fn is_running(&self) -> bool {
        matches!(
            self.status,
            ProgressStatus::Forward | ProgressStatus::Reverse
        )
    }

    /// Runs towards 1 from the current value.
    pub(crate) fn forward(&mut self, now_ms: u64) {
        self.run_to(1.0, now_ms);
    }

    /// Jumps to `value`, then runs towards 1.
    pub(crate) fn forward_from(&mut self, value: f32, now_ms: u64) {
        self.value = value.clamp(0.0, 1.0);
        self.run_to(1.0, now_ms);
    }

    /// Runs towards 0 from the current value.
    pub(crate) fn reverse(&mut self, now_ms: u64) {
        self.run_to(0.0, now_ms);
    }

    fn run_to(&mut self, to: f32, now_ms: u64) {
        let distance = if to > self.value {
            to - self.value
        } else {
            self.value - to
        };
        self.from = self.value;
        self.to = to;
        self.start_ms = now_ms;
        self.run_ms = (self.duration_ms as f32 * distance) as u64;
        if self.run_ms == 0 {
            self.settle();
        } else if to >= 1.0 {
            self.status = ProgressStatus::Forward;
        } else {
            self.status = ProgressStatus::Reverse;
        }
    }

    fn settle(&mut self) {
        self.value = self.to;
        self.status = if self.to >= 1.0 {
            ProgressStatus::Completed
        } else {
            ProgressStatus::Dismissed
        };
    }

    /// Advances the value to `now_ms` and returns the resulting status.
    pub(crate) fn tick(&mut self, now_ms: u64) -> ProgressStatus {
        if !self.is_running() {
            return self.status;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);
        if elapsed >= self.run_ms {
            self.settle();
        } else {
            let t = elapsed as f32 / self.run_ms as f32;
            self.value = self.from + (self.to - self.from) * t;
        }
        self.status
    }
}

#[cfg(test)]
mod progress_tests {
    use super::*;

    #[test]
    fn forward_then_reverse_scales_duration_by_distance() {
        let tracker = AnimationTracker::default();
        let mut p = Progress::new(&tracker, 100, 0.0);
        p.forward(0);
        assert_eq!(p.tick(50), ProgressStatus::Forward);
        assert!((p.value() - 0.5).abs() < 1e-6);

        p.reverse(50);
        assert_eq!(p.tick(75), ProgressStatus::Reverse);
        assert!((p.value() - 0.25).abs() < 1e-6);
        assert_eq!(p.tick(100), ProgressStatus::Dismissed);
        assert_eq!(p.value(), 0.0);
    }

    #[test]
    fn leases_are_counted_on_drop() {
        let tracker = AnimationTracker::default();
        let a = Progress::new(&tracker, 10, 1.0);
        let b = Progress::new(&tracker, 10, 0.0);
        assert_eq!(tracker.stats().live(), 2);
        drop(a);
        assert_eq!(
            tracker.stats(),
            AnimationStats {
                created: 2,
                released: 1
            }
        );
        drop(b);
        assert_eq!(tracker.stats().live(), 0);
    }

    #[test]
    fn zero_duration_settles_immediately() {
        let tracker = AnimationTracker::default();
        let mut p = Progress::new(&tracker, 0, 0.0);
        p.forward(5);
        assert_eq!(p.status(), ProgressStatus::Completed);
        assert_eq!(p.value(), 1.0);
    }
}
