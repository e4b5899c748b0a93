//! Linear counter animation used by the result gauge and the stats tiles.

use std::time::Duration;

/// Counts from `start` to `end` over `duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterAnimation {
    pub start: i64,
    pub end: i64,
    pub duration: Duration,
}

impl CounterAnimation {
    pub fn new(start: i64, end: i64, duration: Duration) -> Self {
        Self {
            start,
            end,
            duration,
        }
    }

    /// Progress in `[0.0, 1.0]` after `elapsed`. A zero duration is
    /// complete immediately.
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Displayed value after `elapsed`: `floor(progress * (end - start) + start)`.
    pub fn value_at(&self, elapsed: Duration) -> i64 {
        let span = (self.end - self.start) as f64;
        (self.progress(elapsed) * span + self.start as f64).floor() as i64
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        self.progress(elapsed) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn starts_at_start_and_ends_at_end() {
        let anim = CounterAnimation::new(0, 87, ms(1000));
        assert_eq!(anim.value_at(ms(0)), 0);
        assert_eq!(anim.value_at(ms(1000)), 87);
    }

    #[test]
    fn clamps_past_duration() {
        let anim = CounterAnimation::new(0, 87, ms(1000));
        assert_eq!(anim.value_at(ms(5000)), 87);
        assert!(anim.is_finished(ms(1000)));
        assert!(!anim.is_finished(ms(999)));
    }

    #[test]
    fn interpolates_linearly() {
        let anim = CounterAnimation::new(0, 3420, ms(1500));
        assert_eq!(anim.value_at(ms(750)), 1710);
    }

    #[test]
    fn is_monotonic() {
        let anim = CounterAnimation::new(0, 99, ms(1000));
        let mut last = i64::MIN;
        for t in (0..=1200).step_by(7) {
            let v = anim.value_at(ms(t));
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn zero_duration_jumps_to_end() {
        let anim = CounterAnimation::new(0, 42, Duration::ZERO);
        assert_eq!(anim.value_at(Duration::ZERO), 42);
    }
}
