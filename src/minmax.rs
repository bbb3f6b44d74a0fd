/// Running min/max accumulator over elevation samples.
///
/// The tracked range only ever grows while samples are added; callers reset
/// it at the start of each full regeneration pass. The (min, max) pair is
/// handed to the rendering collaborator so it can normalize elevations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxTracker {
    min: f32,
    max: f32,
}

impl MinMaxTracker {
    pub fn new() -> Self {
        Self {
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
        }
    }

    pub fn add_value(&mut self, value: f32) {
        if value > self.max {
            self.max = value;
        }
        if value < self.min {
            self.min = value;
        }
    }

    /// Reinitialize to the empty range (+inf, -inf).
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }
}

impl Default for MinMaxTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tracker_has_inverted_range() {
        let tracker = MinMaxTracker::new();
        assert_eq!(tracker.min(), f32::INFINITY);
        assert_eq!(tracker.max(), f32::NEG_INFINITY);
    }

    #[test]
    fn bounds_every_added_value() {
        let values = [0.3, -1.2, 4.5, 0.0, 4.5, -0.7];
        let mut tracker = MinMaxTracker::new();
        for v in values {
            tracker.add_value(v);
        }
        for v in values {
            assert!(tracker.max() >= v);
            assert!(tracker.min() <= v);
        }
        assert!(tracker.max() >= tracker.min());
        assert_eq!(tracker.min(), -1.2);
        assert_eq!(tracker.max(), 4.5);
    }

    #[test]
    fn range_never_shrinks() {
        let mut tracker = MinMaxTracker::new();
        tracker.add_value(-2.0);
        tracker.add_value(3.0);
        tracker.add_value(0.5);
        assert_eq!(tracker.min(), -2.0);
        assert_eq!(tracker.max(), 3.0);
    }

    #[test]
    fn reset_restores_empty_range() {
        let mut tracker = MinMaxTracker::new();
        tracker.add_value(1.0);
        tracker.reset();
        assert_eq!(tracker.min(), f32::INFINITY);
        assert_eq!(tracker.max(), f32::NEG_INFINITY);
    }
}
