//! Heading-window classification with 0°/360° wraparound
//!
//! A heading window is the angular arc, centered on a target heading,
//! within which the vehicle counts as aligned. When the arc crosses
//! north its lower bound is numerically greater than its upper bound
//! and the window must be read as [from, 360) ∪ [0, to).

use crate::nav::geo::normalize_deg;

/// Result of testing a heading against a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeCheck {
    /// Heading is inside the window
    InRange,
    /// Heading must increase (turn right) to enter the window
    NeedClockwise,
    /// Heading must decrease (turn left) to enter the window
    NeedCounterClockwise,
}

/// Angular arc [from, to] in degrees, both bounds in [0, 360)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingWindow {
    pub from_deg: f32,
    pub to_deg: f32,
}

impl HeadingWindow {
    pub fn new(from_deg: f32, to_deg: f32) -> Self {
        Self { from_deg, to_deg }
    }

    /// Window of ±`deviation_deg` around a target heading, normalized
    pub fn around(target_deg: f32, deviation_deg: f32) -> Self {
        Self {
            from_deg: normalize_deg(target_deg, -deviation_deg),
            to_deg: normalize_deg(target_deg, deviation_deg),
        }
    }

    /// True if the arc crosses the 0°/360° boundary
    pub fn wraps(&self) -> bool {
        self.from_deg > self.to_deg
    }

    /// Classify a heading against this window
    ///
    /// For a wrapping arc the `from` bound is exclusive and the split
    /// of the excluded region uses the threshold `from - (from - to)/2`
    /// with a strict comparison: a heading exactly on the threshold
    /// classifies as `NeedCounterClockwise`. This is a coarse two-way
    /// split, not a geometric bisection of the excluded arc, and is
    /// kept as-is because the correction direction near the far edge
    /// depends on it.
    pub fn check(&self, current_deg: f32) -> RangeCheck {
        if self.wraps() {
            if current_deg > self.from_deg || current_deg < self.to_deg {
                RangeCheck::InRange
            } else {
                let half_gap = (self.from_deg - self.to_deg) / 2.0;
                if self.from_deg - half_gap < current_deg {
                    RangeCheck::NeedClockwise
                } else {
                    RangeCheck::NeedCounterClockwise
                }
            }
        } else if current_deg < self.from_deg {
            RangeCheck::NeedClockwise
        } else if current_deg > self.to_deg {
            RangeCheck::NeedCounterClockwise
        } else {
            RangeCheck::InRange
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_window_classifies_three_ways() {
        let window = HeadingWindow::new(10.0, 50.0);
        assert_eq!(window.check(30.0), RangeCheck::InRange);
        assert_eq!(window.check(5.0), RangeCheck::NeedClockwise);
        assert_eq!(window.check(60.0), RangeCheck::NeedCounterClockwise);
    }

    #[test]
    fn plain_window_bounds_are_inclusive() {
        let window = HeadingWindow::new(10.0, 50.0);
        assert_eq!(window.check(10.0), RangeCheck::InRange);
        assert_eq!(window.check(50.0), RangeCheck::InRange);
    }

    #[test]
    fn wrapping_window_accepts_both_sides_of_north() {
        let window = HeadingWindow::new(350.0, 10.0);
        assert!(window.wraps());
        assert_eq!(window.check(355.0), RangeCheck::InRange);
        assert_eq!(window.check(5.0), RangeCheck::InRange);
    }

    #[test]
    fn wrapping_window_splits_excluded_arc_at_threshold() {
        // threshold = 350 - (350 - 10)/2 = 180
        let window = HeadingWindow::new(350.0, 10.0);
        assert_eq!(window.check(181.0), RangeCheck::NeedClockwise);
        assert_eq!(window.check(179.0), RangeCheck::NeedCounterClockwise);
    }

    #[test]
    fn wrapping_window_threshold_tie_breaks_counter_clockwise() {
        let window = HeadingWindow::new(350.0, 10.0);
        assert_eq!(window.check(180.0), RangeCheck::NeedCounterClockwise);
    }

    #[test]
    fn wrapping_window_lower_bound_is_exclusive() {
        // 350 itself is not in [350, 10]; it sits above the 180
        // threshold, so the short way in is clockwise.
        let window = HeadingWindow::new(350.0, 10.0);
        assert_eq!(window.check(350.0), RangeCheck::NeedClockwise);
    }

    #[test]
    fn degenerate_window_is_exact_match_only() {
        let window = HeadingWindow::new(90.0, 90.0);
        assert_eq!(window.check(90.0), RangeCheck::InRange);
        assert_eq!(window.check(89.9), RangeCheck::NeedClockwise);
        assert_eq!(window.check(90.1), RangeCheck::NeedCounterClockwise);
    }

    #[test]
    fn around_builds_normalized_bounds() {
        let window = HeadingWindow::around(5.0, 10.0);
        assert_eq!(window.from_deg, 355.0);
        assert_eq!(window.to_deg, 15.0);
        assert!(window.wraps());
    }

    #[test]
    fn around_at_ninety_is_plain() {
        let window = HeadingWindow::around(90.0, 10.0);
        assert_eq!(window.from_deg, 80.0);
        assert_eq!(window.to_deg, 100.0);
        assert!(!window.wraps());
    }
}
