//! Scroll reading-position classification.
//!
//! Pure, read-only with respect to collapse state, and recomputed in full on
//! every (throttled) scroll or resize tick. Output drives TOC row styling
//! only.

/// Where a heading sits relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingState {
    /// The heading's whole extent lies above the viewport.
    Passed,
    /// The heading intersects the viewport.
    Reading,
    /// The heading's whole extent lies below the viewport.
    Coming,
}

/// Result of one classification pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Per-heading state, in document order.
    pub states: Vec<ReadingState>,
    /// The single heading whose extent straddles the viewport center, if any.
    pub active: Option<usize>,
}

/// Classifies headings by their absolute vertical extents `(top, bottom)`.
pub fn classify(
    extents: &[(f64, f64)],
    viewport_top: f64,
    viewport_bottom: f64,
    viewport_center: f64,
) -> Classification {
    let mut states = Vec::with_capacity(extents.len());
    let mut active = None;
    for (index, &(top, bottom)) in extents.iter().enumerate() {
        let state = if bottom < viewport_top {
            ReadingState::Passed
        } else if top > viewport_bottom {
            ReadingState::Coming
        } else {
            if top <= viewport_center && bottom >= viewport_center {
                active = Some(index);
            }
            ReadingState::Reading
        };
        states.push(state);
    }
    Classification {
        states,
        active,
    }
}

/// Drops ticks that arrive inside the throttle window. Stale ticks are never
/// queued; a trailing event always follows real scrolling, so the only cost
/// is latency bounded by the window.
#[derive(Debug, Clone)]
pub struct Throttle {
    window_ms: f64,
    last: f64,
}

impl Throttle {
    /// A throttle that admits at most one tick per `window_ms`.
    pub fn new(window_ms: f64) -> Self {
        Throttle {
            window_ms,
            last: f64::NEG_INFINITY,
        }
    }

    /// Returns whether a tick at wall-clock `now` should run, and records it
    /// if so.
    pub fn ready(&mut self, now: f64) -> bool {
        if now - self.last < self.window_ms {
            return false;
        }
        self.last = now;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extents_fully_above_the_viewport_are_passed() {
        let c = classify(&[(0.0, 80.0), (90.0, 120.0)], 100.0, 700.0, 400.0);
        assert_eq!(c.states[0], ReadingState::Passed);
        // Bottom edge exactly at viewport_top still intersects.
        assert_eq!(c.states[1], ReadingState::Reading);
    }

    #[test]
    fn extents_fully_below_the_viewport_are_coming() {
        let c = classify(&[(800.0, 840.0)], 100.0, 700.0, 400.0);
        assert_eq!(c.states[0], ReadingState::Coming);
        assert_eq!(c.active, None);
    }

    #[test]
    fn the_heading_straddling_center_is_active() {
        let c = classify(
            &[(120.0, 160.0), (380.0, 420.0), (500.0, 540.0)],
            100.0,
            700.0,
            400.0,
        );
        assert_eq!(c.active, Some(1));
        assert_eq!(c.states[1], ReadingState::Reading);
    }

    #[test]
    fn no_heading_straddling_center_means_no_active() {
        let c = classify(&[(120.0, 160.0), (500.0, 540.0)], 100.0, 700.0, 400.0);
        assert_eq!(c.active, None);
        assert!(c.states.iter().all(|&s| s == ReadingState::Reading));
    }

    #[test]
    fn classification_is_idempotent() {
        let extents = [(0.0, 50.0), (300.0, 350.0), (900.0, 950.0)];
        let a = classify(&extents, 100.0, 700.0, 400.0);
        let b = classify(&extents, 100.0, 700.0, 400.0);
        assert_eq!(a, b);
    }

    #[test]
    fn throttle_drops_ticks_inside_the_window() {
        let mut t = Throttle::new(50.0);
        assert!(t.ready(1000.0));
        assert!(!t.ready(1020.0));
        assert!(!t.ready(1049.0));
        assert!(t.ready(1050.0));
        assert!(!t.ready(1051.0));
    }
}
