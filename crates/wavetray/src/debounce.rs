//! Single- vs double-click disambiguation for the tray icon.

use std::time::{Duration, Instant};

/// How long a first click waits for a possible second one.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(250);

/// Outcome of a resolved click sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Click {
    /// A lone click whose waiting window elapsed.
    Single,
    /// A second click arrived inside the window, cancelling the single.
    Double,
}

/// Explicit debounce state machine: armed → fired | cancelled.
///
/// The caller owns the clock: feed clicks through [`click`](Self::click),
/// schedule a wake-up for [`deadline`](Self::deadline), and call
/// [`poll`](Self::poll) when it is reached.
#[derive(Debug)]
pub struct ClickDebouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl ClickDebouncer {
    /// Create a debouncer with the given waiting window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Feed a click at `now`. Returns `Double` when this click lands inside
    /// a pending click's window (which cancels the pending single action);
    /// otherwise arms the timer and returns nothing.
    pub fn click(&mut self, now: Instant) -> Option<Click> {
        match self.deadline {
            Some(deadline) if now < deadline => {
                self.deadline = None;
                Some(Click::Double)
            }
            _ => {
                self.deadline = Some(now + self.window);
                None
            }
        }
    }

    /// Fire the pending single click if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<Click> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                Some(Click::Single)
            }
            _ => None,
        }
    }

    /// The instant the pending single click should fire, when armed.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(250);

    #[test]
    fn lone_click_fires_single_after_window() {
        let mut debouncer = ClickDebouncer::new(WINDOW);
        let t0 = Instant::now();
        assert_eq!(debouncer.click(t0), None);
        assert_eq!(debouncer.deadline(), Some(t0 + WINDOW));
        assert_eq!(debouncer.poll(t0 + WINDOW / 2), None);
        assert_eq!(debouncer.poll(t0 + WINDOW), Some(Click::Single));
        // Fired once only.
        assert_eq!(debouncer.poll(t0 + WINDOW * 2), None);
        assert_eq!(debouncer.deadline(), None);
    }

    #[test]
    fn second_click_cancels_single_and_fires_double() {
        let mut debouncer = ClickDebouncer::new(WINDOW);
        let t0 = Instant::now();
        assert_eq!(debouncer.click(t0), None);
        assert_eq!(debouncer.click(t0 + WINDOW / 2), Some(Click::Double));
        // The cancelled single never fires.
        assert_eq!(debouncer.poll(t0 + WINDOW * 2), None);
    }

    #[test]
    fn clicks_after_resolution_start_a_fresh_cycle() {
        let mut debouncer = ClickDebouncer::new(WINDOW);
        let t0 = Instant::now();
        debouncer.click(t0);
        debouncer.click(t0 + Duration::from_millis(10));
        let t1 = t0 + WINDOW * 4;
        assert_eq!(debouncer.click(t1), None);
        assert_eq!(debouncer.poll(t1 + WINDOW), Some(Click::Single));
    }
}
