//! Latest-request-wins bookkeeping for panels that load data
//!
//! A panel calls [`RequestTracker::begin`] before each fetch and hands the
//! returned [`Ticket`] back with the result. Only the newest ticket may write
//! into the panel; anything older is dropped.

use tracing::debug;

/// Proof of which request a result belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
pub struct RequestTracker {
    generation: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier ticket
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        Ticket {
            generation: self.generation,
        }
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.generation == self.generation
    }

    /// Supersede the in-flight request without starting another
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }
}

/// One loadable region of a screen: its data, its own error and its tracker
#[derive(Debug)]
pub struct Panel<T> {
    name: &'static str,
    pub data: Option<T>,
    pub error: Option<String>,
    pub loading: bool,
    tracker: RequestTracker,
}

impl<T> Panel<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            data: None,
            error: None,
            loading: false,
            tracker: RequestTracker::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Mark the panel loading and clear its error; existing data stays visible
    pub fn begin(&mut self) -> Ticket {
        self.loading = true;
        self.error = None;
        self.tracker.begin()
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.tracker.is_current(ticket)
    }

    /// Apply a finished request. Returns `false` when the ticket was stale.
    pub fn finish(&mut self, ticket: Ticket, result: Result<T, String>) -> bool {
        if !self.tracker.is_current(ticket) {
            debug!(
                panel = self.name,
                generation = ticket.generation(),
                "Dropping superseded response"
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(error) => self.error = Some(error),
        }
        true
    }

    /// Show an error without touching data, superseding any in-flight request
    pub fn fail(&mut self, error: impl Into<String>) {
        self.tracker.invalidate();
        self.loading = false;
        self.error = Some(error.into());
    }

    /// Drop data and error, superseding any in-flight request
    pub fn reset(&mut self) {
        self.tracker.invalidate();
        self.loading = false;
        self.data = None;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let mut tracker = RequestTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();

        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));

        tracker.invalidate();
        assert!(!tracker.is_current(second));
    }

    #[test]
    fn test_stale_result_is_ignored() {
        let mut panel: Panel<&str> = Panel::new("sequence");
        let slow = panel.begin();
        let fast = panel.begin();

        assert!(panel.finish(fast, Ok("new window")));
        assert!(!panel.finish(slow, Ok("old window")));
        assert_eq!(panel.data, Some("new window"));
        assert!(!panel.loading);
    }

    #[test]
    fn test_error_keeps_previous_data() {
        let mut panel: Panel<u32> = Panel::new("clinvar");
        let ticket = panel.begin();
        panel.finish(ticket, Ok(7));

        let ticket = panel.begin();
        panel.finish(ticket, Err("boom".into()));
        assert_eq!(panel.data, Some(7));
        assert_eq!(panel.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_reset_discards_in_flight_request() {
        let mut panel: Panel<u32> = Panel::new("results");
        let ticket = panel.begin();
        panel.reset();

        assert!(!panel.finish(ticket, Ok(1)));
        assert!(panel.data.is_none());
    }

    #[test]
    fn test_fail_supersedes_in_flight_request() {
        let mut panel: Panel<u32> = Panel::new("sequence");
        let ticket = panel.begin();
        panel.fail("Start position must be less than end position");

        assert!(!panel.finish(ticket, Ok(1)));
        assert_eq!(
            panel.error.as_deref(),
            Some("Start position must be less than end position")
        );
    }
}
