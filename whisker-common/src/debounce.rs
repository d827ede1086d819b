//! Ticket-based debouncer for the search input
//!
//! Each keystroke replaces the pending value and bumps the generation. The
//! host sleeps for [`Debouncer::delay_ms`] and then calls
//! [`Debouncer::settle`] with the ticket it was handed; only the ticket of
//! the latest keystroke yields a value. Intermediate values are dropped.

/// Identifies one scheduled settle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebounceTicket(u64);

#[derive(Clone, Debug, PartialEq)]
pub struct Debouncer {
    delay_ms: u64,
    generation: u64,
    pending: Option<String>,
}

impl Debouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            generation: 0,
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Replace whatever is pending with `value`.
    pub fn schedule(&mut self, value: impl Into<String>) -> DebounceTicket {
        self.generation += 1;
        self.pending = Some(value.into());
        DebounceTicket(self.generation)
    }

    /// Take the pending value if `ticket` is still the latest one.
    pub fn settle(&mut self, ticket: DebounceTicket) -> Option<String> {
        if ticket.0 != self.generation {
            return None;
        }
        self.pending.take()
    }

    /// Drop the pending value; outstanding tickets settle to nothing.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_keystroke_wins() {
        let mut debouncer = Debouncer::new(300);
        let first = debouncer.schedule("m");
        let second = debouncer.schedule("mo");
        let third = debouncer.schedule("moc");

        assert_eq!(debouncer.settle(first), None);
        assert_eq!(debouncer.settle(second), None);
        assert_eq!(debouncer.settle(third), Some("moc".to_string()));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_ticket_settles_once() {
        let mut debouncer = Debouncer::new(300);
        let ticket = debouncer.schedule("mochi");
        assert!(debouncer.settle(ticket).is_some());
        assert!(debouncer.settle(ticket).is_none());
    }

    #[test]
    fn test_cancel_invalidates_outstanding_ticket() {
        let mut debouncer = Debouncer::new(300);
        let ticket = debouncer.schedule("mochi");
        debouncer.cancel();
        assert_eq!(debouncer.settle(ticket), None);
    }
}
