use std::sync::atomic::{AtomicU64, Ordering};

/// Orders overlapping fetches for one piece of view state.
///
/// Every fetch takes a ticket before it starts. When it resolves, it may only
/// publish if no newer ticket has been issued since; results of superseded
/// fetches are dropped. Requests are not cancelled.
#[derive(Debug, Default)]
pub struct RequestSlot {
    latest: AtomicU64,
}

/// Proof of having started a fetch; see [`RequestSlot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is still the newest one issued.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}
