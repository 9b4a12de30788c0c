//! Server-side message timestamps.

use std::sync::atomic::{AtomicI64, Ordering};

use huddle_shared::time::get_utc_timestamp;

use crate::domain::Timestamp;

/// Hands out message timestamps that never go backwards, even if the wall
/// clock does.
#[derive(Debug, Default)]
pub struct MessageClock {
    last: AtomicI64,
}

impl MessageClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timestamp for a message created now.
    pub fn now(&self) -> Timestamp {
        self.observe(get_utc_timestamp())
    }

    fn observe(&self, wall_millis: i64) -> Timestamp {
        let previous = self.last.fetch_max(wall_millis, Ordering::SeqCst);
        Timestamp::new(previous.max(wall_millis))
    }
}
