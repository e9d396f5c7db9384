//! Process-wide gesture identifiers.
//!
//! Every logical gesture (one pan, one pinch) gets exactly one id from a
//! single counter shared by all recognizers, so ids are strictly increasing
//! across gesture kinds and never reused within a process. Once the 32-bit
//! space is exhausted the counter saturates at `u32::MAX`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_GESTURE_ID: AtomicU32 = AtomicU32::new(0);

/// Identifier shared by every event of one gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GestureId(pub u32);

impl GestureId {
    /// Allocate the next id. The first id handed out is 1.
    #[must_use]
    pub fn next() -> Self {
        Self(advance(&NEXT_GESTURE_ID))
    }

    /// Raw value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Increment `counter` and return the new value, saturating at `u32::MAX`.
fn advance(counter: &AtomicU32) -> u32 {
    let previous = counter.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_add(1));
    debug_assert!(previous.is_ok(), "gesture id space exhausted");
    previous.map_or(u32::MAX, |n| n + 1)
}

impl fmt::Display for GestureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
