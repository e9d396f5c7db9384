//! Pointer capture requests.
//!
//! A recognizer that starts acting on a pointer asks to keep receiving that
//! pointer's events, even outside its target's bounds. Recognizers get the
//! dispatcher injected at initialization and call
//! [`CaptureDispatcher::capture`]; the host decides what capture means.

use crate::event::PointerId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::RwLock;

static NEXT_RECOGNIZER_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of a recognizer instance, used as the capture owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecognizerId(pub u32);

impl RecognizerId {
    /// Allocate a fresh recognizer identity.
    #[must_use]
    pub fn unique() -> Self {
        Self(NEXT_RECOGNIZER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for RecognizerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Capability handed to recognizers for requesting pointer capture.
///
/// Capturing has no failure path. Repeating a request for the same
/// pointer/recognizer pair must be harmless.
pub trait CaptureDispatcher: fmt::Debug + Send + Sync {
    /// Route subsequent events for `pointer` to `recognizer`.
    fn capture(&self, pointer: PointerId, recognizer: RecognizerId);
}

/// Capture dispatcher that records grabs and queues changes for the host.
///
/// Only requests that change the owner of a pointer are queued, so repeated
/// captures by the same recognizer produce a single notification.
#[derive(Debug, Default)]
pub struct CaptureRegistry {
    grabs: RwLock<HashMap<PointerId, RecognizerId>>,
    pending: RwLock<Vec<(PointerId, RecognizerId)>>,
}

impl CaptureRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recognizer currently holding `pointer`, if any.
    pub fn captured_by(&self, pointer: PointerId) -> Option<RecognizerId> {
        self.grabs
            .read()
            .expect("CaptureRegistry lock poisoned")
            .get(&pointer)
            .copied()
    }

    /// Drop the grab on `pointer`, returning the previous owner.
    pub fn release(&self, pointer: PointerId) -> Option<RecognizerId> {
        self.grabs
            .write()
            .expect("CaptureRegistry lock poisoned")
            .remove(&pointer)
    }

    /// Take the ownership changes queued since the last drain, oldest first.
    pub fn drain_changes(&self) -> Vec<(PointerId, RecognizerId)> {
        std::mem::take(&mut *self.pending.write().expect("CaptureRegistry lock poisoned"))
    }

    /// Drop every grab and pending change.
    pub fn clear(&self) {
        self.grabs.write().expect("CaptureRegistry lock poisoned").clear();
        self.pending.write().expect("CaptureRegistry lock poisoned").clear();
    }

    /// Number of pointers currently grabbed.
    pub fn grab_count(&self) -> usize {
        self.grabs.read().expect("CaptureRegistry lock poisoned").len()
    }
}

impl CaptureDispatcher for CaptureRegistry {
    fn capture(&self, pointer: PointerId, recognizer: RecognizerId) {
        let previous = self
            .grabs
            .write()
            .expect("CaptureRegistry lock poisoned")
            .insert(pointer, recognizer);
        if previous != Some(recognizer) {
            tracing::debug!(%pointer, %recognizer, "pointer captured");
            self.pending
                .write()
                .expect("CaptureRegistry lock poisoned")
                .push((pointer, recognizer));
        }
    }
}
