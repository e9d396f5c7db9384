//! Hosting several recognizers on one target.
//!
//! [`RecognizerSet`] plays the part of a platform's gesture-recognizer
//! collection: it fans pointer events out to its recognizers, honours pointer
//! grabs made through the shared [`CaptureRegistry`], and tells the other
//! recognizers when one of them takes a pointer away.

use crate::capture::{CaptureRegistry, RecognizerId};
use crate::event::{GestureEvent, PointerEvent};
use crate::recognizer::GestureRecognizer;
use crate::routing::NodeId;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Recognizers attached to a single target node.
pub struct RecognizerSet {
    target: NodeId,
    registry: Arc<CaptureRegistry>,
    recognizers: Vec<Box<dyn GestureRecognizer>>,
}

impl RecognizerSet {
    /// Create an empty set for `target`.
    #[must_use]
    pub fn new(target: NodeId) -> Self {
        Self {
            target,
            registry: Arc::new(CaptureRegistry::new()),
            recognizers: Vec::new(),
        }
    }

    /// Node every member publishes on.
    pub const fn target(&self) -> NodeId {
        self.target
    }

    /// Shared capture registry.
    pub fn registry(&self) -> &CaptureRegistry {
        &self.registry
    }

    /// Initialize `recognizer` for this target and append it.
    ///
    /// Members receive events in the order they were added.
    pub fn add<R>(&mut self, mut recognizer: R) -> RecognizerId
    where
        R: GestureRecognizer + 'static,
    {
        recognizer.initialize(self.target, self.registry.clone());
        let id = recognizer.id();
        self.recognizers.push(Box::new(recognizer));
        id
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.recognizers.len()
    }

    /// Whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.recognizers.is_empty()
    }

    /// Deliver `event` and collect the gestures it produced.
    ///
    /// A grabbed pointer's events go only to the grabbing recognizer.
    /// Otherwise members see the event in order until one of them grabs the
    /// pointer. Releases and host capture-loss clear the grab afterwards.
    pub fn process(&mut self, event: &PointerEvent) -> Vec<GestureEvent> {
        let pointer = event.pointer_id();
        let mut emitted = Vec::new();

        if let Some(owner) = self.registry.captured_by(pointer) {
            if let Some(index) = self.recognizers.iter().position(|r| r.id() == owner) {
                self.deliver(index, event, &mut emitted);
            }
        } else {
            for index in 0..self.recognizers.len() {
                self.deliver(index, event, &mut emitted);
                if self.registry.captured_by(pointer).is_some() {
                    break;
                }
            }
        }

        if matches!(
            event,
            PointerEvent::Released { .. } | PointerEvent::CaptureLost { .. }
        ) {
            self.registry.release(pointer);
        }
        emitted
    }

    fn deliver(&mut self, index: usize, event: &PointerEvent, emitted: &mut Vec<GestureEvent>) {
        if let Some(gesture) = self.recognizers[index].process(event) {
            emitted.push(gesture);
        }
        self.notify_capture_changes();
    }

    /// Tell every recognizer except the new owner that it lost the pointer.
    fn notify_capture_changes(&mut self) {
        for (pointer, owner) in self.registry.drain_changes() {
            for recognizer in self.recognizers.iter_mut().filter(|r| r.id() != owner) {
                trace!(%pointer, loser = %recognizer.id(), "capture lost to another recognizer");
                recognizer.pointer_capture_lost(pointer);
            }
        }
    }

    /// Abandon every member's current gesture and drop all grabs.
    pub fn end_all(&mut self) {
        for recognizer in &mut self.recognizers {
            recognizer.end_gesture();
        }
        self.registry.clear();
    }
}

impl fmt::Debug for RecognizerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecognizerSet")
            .field("target", &self.target)
            .field(
                "recognizers",
                &self.recognizers.iter().map(|r| r.id()).collect::<Vec<_>>(),
            )
            .field("grabs", &self.registry.grab_count())
            .finish()
    }
}
