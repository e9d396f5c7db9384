//! Replaying traces through a recognizer host.
//!
//! The replayer wires up the same shape a UI would: a root node with a canvas
//! child, pan and pinch recognizers attached to the canvas, and handlers on
//! the root that receive the bubbled gestures.

use crate::error::TraceError;
use crate::trace::Trace;
use pinchpan_core::{
    EventRouter, GestureConfig, GestureConsumer, GestureEvent, GestureId, GestureKind,
    PanGestureRecognizer, PinchToZoomGestureRecognizer, RecognizerSet, Transform2D,
};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use tracing::{debug, trace};

/// Outcome of a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    /// Gestures received at the root, in order
    pub events: Vec<GestureEvent>,
    /// Consumer transform after the last event
    pub transform: Transform2D,
    /// Distinct pan gestures seen
    pub pan_gestures: usize,
    /// Distinct pinch gestures seen
    pub pinch_gestures: usize,
}

impl ReplayReport {
    fn from_events(events: Vec<GestureEvent>, transform: Transform2D) -> Self {
        let count = |kind: GestureKind| {
            events
                .iter()
                .filter(|e| e.kind() == kind)
                .map(GestureEvent::gesture_id)
                .collect::<BTreeSet<GestureId>>()
                .len()
        };
        Self {
            pan_gestures: count(GestureKind::Pan),
            pinch_gestures: count(GestureKind::Pinch),
            events,
            transform,
        }
    }

    /// Whether no gesture was recognized.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Feeds trace events to pan and pinch recognizers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Replayer {
    config: GestureConfig,
}

impl Replayer {
    /// Create a replayer with an explicit configuration.
    pub const fn new(config: GestureConfig) -> Self {
        Self { config }
    }

    /// Create a replayer using the trace's own configuration.
    pub fn for_trace(trace: &Trace) -> Self {
        Self::new(trace.config)
    }

    /// Configuration in use.
    pub const fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Validate `trace`, replay it and report what came out.
    pub fn replay(&self, trace: &Trace) -> Result<ReplayReport, TraceError> {
        let summary = trace.validate()?;
        let pan_config = self.config.pan.validate()?;
        debug!(%summary, ?pan_config, zoomable = self.config.pinch.zoomable, "replaying trace");

        let mut router = EventRouter::new();
        let root = router.add_root();
        let canvas = router.add_child(root).expect("root was just added");

        let consumer = Arc::new(Mutex::new(GestureConsumer::new()));
        let recorded = Arc::new(Mutex::new(Vec::new()));
        for kind in [GestureKind::Pan, GestureKind::Pinch] {
            let consumer = Arc::clone(&consumer);
            let recorded = Arc::clone(&recorded);
            router.subscribe(root, kind, move |routed| {
                consumer
                    .lock()
                    .expect("consumer lock poisoned")
                    .apply(&routed.event);
                recorded
                    .lock()
                    .expect("recorder lock poisoned")
                    .push(routed.event);
            });
        }

        // Pinch first: once two contacts are down it grabs them before the pan.
        let mut recognizers = RecognizerSet::new(canvas);
        recognizers.add(PinchToZoomGestureRecognizer::new(self.config.pinch.zoomable));
        recognizers.add(PanGestureRecognizer::new(pan_config));

        for (index, event) in trace.pointer_events().enumerate() {
            for gesture in recognizers.process(&event) {
                trace!(index, %gesture, "gesture");
                router.raise(canvas, gesture);
            }
        }

        let transform = consumer.lock().expect("consumer lock poisoned").transform();
        let events = std::mem::take(&mut *recorded.lock().expect("recorder lock poisoned"));
        let report = ReplayReport::from_events(events, transform);
        debug!(
            events = report.events.len(),
            pans = report.pan_gestures,
            pinches = report.pinch_gestures,
            "replay finished"
        );
        Ok(report)
    }
}
