//! The contract shared by gesture recognizers.

use crate::capture::{CaptureDispatcher, RecognizerId};
use crate::event::{GestureEvent, Pointer, PointerEvent, PointerId, Timestamp};
use crate::geometry::Point;
use crate::routing::NodeId;
use std::sync::Arc;

/// A state machine turning raw pointer callbacks into gesture events.
///
/// Callbacks arrive one at a time, in the order the host received them.
/// None of them fail: pointers a recognizer does not track are ignored.
pub trait GestureRecognizer: Send {
    /// Identity used when requesting pointer capture.
    fn id(&self) -> RecognizerId;

    /// Attach to `target` and receive the capture capability.
    fn initialize(&mut self, target: NodeId, dispatcher: Arc<dyn CaptureDispatcher>);

    /// Node emitted events are published on, once initialized.
    fn target(&self) -> Option<NodeId>;

    /// A contact went down.
    fn pointer_pressed(&mut self, pointer: Pointer, position: Point, timestamp: Timestamp);

    /// A contact moved; may produce a gesture update.
    fn pointer_moved(
        &mut self,
        pointer: PointerId,
        position: Point,
        timestamp: Timestamp,
    ) -> Option<GestureEvent>;

    /// A contact lifted.
    fn pointer_released(&mut self, pointer: PointerId);

    /// Capture of a contact was taken away from this recognizer.
    fn pointer_capture_lost(&mut self, pointer: PointerId);

    /// Abandon the current gesture.
    fn end_gesture(&mut self);

    /// Dispatch a raw event to the matching callback.
    fn process(&mut self, event: &PointerEvent) -> Option<GestureEvent> {
        match *event {
            PointerEvent::Pressed {
                pointer,
                position,
                timestamp,
            } => {
                self.pointer_pressed(pointer, position, timestamp);
                None
            }
            PointerEvent::Moved {
                pointer,
                position,
                timestamp,
            } => self.pointer_moved(pointer, position, timestamp),
            PointerEvent::Released { pointer } => {
                self.pointer_released(pointer);
                None
            }
            PointerEvent::CaptureLost { pointer } => {
                self.pointer_capture_lost(pointer);
                None
            }
        }
    }
}
