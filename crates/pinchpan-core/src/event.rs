//! Pointer input and gesture output events.

use crate::gesture_id::GestureId;
use crate::geometry::{Point, Vector};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of timestamp ticks in one second.
pub const TICKS_PER_SECOND: u64 = 10_000_000;

/// Pointer identifier, stable for the lifetime of one contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct PointerId(pub u32);

impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type of pointer device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PointerType {
    /// Mouse pointer
    Mouse,
    /// Touch pointer
    #[default]
    Touch,
    /// Pen/stylus pointer
    Pen,
}

impl PointerType {
    /// Touch and pen contacts can drive gestures; the mouse cannot.
    #[must_use]
    pub const fn is_contact(&self) -> bool {
        matches!(self, Self::Touch | Self::Pen)
    }
}

/// A physical contact as reported on press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pointer {
    /// Contact identifier
    pub id: PointerId,
    /// Device kind
    pub pointer_type: PointerType,
    /// OS-designated first/anchor contact
    pub is_primary: bool,
}

impl Pointer {
    /// Create a pointer description.
    #[must_use]
    pub const fn new(id: PointerId, pointer_type: PointerType, is_primary: bool) -> Self {
        Self {
            id,
            pointer_type,
            is_primary,
        }
    }

    /// Primary touch contact.
    #[must_use]
    pub const fn touch(id: u32) -> Self {
        Self::new(PointerId(id), PointerType::Touch, true)
    }

    /// Non-primary touch contact.
    #[must_use]
    pub const fn secondary_touch(id: u32) -> Self {
        Self::new(PointerId(id), PointerType::Touch, false)
    }
}

/// Monotonic tick count attached to pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Create a timestamp from raw ticks.
    #[must_use]
    pub const fn new(ticks: u64) -> Self {
        Self(ticks)
    }

    /// Ticks elapsed since `earlier`, or `None` if time did not advance.
    #[must_use]
    pub const fn elapsed_since(&self, earlier: Self) -> Option<u64> {
        if self.0 > earlier.0 {
            Some(self.0 - earlier.0)
        } else {
            None
        }
    }
}

/// Position and time recorded for a tracked pointer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Sample {
    /// Target-local position
    pub position: Point,
    /// When the position was observed
    pub timestamp: Timestamp,
}

impl Sample {
    /// Create a sample.
    #[must_use]
    pub const fn new(position: Point, timestamp: Timestamp) -> Self {
        Self {
            position,
            timestamp,
        }
    }
}

/// Raw pointer input delivered by the host, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    /// Contact went down
    Pressed {
        /// Contact description
        pointer: Pointer,
        /// Target-local position
        position: Point,
        /// Event time
        timestamp: Timestamp,
    },
    /// Contact moved
    Moved {
        /// Contact identifier
        pointer: PointerId,
        /// Target-local position
        position: Point,
        /// Event time
        timestamp: Timestamp,
    },
    /// Contact lifted
    Released {
        /// Contact identifier
        pointer: PointerId,
    },
    /// Host revoked capture of the contact
    CaptureLost {
        /// Contact identifier
        pointer: PointerId,
    },
}

impl PointerEvent {
    /// Identifier of the contact this event concerns.
    #[must_use]
    pub const fn pointer_id(&self) -> PointerId {
        match self {
            Self::Pressed { pointer, .. } => pointer.id,
            Self::Moved { pointer, .. } | Self::Released { pointer } | Self::CaptureLost { pointer } => {
                *pointer
            }
        }
    }

    /// Timestamp, for events that carry one.
    #[must_use]
    pub const fn timestamp(&self) -> Option<Timestamp> {
        match self {
            Self::Pressed { timestamp, .. } | Self::Moved { timestamp, .. } => Some(*timestamp),
            Self::Released { .. } | Self::CaptureLost { .. } => None,
        }
    }
}

/// Kind of recognized gesture, used for routing subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    /// Pan gesture
    Pan,
    /// Pinch-to-zoom gesture
    Pinch,
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pan => write!(f, "Pan"),
            Self::Pinch => write!(f, "PinchToZoom"),
        }
    }
}

/// Pan update: displacement since gesture start and instantaneous velocity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanGestureEvent {
    /// Gesture this update belongs to
    pub gesture_id: GestureId,
    /// Current position minus anchor position
    pub delta: Vector,
    /// Displacement since previous sample per elapsed tick
    pub velocity: Vector,
}

/// Pinch update: scale and midpoint offset relative to the gesture baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PinchGestureEvent {
    /// Gesture this update belongs to
    pub gesture_id: GestureId,
    /// Current distance divided by initial distance
    pub scale: f64,
    /// Current midpoint minus initial midpoint
    pub offset: Vector,
    /// Mean velocity of both contacts, per second
    pub velocity: Vector,
}

/// Recognized gesture output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GestureEvent {
    /// Pan update
    Pan(PanGestureEvent),
    /// Pinch-to-zoom update
    Pinch(PinchGestureEvent),
}

impl GestureEvent {
    /// Gesture kind.
    #[must_use]
    pub const fn kind(&self) -> GestureKind {
        match self {
            Self::Pan(_) => GestureKind::Pan,
            Self::Pinch(_) => GestureKind::Pinch,
        }
    }

    /// Gesture identifier.
    #[must_use]
    pub const fn gesture_id(&self) -> GestureId {
        match self {
            Self::Pan(e) => e.gesture_id,
            Self::Pinch(e) => e.gesture_id,
        }
    }
}

impl From<PanGestureEvent> for GestureEvent {
    fn from(event: PanGestureEvent) -> Self {
        Self::Pan(event)
    }
}

impl From<PinchGestureEvent> for GestureEvent {
    fn from(event: PinchGestureEvent) -> Self {
        Self::Pinch(event)
    }
}

impl fmt::Display for GestureEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pan(e) => write!(
                f,
                "[Pan] GestureId='{}', Delta='{}', Velocity='{}'",
                e.gesture_id, e.delta, e.velocity
            ),
            Self::Pinch(e) => write!(
                f,
                "[PinchToZoom] GestureId='{}', Scale='{}', Offset='{}', Velocity='{}'",
                e.gesture_id, e.scale, e.offset, e.velocity
            ),
        }
    }
}
