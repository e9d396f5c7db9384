//! YAML pointer traces.
//!
//! A trace is an ordered list of raw pointer events plus the recognizer
//! configuration to replay them with:
//!
//! ```yaml
//! description: two-finger spread
//! config:
//!   pinch:
//!     zoomable: true
//! events:
//!   - { action: press, pointer: 1, primary: true, x: 0, y: 0, t: 0 }
//!   - { action: press, pointer: 2, x: 10, y: 0, t: 0 }
//!   - { action: move, pointer: 1, x: -10, y: 0, t: 100 }
//!   - { action: release, pointer: 1 }
//! ```

use crate::error::TraceError;
use pinchpan_core::{
    GestureConfig, Point, Pointer, PointerEvent, PointerId, PointerType, Timestamp,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

/// What happened to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Contact went down
    Press,
    /// Contact moved
    Move,
    /// Contact lifted
    Release,
    /// Host revoked capture
    CaptureLost,
}

impl Action {
    /// Name as written in a trace.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Press => "press",
            Self::Move => "move",
            Self::Release => "release",
            Self::CaptureLost => "capture_lost",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Event action
    pub action: Action,
    /// Pointer id
    pub pointer: u32,
    /// Device kind, only read on press
    #[serde(rename = "type", default)]
    pub pointer_type: PointerType,
    /// OS-primary flag, only read on press
    #[serde(default)]
    pub primary: bool,
    /// X coordinate
    #[serde(default)]
    pub x: f64,
    /// Y coordinate
    #[serde(default)]
    pub y: f64,
    /// Timestamp in ticks; required for press and move
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<u64>,
}

impl TraceEvent {
    /// Convert to the recognizer input form.
    ///
    /// A press or move without a timestamp is treated as happening at tick 0;
    /// [`Trace::validate`] rejects such traces.
    pub fn to_pointer_event(&self) -> PointerEvent {
        let id = PointerId(self.pointer);
        let position = Point::new(self.x, self.y);
        let timestamp = Timestamp(self.t.unwrap_or_default());
        match self.action {
            Action::Press => PointerEvent::Pressed {
                pointer: Pointer::new(id, self.pointer_type, self.primary),
                position,
                timestamp,
            },
            Action::Move => PointerEvent::Moved {
                pointer: id,
                position,
                timestamp,
            },
            Action::Release => PointerEvent::Released { pointer: id },
            Action::CaptureLost => PointerEvent::CaptureLost { pointer: id },
        }
    }
}

/// A recorded pointer session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Trace {
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Recognizer configuration
    #[serde(default)]
    pub config: GestureConfig,
    /// Events in arrival order
    #[serde(default)]
    pub events: Vec<TraceEvent>,
}

/// Facts about a valid trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TraceSummary {
    /// Number of events
    pub events: usize,
    /// Distinct pointers pressed
    pub pointers: usize,
    /// Ticks between the first and last timestamp
    pub duration: u64,
}

impl fmt::Display for TraceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} events, {} pointers, {} ticks",
            self.events, self.pointers, self.duration
        )
    }
}

impl Trace {
    /// Parse a trace from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn from_yaml(yaml: &str) -> Result<Self, TraceError> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Read and parse a trace file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Serialize the trace to a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, TraceError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Events converted to recognizer input.
    pub fn pointer_events(&self) -> impl Iterator<Item = PointerEvent> + '_ {
        self.events.iter().map(TraceEvent::to_pointer_event)
    }

    /// Check ordering and pointer bookkeeping.
    ///
    /// Timestamps must never decrease, presses and moves must carry one, and
    /// every non-press event must name a pointer pressed earlier in the trace.
    /// Moves after a release are allowed; recognizers ignore them.
    pub fn validate(&self) -> Result<TraceSummary, TraceError> {
        let mut pressed = BTreeSet::new();
        let mut first = None;
        let mut previous: Option<u64> = None;

        for (index, event) in self.events.iter().enumerate() {
            if !(event.x.is_finite() && event.y.is_finite()) {
                return Err(TraceError::NonFinite { index });
            }

            match (event.action, event.t) {
                (Action::Press | Action::Move, None) => {
                    return Err(TraceError::MissingTimestamp {
                        index,
                        action: event.action.as_str(),
                    });
                }
                (_, Some(t)) => {
                    if let Some(previous) = previous.filter(|p| t < *p) {
                        return Err(TraceError::OutOfOrder { index, t, previous });
                    }
                    first.get_or_insert(t);
                    previous = Some(t);
                }
                (Action::Release | Action::CaptureLost, None) => {}
            }

            if event.action == Action::Press {
                pressed.insert(event.pointer);
            } else if !pressed.contains(&event.pointer) {
                return Err(TraceError::UnknownPointer {
                    index,
                    pointer: event.pointer,
                });
            }
        }

        Ok(TraceSummary {
            events: self.events.len(),
            pointers: pressed.len(),
            duration: previous.zip(first).map_or(0, |(last, first)| last - first),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SPREAD_YAML: &str = r"
description: two-finger spread
config:
  pan:
    required_pointers: 3
    primary_only: false
  pinch:
    zoomable: true
events:
  - { action: press, pointer: 1, primary: true, x: 0, y: 0, t: 0 }
  - { action: press, pointer: 2, x: 10, y: 0, t: 0 }
  - { action: move, pointer: 1, x: -10, y: 0, t: 100 }
  - { action: release, pointer: 1 }
  - { action: capture_lost, pointer: 2 }
";

    fn event(action: Action, pointer: u32, t: Option<u64>) -> TraceEvent {
        TraceEvent {
            action,
            pointer,
            pointer_type: PointerType::Touch,
            primary: false,
            x: 0.0,
            y: 0.0,
            t,
        }
    }

    #[test]
    fn test_parse_trace() {
        let trace = Trace::from_yaml(SPREAD_YAML).unwrap();
        assert_eq!(trace.description, "two-finger spread");
        assert_eq!(trace.config.pan.required_pointers, 3);
        assert!(!trace.config.pan.primary_only);
        assert_eq!(trace.events.len(), 5);
        assert_eq!(trace.events[4].action, Action::CaptureLost);
    }

    #[test]
    fn test_event_defaults() {
        let trace = Trace::from_yaml("events:\n  - { action: press, pointer: 4, t: 1 }\n").unwrap();
        let e = trace.events[0];
        assert_eq!(e.pointer_type, PointerType::Touch);
        assert!(!e.primary);
        assert_eq!((e.x, e.y), (0.0, 0.0));
        assert_eq!(trace.config, GestureConfig::default());
    }

    #[test]
    fn test_pointer_type_parsed() {
        let trace =
            Trace::from_yaml("events:\n  - { action: press, pointer: 1, type: mouse, t: 0 }\n")
                .unwrap();
        assert_eq!(trace.events[0].pointer_type, PointerType::Mouse);
    }

    #[test]
    fn test_unknown_action_rejected() {
        let result = Trace::from_yaml("events:\n  - { action: hover, pointer: 1, t: 0 }\n");
        assert!(matches!(result, Err(TraceError::Yaml(_))));
    }

    #[test]
    fn test_to_pointer_event() {
        let trace = Trace::from_yaml(SPREAD_YAML).unwrap();
        let events: Vec<PointerEvent> = trace.pointer_events().collect();
        assert_eq!(
            events[0],
            PointerEvent::Pressed {
                pointer: Pointer::touch(1),
                position: Point::new(0.0, 0.0),
                timestamp: Timestamp(0),
            }
        );
        assert_eq!(
            events[2],
            PointerEvent::Moved {
                pointer: PointerId(1),
                position: Point::new(-10.0, 0.0),
                timestamp: Timestamp(100),
            }
        );
        assert_eq!(
            events[3],
            PointerEvent::Released {
                pointer: PointerId(1)
            }
        );
    }

    #[test]
    fn test_validate_summary() {
        let summary = Trace::from_yaml(SPREAD_YAML).unwrap().validate().unwrap();
        assert_eq!(
            summary,
            TraceSummary {
                events: 5,
                pointers: 2,
                duration: 100,
            }
        );
        assert_eq!(summary.to_string(), "5 events, 2 pointers, 100 ticks");
    }

    #[test]
    fn test_validate_empty() {
        let summary = Trace::default().validate().unwrap();
        assert_eq!(summary.events, 0);
        assert_eq!(summary.duration, 0);
    }

    #[test]
    fn test_validate_rejects_decreasing_time() {
        let trace = Trace {
            events: vec![
                event(Action::Press, 1, Some(10)),
                event(Action::Move, 1, Some(5)),
            ],
            ..Trace::default()
        };
        assert!(matches!(
            trace.validate(),
            Err(TraceError::OutOfOrder {
                index: 1,
                t: 5,
                previous: 10
            })
        ));
    }

    #[test]
    fn test_validate_rejects_unpressed_pointer() {
        let trace = Trace {
            events: vec![
                event(Action::Press, 1, Some(0)),
                event(Action::Move, 2, Some(1)),
            ],
            ..Trace::default()
        };
        assert!(matches!(
            trace.validate(),
            Err(TraceError::UnknownPointer {
                index: 1,
                pointer: 2
            })
        ));
    }

    #[test]
    fn test_validate_allows_move_after_release() {
        let trace = Trace {
            events: vec![
                event(Action::Press, 1, Some(0)),
                event(Action::Release, 1, None),
                event(Action::Move, 1, Some(3)),
            ],
            ..Trace::default()
        };
        assert!(trace.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_move_timestamp() {
        let trace = Trace {
            events: vec![event(Action::Press, 1, Some(0)), event(Action::Move, 1, None)],
            ..Trace::default()
        };
        assert!(matches!(
            trace.validate(),
            Err(TraceError::MissingTimestamp {
                index: 1,
                action: "move"
            })
        ));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let mut bad = event(Action::Press, 1, Some(0));
        bad.x = f64::NAN;
        let trace = Trace {
            events: vec![bad],
            ..Trace::default()
        };
        assert!(matches!(trace.validate(), Err(TraceError::NonFinite { index: 0 })));
    }

    #[test]
    fn test_roundtrip() {
        let trace = Trace::from_yaml(SPREAD_YAML).unwrap();
        let yaml = trace.to_yaml().unwrap();
        let trace2 = Trace::from_yaml(&yaml).unwrap();
        assert_eq!(trace, trace2);
    }
}
