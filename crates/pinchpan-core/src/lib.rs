//! Pan and pinch-to-zoom gesture recognition for raw pointer streams.
//!
//! This crate turns pointer press/move/release/capture-lost callbacks into
//! gesture events:
//! - Recognizers: [`PanGestureRecognizer`], [`PinchToZoomGestureRecognizer`]
//!   behind the [`GestureRecognizer`] contract
//! - Output: [`GestureEvent`] carrying a process-wide [`GestureId`]
//! - Hosting: [`RecognizerSet`] with pointer capture via [`CaptureRegistry`],
//!   and bubbling delivery through an [`EventRouter`]
//! - Consumption: [`GestureConsumer`] folding events into a [`Transform2D`]
//!
//! # Example
//!
//! ```
//! use pinchpan_core::{
//!     GestureEvent, NodeId, PanGestureRecognizer, Point, Pointer, PointerEvent, PointerId,
//!     RecognizerSet, Timestamp,
//! };
//!
//! let mut set = RecognizerSet::new(NodeId(0));
//! set.add(PanGestureRecognizer::default());
//!
//! set.process(&PointerEvent::Pressed {
//!     pointer: Pointer::touch(1),
//!     position: Point::new(0.0, 0.0),
//!     timestamp: Timestamp(0),
//! });
//! let out = set.process(&PointerEvent::Moved {
//!     pointer: PointerId(1),
//!     position: Point::new(10.0, 0.0),
//!     timestamp: Timestamp(100),
//! });
//! assert!(matches!(out.as_slice(), [GestureEvent::Pan(_)]));
//! ```

mod capture;
mod collection;
mod config;
mod consumer;
mod error;
mod event;
mod geometry;
mod gesture_id;
mod pan;
mod pinch;
mod recognizer;
mod routing;
mod transform;

pub use capture::{CaptureDispatcher, CaptureRegistry, RecognizerId};
pub use collection::RecognizerSet;
pub use config::{GestureConfig, PanConfig, PanSettings, PinchSettings};
pub use consumer::GestureConsumer;
pub use error::ConfigError;
pub use event::{
    GestureEvent, GestureKind, PanGestureEvent, PinchGestureEvent, Pointer, PointerEvent,
    PointerId, PointerType, Sample, Timestamp, TICKS_PER_SECOND,
};
pub use geometry::{Point, Vector};
pub use gesture_id::GestureId;
pub use pan::PanGestureRecognizer;
pub use pinch::PinchToZoomGestureRecognizer;
pub use recognizer::GestureRecognizer;
pub use routing::{EventRouter, GestureHandler, NodeId, RouteOutcome, RoutedGesture};
pub use transform::Transform2D;

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // GEOMETRY TESTS
    // ==========================================================================

    mod geometry_tests {
        use super::*;
        use proptest::prelude::*;

        #[test]
        fn test_point_distance() {
            let a = Point::new(0.0, 0.0);
            let b = Point::new(3.0, 4.0);
            assert_eq!(a.distance(&b), 5.0);
            assert_eq!(b.distance(&a), 5.0);
        }

        #[test]
        fn test_point_distance_large_coordinates() {
            let a = Point::new(-1e200, 0.0);
            let b = Point::new(0.0, 1e200);
            let d = a.distance(&b);
            assert!(d.is_finite());
            assert!((d / 1e200 - std::f64::consts::SQRT_2).abs() < 1e-12);
        }

        #[test]
        fn test_point_midpoint() {
            let m = Point::new(-10.0, 2.0).midpoint(&Point::new(10.0, 4.0));
            assert_eq!(m, Point::new(0.0, 3.0));
        }

        #[test]
        fn test_point_difference_is_vector() {
            let v = Point::new(5.0, 1.0) - Point::new(2.0, 3.0);
            assert_eq!(v, Vector::new(3.0, -2.0));
            assert_eq!(Point::new(2.0, 3.0) + v, Point::new(5.0, 1.0));
        }

        #[test]
        fn test_vector_arithmetic() {
            let v = Vector::new(2.0, -4.0);
            assert_eq!(v * 0.5, Vector::new(1.0, -2.0));
            assert_eq!(v / 2.0, Vector::new(1.0, -2.0));
            assert_eq!(-v, Vector::new(-2.0, 4.0));
            assert_eq!(v + v - v, v);

            let mut acc = Vector::ZERO;
            acc += v;
            assert_eq!(acc, v);
        }

        #[test]
        fn test_vector_finiteness() {
            assert!(Vector::ZERO.is_finite());
            assert!(!Vector::new(f64::NAN, 0.0).is_finite());
            assert!(!Vector::new(0.0, f64::INFINITY).is_finite());
        }

        #[test]
        fn test_display_matches_print_format() {
            assert_eq!(Point::new(1.5, -2.0).to_string(), "1.5, -2");
            assert_eq!(Vector::new(0.1, 0.0).to_string(), "0.1, 0");
        }

        proptest! {
            #[test]
            fn prop_distance_symmetric(
                x1 in -1000.0f64..1000.0, y1 in -1000.0f64..1000.0,
                x2 in -1000.0f64..1000.0, y2 in -1000.0f64..1000.0
            ) {
                let a = Point::new(x1, y1);
                let b = Point::new(x2, y2);
                prop_assert!((a.distance(&b) - b.distance(&a)).abs() < 1e-9);
                prop_assert!(a.distance(&b) >= 0.0);
            }

            #[test]
            fn prop_midpoint_equidistant(
                x1 in -1000.0f64..1000.0, y1 in -1000.0f64..1000.0,
                x2 in -1000.0f64..1000.0, y2 in -1000.0f64..1000.0
            ) {
                let a = Point::new(x1, y1);
                let b = Point::new(x2, y2);
                let m = a.midpoint(&b);
                prop_assert!((m.distance(&a) - m.distance(&b)).abs() < 1e-6);
            }
        }
    }

    // ==========================================================================
    // END-TO-END TESTS
    // ==========================================================================

    mod pipeline_tests {
        use super::*;
        use std::sync::{Arc, Mutex};

        #[test]
        fn test_recognized_pinch_drives_consumer_through_router() {
            let mut router = EventRouter::new();
            let root = router.add_root();
            let canvas = router.add_child(root).expect("root exists");

            let consumer = Arc::new(Mutex::new(GestureConsumer::new()));
            for kind in [GestureKind::Pan, GestureKind::Pinch] {
                let sink = Arc::clone(&consumer);
                router.subscribe(root, kind, move |routed| {
                    sink.lock().expect("consumer lock poisoned").apply(&routed.event);
                });
            }

            let mut set = RecognizerSet::new(canvas);
            set.add(PinchToZoomGestureRecognizer::default());

            let events = [
                PointerEvent::Pressed {
                    pointer: Pointer::touch(1),
                    position: Point::new(0.0, 0.0),
                    timestamp: Timestamp(0),
                },
                PointerEvent::Pressed {
                    pointer: Pointer::secondary_touch(2),
                    position: Point::new(10.0, 0.0),
                    timestamp: Timestamp(0),
                },
                PointerEvent::Moved {
                    pointer: PointerId(1),
                    position: Point::new(-10.0, 0.0),
                    timestamp: Timestamp(100),
                },
            ];
            for event in &events {
                for gesture in set.process(event) {
                    let outcome = router.raise(set.target(), gesture);
                    assert_eq!(outcome.delivered, 1);
                }
            }

            let transform = consumer.lock().expect("consumer lock poisoned").transform();
            assert_eq!(transform.matrix, [2.0, 0.0, 0.0, 2.0, -5.0, 0.0]);
        }
    }
}
