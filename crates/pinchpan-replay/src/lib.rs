//! YAML pointer traces for pinchpan, and a replayer that runs them through
//! the pan and pinch recognizers.
//!
//! ```
//! use pinchpan_replay::{Replayer, Trace};
//!
//! let trace = Trace::from_yaml(
//!     "events:\n  - { action: press, pointer: 1, primary: true, x: 0, y: 0, t: 0 }\n  - { action: move, pointer: 1, x: 4, y: 0, t: 10 }\n",
//! )
//! .expect("valid trace");
//! let report = Replayer::for_trace(&trace).replay(&trace).expect("replays");
//! assert_eq!(report.pan_gestures, 1);
//! ```

mod error;
mod replay;
mod trace;

pub use error::TraceError;
pub use replay::{ReplayReport, Replayer};
pub use trace::{Action, Trace, TraceEvent, TraceSummary};
