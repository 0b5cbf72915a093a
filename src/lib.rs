//! sparkline-rs: headless sparkline scrubbing and rolling-number animation core.
//!
//! The crate owns gesture state, coordinate clamping, interruptible animations,
//! path morphing and odometer-style digits. Drawing is left to the host, which
//! reads frames back and advances time through explicit `tick` calls.

pub mod animation;
pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod path;
pub mod rolling;
pub mod telemetry;

pub use api::{ScrubController, ScrubHost, SparklineConfig};
pub use error::{SparklineError, SparklineResult};
