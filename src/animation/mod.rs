//! Frame-clock driven animation primitives.
//!
//! Nothing here owns a timer or a thread: hosts advance every animated value
//! with `tick(dt_ms)` from their render loop.

pub mod debounce;
pub mod driver;
pub mod easing;
pub mod timing;
pub mod value;

pub use debounce::DebounceTimer;
pub use driver::{
    AnimationSequence, DriverTick, InterruptibleAnimation, PROGRESS_TRACK, SequenceStep,
};
pub use easing::Easing;
pub use timing::{MotionCurve, MotionDuration, TimingConfig, Tween};
pub use value::{AnimatedValue, ListenerId, ValueListener, ValueTick};
