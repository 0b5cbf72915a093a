//! Scrub gesture handling split across the gesture and main threads.

pub mod dispatch;
pub mod gesture;
pub mod shared;

pub use dispatch::{MainThreadReceiver, MainThreadSender, ScrubMessage, main_thread_channel};
pub use gesture::ScrubGesture;
pub use shared::{AtomicF64, GestureState, MARKER_OFFSCREEN, ScrubGeometry, SharedScrubState};
