use std::sync::atomic::{AtomicBool, AtomicU8, AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Marker position used while no gesture owns the marker.
pub const MARKER_OFFSCREEN: f64 = -1.0;

/// Lock-free `f64` cell stored as raw bits.
#[derive(Debug)]
pub struct AtomicF64(AtomicU64);

impl AtomicF64 {
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self(AtomicU64::new(value.to_bits()))
    }

    #[must_use]
    pub fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Acquire))
    }

    pub fn store(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Release);
    }
}

/// Drag lifecycle of a scrub gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureState {
    Idle,
    Engaged,
    Scrubbing,
    Released,
}

impl GestureState {
    const fn to_u8(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Engaged => 1,
            Self::Scrubbing => 2,
            Self::Released => 3,
        }
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Engaged,
            2 => Self::Scrubbing,
            3 => Self::Released,
            _ => Self::Idle,
        }
    }
}

/// Pixel geometry the gesture worklet clamps marker positions into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrubGeometry {
    pub element_width: f64,
    pub container_width: f64,
    pub gutter: f64,
}

impl ScrubGeometry {
    #[must_use]
    pub fn new(element_width: f64, container_width: f64, gutter: f64) -> Self {
        Self {
            element_width,
            container_width,
            gutter,
        }
    }
}

/// State shared between the gesture thread and the main thread.
///
/// The gesture worklet is the only writer of the marker cell and of the
/// gesture state while a gesture is live. The main thread writes geometry and
/// the enabled flag, and performs the single `Released -> Idle` reset once the
/// exit animation settles. An idle state reads as an off-canvas marker, so the
/// reset never touches the marker cell.
#[derive(Debug)]
pub struct SharedScrubState {
    marker_x: AtomicF64,
    state: AtomicU8,
    enabled: AtomicBool,
    element_width: AtomicF64,
    container_width: AtomicF64,
    gutter: AtomicF64,
}

impl SharedScrubState {
    #[must_use]
    pub fn new(geometry: ScrubGeometry) -> Self {
        Self {
            marker_x: AtomicF64::new(MARKER_OFFSCREEN),
            state: AtomicU8::new(GestureState::Idle.to_u8()),
            enabled: AtomicBool::new(true),
            element_width: AtomicF64::new(geometry.element_width),
            container_width: AtomicF64::new(geometry.container_width),
            gutter: AtomicF64::new(geometry.gutter),
        }
    }

    /// Marker translation, [`MARKER_OFFSCREEN`] while no gesture owns it.
    #[must_use]
    pub fn marker_x(&self) -> f64 {
        if self.gesture_state() == GestureState::Idle {
            return MARKER_OFFSCREEN;
        }
        self.marker_x.load()
    }

    pub(crate) fn set_marker_x(&self, x: f64) {
        self.marker_x.store(x);
    }

    #[must_use]
    pub fn gesture_state(&self) -> GestureState {
        GestureState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub(crate) fn set_gesture_state(&self, state: GestureState) {
        self.state.store(state.to_u8(), Ordering::Release);
    }

    /// Moves a released gesture back to idle, which parks the marker off-canvas.
    ///
    /// Does nothing when a new gesture already took over. The marker cell itself
    /// is only ever written by the gesture worklet.
    pub(crate) fn settle_released(&self) -> bool {
        self.state
            .compare_exchange(
                GestureState::Released.to_u8(),
                GestureState::Idle.to_u8(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    pub(crate) fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }

    #[must_use]
    pub fn geometry(&self) -> ScrubGeometry {
        ScrubGeometry {
            element_width: self.element_width.load(),
            container_width: self.container_width.load(),
            gutter: self.gutter.load(),
        }
    }

    pub(crate) fn set_geometry(&self, geometry: ScrubGeometry) {
        self.element_width.store(geometry.element_width);
        self.container_width.store(geometry.container_width);
        self.gutter.store(geometry.gutter);
    }
}
