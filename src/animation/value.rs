use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use super::timing::{TimingConfig, Tween};

/// Callback invoked with the new value every time an [`AnimatedValue`] changes.
pub type ValueListener = Rc<dyn Fn(f64)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Outcome of advancing an [`AnimatedValue`] by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueTick {
    /// No tween was in flight.
    Idle,
    Running,
    /// The tween reached its target during this frame.
    Finished,
}

/// A numeric value that can be tweened towards a target and observed.
///
/// Starting a new tween supersedes the one in flight; the superseded tween never
/// reports `Finished`.
pub struct AnimatedValue {
    value: f64,
    tween: Option<Tween>,
    listeners: IndexMap<ListenerId, ValueListener>,
    next_listener_id: u64,
}

impl AnimatedValue {
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            value,
            tween: None,
            listeners: IndexMap::new(),
            next_listener_id: 0,
        }
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Target of the tween in flight, if any.
    #[must_use]
    pub fn target(&self) -> Option<f64> {
        self.tween.map(|tween| tween.target())
    }

    /// Jumps to `value`, cancelling any tween in flight.
    pub fn set_value(&mut self, value: f64) {
        self.tween = None;
        self.value = value;
        self.notify();
    }

    /// Starts a tween from the current value to `target`.
    ///
    /// Zero-length timings apply the target immediately.
    pub fn animate_to(&mut self, target: f64, timing: TimingConfig) {
        let tween = Tween::new(self.value, target, timing);
        if tween.is_finished() {
            self.set_value(target);
            return;
        }
        self.tween = Some(tween);
    }

    /// Freezes the value where it is. Returns `true` when a tween was cancelled.
    pub fn stop(&mut self) -> bool {
        self.tween.take().is_some()
    }

    pub fn tick(&mut self, dt_ms: f64) -> ValueTick {
        let Some(tween) = self.tween.as_mut() else {
            return ValueTick::Idle;
        };

        self.value = tween.step(dt_ms);
        let finished = tween.is_finished();
        if finished {
            self.tween = None;
        }
        self.notify();

        if finished {
            ValueTick::Finished
        } else {
            ValueTick::Running
        }
    }

    pub fn add_listener(&mut self, listener: ValueListener) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id = self.next_listener_id.wrapping_add(1);
        self.listeners.insert(id, listener);
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.shift_remove(&id).is_some()
    }

    pub fn remove_all_listeners(&mut self) {
        self.listeners.clear();
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&self) {
        for listener in self.listeners.values() {
            listener(self.value);
        }
    }
}

impl Default for AnimatedValue {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl fmt::Debug for AnimatedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimatedValue")
            .field("value", &self.value)
            .field("tween", &self.tween)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
