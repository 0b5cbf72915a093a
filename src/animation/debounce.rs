/// Trailing-edge debounce timer advanced by the host frame clock.
///
/// Each owner keeps its own timer; nothing is shared between instances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebounceTimer {
    delay_ms: f64,
    remaining_ms: Option<f64>,
}

impl DebounceTimer {
    #[must_use]
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms: delay_ms.max(0.0),
            remaining_ms: None,
        }
    }

    #[must_use]
    pub fn delay_ms(self) -> f64 {
        self.delay_ms
    }

    #[must_use]
    pub fn is_pending(self) -> bool {
        self.remaining_ms.is_some()
    }

    /// (Re)starts the quiet period.
    pub fn arm(&mut self) {
        self.remaining_ms = Some(self.delay_ms);
    }

    pub fn cancel(&mut self) {
        self.remaining_ms = None;
    }

    /// Advances the timer. Returns `true` exactly once when the quiet period elapses.
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        let Some(remaining) = self.remaining_ms else {
            return false;
        };
        let remaining = remaining - dt_ms.max(0.0);
        if remaining <= 0.0 {
            self.remaining_ms = None;
            return true;
        }
        self.remaining_ms = Some(remaining);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::DebounceTimer;

    #[test]
    fn rearming_extends_the_quiet_period() {
        let mut timer = DebounceTimer::new(100.0);
        timer.arm();
        assert!(!timer.tick(60.0));
        timer.arm();
        assert!(!timer.tick(60.0));
        assert!(timer.tick(40.0));
        assert!(!timer.tick(500.0));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timer = DebounceTimer::new(50.0);
        timer.arm();
        timer.cancel();
        assert!(!timer.is_pending());
        assert!(!timer.tick(100.0));
    }
}
