use crate::time::EffectTime;

/// Leading-edge rate limiter for high-frequency input streams.
///
/// The first call passes and starts the window; calls inside the window are
/// dropped, not deferred. A zero interval disables limiting entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct Throttle {
    last: Option<EffectTime>,
}

impl Throttle {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Returns true when the event should be processed and consumes the slot.
    pub fn ready(&mut self, now: EffectTime, interval: EffectTime) -> bool {
        if interval == EffectTime::zero() {
            return true;
        }
        match self.last {
            Some(last) if now.sub(last) < interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Forget the window so the next event passes regardless of timing.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> EffectTime {
        EffectTime::from_nanos(value * 1_000_000)
    }

    #[test]
    fn leading_edge_drops_inside_window() {
        let mut throttle = Throttle::new();
        assert!(throttle.ready(ms(0), ms(16)));
        assert!(!throttle.ready(ms(10), ms(16)));
        assert!(!throttle.ready(ms(15), ms(16)));
        assert!(throttle.ready(ms(16), ms(16)));
    }

    #[test]
    fn zero_interval_always_ready() {
        let mut throttle = Throttle::new();
        assert!(throttle.ready(ms(0), EffectTime::zero()));
        assert!(throttle.ready(ms(0), EffectTime::zero()));
    }

    #[test]
    fn reset_reopens_window() {
        let mut throttle = Throttle::new();
        assert!(throttle.ready(ms(0), ms(16)));
        assert!(!throttle.ready(ms(5), ms(16)));
        throttle.reset();
        assert!(throttle.ready(ms(6), ms(16)));
    }
}
