//! Monotonic seconds for frame timing. `std::time::Instant` panics on wasm.

#[cfg(not(target_arch = "wasm32"))]
pub fn now_seconds() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64()
}

#[cfg(target_arch = "wasm32")]
pub fn now_seconds() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|performance| performance.now() / 1000.0)
        .unwrap_or(0.0)
}

/// Measures the time between successive frames.
#[derive(Debug, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call; zero on the first.
    pub fn delta(&mut self) -> f32 {
        let now = now_seconds();
        let delta = self.last.map_or(0.0, |last| now - last);
        self.last = Some(now);
        delta.max(0.0) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_delta_is_zero_and_time_moves_forward() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(), 0.0);
        assert!(clock.delta() >= 0.0);
        assert!(now_seconds() >= 0.0);
    }
}
