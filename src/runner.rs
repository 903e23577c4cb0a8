//! Frame drivers with an explicit lifecycle.
//!
//! [`Runner`] decides how many fixed physics steps a frame owes and
//! [`Ticker`] gates the per-frame render callbacks. Both are advanced by
//! the caller with the elapsed wall time, so tests can drive them one
//! frame at a time.

/// Longest frame the runner will try to catch up on.
const MAX_FRAME_TIME: f32 = 0.25;
/// Upper bound on physics steps per frame.
const MAX_STEPS_PER_FRAME: u32 = 5;

/// Fixed-timestep accumulator for the physics world.
#[derive(Debug, Clone)]
pub struct Runner {
    timestep: f32,
    accumulator: f32,
    running: bool,
}

impl Runner {
    pub fn new(timestep: f32) -> Self {
        Self {
            timestep,
            accumulator: 0.0,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop stepping and drop any time owed.
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of fixed steps to run for `elapsed` seconds of wall time.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        if !self.running || !(elapsed > 0.0) {
            return 0;
        }
        self.accumulator += elapsed.min(MAX_FRAME_TIME);

        let mut steps = 0;
        while self.accumulator >= self.timestep && steps < MAX_STEPS_PER_FRAME {
            self.accumulator -= self.timestep;
            steps += 1;
        }
        if steps == MAX_STEPS_PER_FRAME {
            // Falling behind; don't let the debt snowball.
            self.accumulator = self.accumulator.min(self.timestep);
        }
        steps
    }
}

/// Render frame driver.
#[derive(Debug, Clone, Default)]
pub struct Ticker {
    started: bool,
    frames: u64,
    elapsed: f64,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.started = true;
    }

    pub fn stop(&mut self) {
        self.started = false;
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Count a frame. Returns whether frame callbacks should run.
    pub fn tick(&mut self, elapsed: f32) -> bool {
        if !self.started {
            return false;
        }
        self.frames += 1;
        self.elapsed += f64::from(elapsed.max(0.0));
        true
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Seconds of frame time seen while started.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}
