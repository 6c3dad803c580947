use glam::{DVec2, dvec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default peak amplitude (pixels).
pub const DEFAULT_MAX_INTENSITY: f64 = 10.0;

// Accumulated tick fractions can land a hair under 1.0.
const DECAY_EPSILON: f64 = 1e-9;

/// Procedural screen shake.
///
/// `intensity` runs from 0 (just triggered) to 1 (fully decayed) in
/// simulated seconds. Jitter amplitude falls linearly from
/// `max_intensity * duration` to zero over that window.
#[derive(Clone, Debug)]
pub struct ShakeController {
    max_intensity: f64,
    intensity: f64,
    duration: f64,
    rng: StdRng,
}

impl ShakeController {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic jitter, for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: StdRng) -> Self {
        let mut shake = Self {
            max_intensity: DEFAULT_MAX_INTENSITY,
            intensity: 1.0,
            duration: 1.0,
            rng,
        };
        shake.set_intensity(DEFAULT_MAX_INTENSITY);
        shake
    }

    pub fn max_intensity(&self) -> f64 {
        self.max_intensity
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Restarts the decay curve.
    pub fn shake(&mut self) {
        self.intensity = 0.0;
    }

    /// 10.0 is very intense, 1.0 barely noticeable. Also scales the
    /// duration (`max / 10`).
    pub fn set_intensity(&mut self, max_intensity: f64) {
        self.max_intensity = max_intensity;
        self.duration = max_intensity / 10.0;
    }

    /// Advances the decay by `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        self.intensity = (self.intensity + dt).min(1.0);
    }

    pub fn is_active(&self) -> bool {
        self.intensity < 1.0 - DECAY_EPSILON
    }

    /// Peak jitter for the next frame.
    pub fn amplitude(&self) -> f64 {
        if !self.is_active() {
            return 0.0;
        }
        self.max_intensity * lerp(self.duration, 0.0, self.intensity)
    }

    /// Per-axis jitter, resampled on every call. Zero once decayed.
    pub fn sample_jitter(&mut self) -> DVec2 {
        let amplitude = self.amplitude();
        if amplitude == 0.0 {
            return DVec2::ZERO;
        }
        dvec2(
            amplitude * self.rng.gen_range(-1.0..=1.0),
            amplitude * self.rng.gen_range(-1.0..=1.0),
        )
    }
}

impl Default for ShakeController {
    fn default() -> Self {
        Self::new()
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
