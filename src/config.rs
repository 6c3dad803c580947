// ── ScreenOptions ─────────────────────────────────────────────────────────────

/// Border added around the world in auto-padding mode, in pixels.
pub const AUTO_PADDING: f64 = 20.0;

/// Compositor settings that are not part of the construction contract.
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenOptions {
    /// Rescale the final blit when the target is not the configured view size.
    pub auto_scaling: bool,
    /// Draw viewport / camera overlays and frame stats.
    pub debug: bool,
    /// Border used when view size equals world size and no viewport is given.
    pub padding: f64,
    /// Initial peak shake amplitude (see `ShakeController::set_intensity`).
    pub shake_max_intensity: f64,
    /// Seed for the shake jitter. `None` seeds from entropy.
    pub shake_seed: Option<u64>,
}

impl Default for ScreenOptions {
    fn default() -> Self {
        Self {
            auto_scaling: true,
            debug: false,
            padding: AUTO_PADDING,
            shake_max_intensity: crate::shake::DEFAULT_MAX_INTENSITY,
            shake_seed: None,
        }
    }
}

// ── ControlConfig ─────────────────────────────────────────────────────────────

/// Per-action speeds used when turning held keys into control deltas.
///
/// Pan speeds are in world pixels per second and get multiplied by the
/// frame's `dt`. Zoom and rotation are discrete steps per tick.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlConfig {
    pub pan_speed: f64,
    pub camera_speed: f64,
    pub zoom_step: i32,
    pub rotate_step: i32,
    /// Zoom steps per unit of mouse wheel.
    pub wheel_zoom_step: f64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        // 1px and 4px per tick at 60 Hz.
        Self {
            pan_speed: 60.0,
            camera_speed: 240.0,
            zoom_step: 1,
            rotate_step: 1,
            wheel_zoom_step: 10.0,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
