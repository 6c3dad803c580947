pub mod camera;
pub mod config;
pub mod error;
pub mod input;
pub mod overlay;
pub mod renderer;
pub mod screen;
pub mod shake;
pub mod transform;
pub mod viewport;

pub use camera::{Camera, CameraMode, FocusTarget};
pub use config::{ControlConfig, ScreenOptions};
pub use error::ConfigError;
pub use input::{ControlDeltas, InputSource, InputState};
pub use overlay::Overlay;
pub use renderer::{RasterRenderer, Recorder, Renderer};
pub use screen::Screen;
pub use shake::ShakeController;
pub use transform::Transform2D;
pub use viewport::Viewport;

/// Length of one simulation tick at the reference 60 Hz rate, in seconds.
pub const FIXED_TIMESTEP: f64 = 1.0 / 60.0;

/// Simple RGBA color
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const WHITE: Color = Color([1.0, 1.0, 1.0, 1.0]);
    pub const BLACK: Color = Color([0.0, 0.0, 0.0, 1.0]);
    pub const RED: Color = Color([1.0, 0.0, 0.0, 1.0]);
    pub const GREEN: Color = Color([0.0, 1.0, 0.0, 1.0]);
    pub const BLUE: Color = Color([0.0, 0.0, 1.0, 1.0]);
    pub const TRANSPARENT: Color = Color([0.0, 0.0, 0.0, 0.0]);

    pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color([
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ])
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        self.0.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

/// Rectangle in world or screen pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn min(&self) -> glam::DVec2 {
        glam::dvec2(self.x, self.y)
    }

    pub fn max(&self) -> glam::DVec2 {
        glam::dvec2(self.x + self.w, self.y + self.h)
    }

    pub fn translated(&self, offset: glam::DVec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }
}
