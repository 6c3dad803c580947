use crate::config::ControlConfig;
use glam::{DVec2, dvec2};
use std::collections::HashSet;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseScrollDelta};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Movement requested for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlDeltas {
    /// Viewport pan in world pixels.
    pub pan: DVec2,
    /// Zoom factor steps.
    pub zoom: i32,
    /// Rotation in degrees.
    pub rotation: i32,
    /// Raw camera pan in world pixels.
    pub camera_pan: DVec2,
    pub reset: bool,
    pub shake: bool,
}

impl ControlDeltas {
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// Anything that can produce per-tick control deltas.
pub trait InputSource {
    /// Deltas for a tick lasting `dt` seconds.
    fn control_deltas(&self, dt: f64) -> ControlDeltas;
}

/// Keyboard keys supported by the input system.
///
/// Uses physical key codes (layout-independent).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    W,
    A,
    S,
    D,
    Q,
    E,
    R,
    Z,
    I,
    J,
    K,
    L,
    Space,
}

impl Key {
    fn from_keycode(code: KeyCode) -> Option<Self> {
        Some(match code {
            KeyCode::ArrowLeft => Key::Left,
            KeyCode::ArrowRight => Key::Right,
            KeyCode::ArrowUp => Key::Up,
            KeyCode::ArrowDown => Key::Down,
            KeyCode::KeyW => Key::W,
            KeyCode::KeyA => Key::A,
            KeyCode::KeyS => Key::S,
            KeyCode::KeyD => Key::D,
            KeyCode::KeyQ => Key::Q,
            KeyCode::KeyE => Key::E,
            KeyCode::KeyR => Key::R,
            KeyCode::KeyZ => Key::Z,
            KeyCode::KeyI => Key::I,
            KeyCode::KeyJ => Key::J,
            KeyCode::KeyK => Key::K,
            KeyCode::KeyL => Key::L,
            KeyCode::Space => Key::Space,
            _ => return None,
        })
    }
}

/// Tracks winit keyboard, cursor and wheel state and maps it to scene
/// controls.
///
/// Bindings: WASD pans the viewport, Q/E zoom out/in, R rotates, Z resets,
/// Space shakes, J/L/I/K pan the camera, the mouse wheel zooms.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    keys_down: HashSet<Key>,
    prev_keys_down: HashSet<Key>,

    mouse_position: DVec2,
    mouse_wheel: DVec2,

    config: ControlConfig,
}

impl InputState {
    pub fn new(config: ControlConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    pub fn begin_frame(&mut self) {
        self.prev_keys_down = self.keys_down.clone();
        self.mouse_wheel = DVec2::ZERO;
    }

    pub fn handle_keyboard_input(&mut self, physical_key: PhysicalKey, state: ElementState) {
        let PhysicalKey::Code(code) = physical_key else {
            return;
        };
        let Some(key) = Key::from_keycode(code) else {
            return;
        };
        self.set_key(key, state == ElementState::Pressed);
    }

    /// Direct key update, bypassing winit (scripted input, tests).
    pub fn set_key(&mut self, key: Key, down: bool) {
        if down {
            self.keys_down.insert(key);
        } else {
            self.keys_down.remove(&key);
        }
    }

    pub fn handle_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.mouse_position = dvec2(position.x, position.y);
    }

    pub fn handle_mouse_wheel(&mut self, delta: MouseScrollDelta) {
        let (dx, dy) = match delta {
            MouseScrollDelta::LineDelta(x, y) => (f64::from(x), f64::from(y)),
            MouseScrollDelta::PixelDelta(p) => (p.x, p.y),
        };

        self.mouse_wheel += dvec2(dx, dy);
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.keys_down.contains(&key) && !self.prev_keys_down.contains(&key)
    }

    /// Cursor position in window pixels. Feed it (scaled to the view size)
    /// to `Screen::set_cursor` for the world-position readout.
    pub fn mouse_position(&self) -> DVec2 {
        self.mouse_position
    }

    pub fn mouse_wheel(&self) -> DVec2 {
        self.mouse_wheel
    }

    fn axis(&self, negative: Key, positive: Key) -> f64 {
        let mut v = 0.0;
        if self.is_key_down(negative) {
            v -= 1.0;
        }
        if self.is_key_down(positive) {
            v += 1.0;
        }
        v
    }
}

impl InputSource for InputState {
    fn control_deltas(&self, dt: f64) -> ControlDeltas {
        let c = &self.config;
        let pan = dvec2(self.axis(Key::A, Key::D), self.axis(Key::W, Key::S)) * c.pan_speed * dt;
        let camera_pan =
            dvec2(self.axis(Key::J, Key::L), self.axis(Key::I, Key::K)) * c.camera_speed * dt;

        let mut zoom = self.axis(Key::Q, Key::E) as i32 * c.zoom_step;
        zoom += (self.mouse_wheel.y * c.wheel_zoom_step).round() as i32;

        let rotation = if self.is_key_down(Key::R) {
            c.rotate_step
        } else {
            0
        };

        ControlDeltas {
            pan,
            zoom,
            rotation,
            camera_pan,
            reset: self.is_key_down(Key::Z),
            shake: self.is_key_pressed(Key::Space),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FIXED_TIMESTEP;

    #[test]
    fn idle_without_input() {
        let input = InputState::default();
        assert!(input.control_deltas(FIXED_TIMESTEP).is_idle());
    }

    #[test]
    fn held_keys_map_to_deltas() {
        let mut input = InputState::default();
        input.set_key(Key::D, true);
        input.set_key(Key::W, true);
        input.set_key(Key::E, true);
        input.set_key(Key::R, true);
        input.set_key(Key::J, true);

        let d = input.control_deltas(FIXED_TIMESTEP);
        assert!(d.pan.abs_diff_eq(dvec2(1.0, -1.0), 1e-12));
        assert_eq!(d.zoom, 1);
        assert_eq!(d.rotation, 1);
        assert!(d.camera_pan.abs_diff_eq(dvec2(-4.0, 0.0), 1e-12));
        assert!(!d.reset);
    }

    #[test]
    fn custom_config_scales_deltas() {
        let mut input = InputState::new(ControlConfig {
            pan_speed: 120.0,
            zoom_step: 5,
            ..ControlConfig::default()
        });
        assert_eq!(input.config().zoom_step, 5);
        input.set_key(Key::S, true);
        input.set_key(Key::Q, true);

        let d = input.control_deltas(FIXED_TIMESTEP);
        assert!(d.pan.abs_diff_eq(dvec2(0.0, 2.0), 1e-12));
        assert_eq!(d.zoom, -5);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut input = InputState::default();
        input.set_key(Key::Q, true);
        input.set_key(Key::E, true);
        assert_eq!(input.control_deltas(FIXED_TIMESTEP).zoom, 0);
    }

    #[test]
    fn shake_fires_on_press_edge_only() {
        let mut input = InputState::default();
        input.begin_frame();
        input.set_key(Key::Space, true);
        assert!(input.control_deltas(FIXED_TIMESTEP).shake);

        input.begin_frame();
        assert!(!input.control_deltas(FIXED_TIMESTEP).shake);
    }

    #[test]
    fn wheel_zooms_and_clears_each_frame() {
        let mut input = InputState::default();
        input.handle_mouse_wheel(MouseScrollDelta::LineDelta(0.0, -1.0));
        assert_eq!(input.mouse_wheel(), dvec2(0.0, -1.0));
        assert_eq!(input.control_deltas(FIXED_TIMESTEP).zoom, -10);
        input.begin_frame();
        assert_eq!(input.mouse_wheel(), DVec2::ZERO);
        assert_eq!(input.control_deltas(FIXED_TIMESTEP).zoom, 0);
    }

    #[test]
    fn winit_events_update_state() {
        let mut input = InputState::default();
        input.handle_keyboard_input(PhysicalKey::Code(KeyCode::KeyZ), ElementState::Pressed);
        assert!(input.control_deltas(FIXED_TIMESTEP).reset);
        input.handle_keyboard_input(PhysicalKey::Code(KeyCode::KeyZ), ElementState::Released);
        assert!(!input.control_deltas(FIXED_TIMESTEP).reset);

        input.handle_cursor_moved(PhysicalPosition::new(12.0, 34.0));
        assert_eq!(input.mouse_position(), dvec2(12.0, 34.0));
    }
}
