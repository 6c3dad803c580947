use crate::Rect;
use crate::transform::Transform2D;
use glam::{DVec2, dvec2};
use std::cell::Cell;
use std::rc::{Rc, Weak};

/// Something the camera can follow.
pub trait FocusTarget {
    /// Current position in world coordinates.
    fn focus_position(&self) -> DVec2;
}

impl FocusTarget for Cell<DVec2> {
    fn focus_position(&self) -> DVec2 {
        self.get()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CameraMode {
    /// No target, or auto-focus turned off.
    Idle,
    /// Re-centering on a live target every update.
    Following,
}

/// Focus-driven camera offset.
///
/// The camera keeps a dead-zone rectangle rigidly attached to its position.
/// While following, a target that leaves the dead-zone drags the camera by
/// exactly the overshoot, so the follow lags instead of snapping.
///
/// The target is held weakly: dropping it puts the camera back to
/// [`CameraMode::Idle`] on the next update.
pub struct Camera {
    position: DVec2,
    world_view: DVec2,
    focus_view: DVec2,
    focus_center: DVec2,
    target: Option<Weak<dyn FocusTarget>>,
    auto_focus: bool,
    debug: bool,
}

impl Camera {
    /// `focus_x, focus_y` is the dead-zone center in world coordinates. The
    /// camera itself starts at the world center, where its offset is zero.
    pub fn new(
        world_width: f64,
        world_height: f64,
        focus_width: f64,
        focus_height: f64,
        focus_x: f64,
        focus_y: f64,
    ) -> Self {
        let world_view = dvec2(world_width, world_height);
        Self {
            position: world_view * 0.5,
            world_view,
            focus_view: dvec2(focus_width, focus_height),
            focus_center: dvec2(focus_x, focus_y),
            target: None,
            auto_focus: false,
            debug: false,
        }
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn world_view(&self) -> DVec2 {
        self.world_view
    }

    pub fn focus_view(&self) -> DVec2 {
        self.focus_view
    }

    pub fn focus_center(&self) -> DVec2 {
        self.focus_center
    }

    /// Dead-zone in world coordinates.
    pub fn focus_rect(&self) -> Rect {
        let top_left = self.focus_center - self.focus_view * 0.5;
        Rect::new(top_left.x, top_left.y, self.focus_view.x, self.focus_view.y)
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn mode(&self) -> CameraMode {
        let alive = self
            .target
            .as_ref()
            .is_some_and(|target| target.strong_count() > 0);
        if self.auto_focus && alive {
            CameraMode::Following
        } else {
            CameraMode::Idle
        }
    }

    /// Starts following `target` without taking ownership of it.
    pub fn focus_on<T: FocusTarget + 'static>(&mut self, target: &Rc<T>) {
        let weak = Rc::downgrade(target);
        let weak: Weak<dyn FocusTarget> = weak;
        self.target = Some(weak);
        self.auto_focus = true;
        tracing::debug!(position = ?target.focus_position(), "camera following target");
    }

    pub fn disable_auto_focus(&mut self) {
        self.auto_focus = false;
    }

    /// Follows the focused target; call after the target has moved this tick,
    /// otherwise the camera trails it by one frame.
    pub fn update(&mut self) {
        if !self.auto_focus {
            return;
        }
        let Some(target) = self.target.as_ref().and_then(Weak::upgrade) else {
            if self.target.take().is_some() {
                tracing::debug!("focus target dropped, camera idle");
            }
            self.auto_focus = false;
            return;
        };
        let p = target.focus_position();
        self.refocus(p.x, p.y);
    }

    /// Moves the camera by the smallest amount that brings `(x, y)` back onto
    /// the dead-zone boundary. Returns the applied correction.
    pub fn refocus(&mut self, x: f64, y: f64) -> DVec2 {
        let half = self.focus_view * 0.5;
        let min = self.focus_center - half;
        let max = self.focus_center + half;

        let mut delta = DVec2::ZERO;
        if x < min.x {
            delta.x = x - min.x;
        } else if x > max.x {
            delta.x = x - max.x;
        }
        if y < min.y {
            delta.y = y - min.y;
        } else if y > max.y {
            delta.y = y - max.y;
        }

        if delta != DVec2::ZERO {
            self.move_by(delta.x, delta.y);
        }
        delta
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        let delta = dvec2(x, y) - self.position;
        self.move_by(delta.x, delta.y);
    }

    /// The dead-zone moves with the camera.
    pub fn move_by(&mut self, dx: f64, dy: f64) {
        let delta = dvec2(dx, dy);
        self.position += delta;
        self.focus_center += delta;
    }

    /// Translation that places world content for the current camera
    /// position. Zero when the camera sits at the world center.
    pub fn offset(&self) -> DVec2 {
        self.world_view * 0.5 - self.position
    }

    pub fn offset_matrix(&self) -> Transform2D {
        let offset = self.offset();
        Transform2D::from_translation(offset.x, offset.y)
    }
}

impl std::fmt::Debug for Camera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Camera")
            .field("position", &self.position)
            .field("world_view", &self.world_view)
            .field("focus_view", &self.focus_view)
            .field("focus_center", &self.focus_center)
            .field("mode", &self.mode())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dead_zone_camera() -> Camera {
        Camera::new(400.0, 400.0, 100.0, 100.0, 200.0, 200.0)
    }

    #[test]
    fn target_inside_dead_zone_is_ignored() {
        let mut cam = dead_zone_camera();
        assert_eq!(cam.world_view(), dvec2(400.0, 400.0));
        assert_eq!(cam.focus_view(), dvec2(100.0, 100.0));
        assert_eq!(cam.focus_rect().min(), dvec2(150.0, 150.0));
        assert_eq!(cam.refocus(200.0, 200.0), DVec2::ZERO);
        assert_eq!(cam.refocus(250.0, 150.0), DVec2::ZERO);
        assert_eq!(cam.position(), dvec2(200.0, 200.0));
    }

    #[test]
    fn refocus_moves_by_overshoot_once() {
        let mut cam = dead_zone_camera();
        assert_eq!(cam.refocus(260.0, 200.0), dvec2(10.0, 0.0));
        assert_eq!(cam.position(), dvec2(210.0, 200.0));
        assert_eq!(cam.focus_center(), dvec2(210.0, 200.0));

        assert_eq!(cam.refocus(260.0, 200.0), DVec2::ZERO);
        assert_eq!(cam.position(), dvec2(210.0, 200.0));
    }

    #[test]
    fn refocus_handles_both_axes() {
        let mut cam = dead_zone_camera();
        assert_eq!(cam.refocus(100.0, 320.0), dvec2(-50.0, 70.0));
    }

    #[test]
    fn focus_center_tracks_translation_history() {
        let mut cam = Camera::new(360.0, 280.0, 120.0, 120.0, 120.0, 140.0);
        let p0 = cam.position();
        let c0 = cam.focus_center();
        cam.move_by(3.5, -1.25);
        cam.move_to(10.0, 10.0);
        cam.refocus(500.0, -300.0);
        cam.move_by(0.1, 0.1);
        assert!(
            cam.focus_center()
                .abs_diff_eq(c0 + (cam.position() - p0), 1e-9)
        );
    }

    #[test]
    fn offset_is_zero_at_world_center() {
        let mut cam = Camera::new(360.0, 280.0, 120.0, 120.0, 120.0, 140.0);
        assert_eq!(cam.offset(), DVec2::ZERO);
        cam.move_by(10.0, -4.0);
        assert_eq!(cam.offset(), dvec2(-10.0, 4.0));
        assert_eq!(cam.offset_matrix().apply(DVec2::ZERO), dvec2(-10.0, 4.0));
    }

    #[test]
    fn follows_live_target_and_idles_when_dropped() {
        let mut cam = dead_zone_camera();
        let target = Rc::new(Cell::new(dvec2(200.0, 200.0)));
        cam.focus_on(&target);
        assert_eq!(cam.mode(), CameraMode::Following);

        target.set(dvec2(200.0, 275.0));
        cam.update();
        assert_eq!(cam.position(), dvec2(200.0, 225.0));

        drop(target);
        assert_eq!(cam.mode(), CameraMode::Idle);
        cam.update();
        assert_eq!(cam.mode(), CameraMode::Idle);
        assert_eq!(cam.position(), dvec2(200.0, 225.0));
    }

    #[test]
    fn disabled_auto_focus_stops_following() {
        let mut cam = dead_zone_camera();
        let target = Rc::new(Cell::new(dvec2(200.0, 200.0)));
        cam.focus_on(&target);
        cam.disable_auto_focus();
        assert_eq!(cam.mode(), CameraMode::Idle);

        target.set(dvec2(900.0, 900.0));
        cam.update();
        assert_eq!(cam.position(), dvec2(200.0, 200.0));
    }
}
