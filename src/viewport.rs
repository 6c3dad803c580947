use crate::Rect;
use crate::transform::Transform2D;
use glam::{DVec2, dvec2};
use std::fmt;

/// Zoom factor limits; the effective scale is `1.01^zoom`.
pub const MIN_ZOOM: i32 = -2400;
pub const MAX_ZOOM: i32 = 2400;

/// Base of the exponential zoom curve.
pub const ZOOM_BASE: f64 = 1.01;

/// A rectangular window into world space.
///
/// Owns pan, zoom and rotation. Zoom and rotation pivot around the
/// viewport's own center so the view does not swing around its corner.
#[derive(Clone, Debug)]
pub struct Viewport {
    dimensions: DVec2,
    world_view: DVec2,
    position: DVec2,
    initial_position: DVec2,
    zoom_factor: i32,
    rotation: i32,
    margin: f64,
    allow_out_of_bounds: bool,
}

impl Viewport {
    /// `view_*` should match the visible screen; the viewport starts centered
    /// in the world.
    pub fn new(view_width: f64, view_height: f64, world_width: f64, world_height: f64) -> Self {
        let dimensions = dvec2(view_width, view_height);
        let world_view = dvec2(world_width, world_height);
        let mut viewport = Self {
            dimensions,
            world_view,
            position: (world_view - dimensions) * 0.5,
            initial_position: DVec2::ZERO,
            zoom_factor: 0,
            rotation: 0,
            margin: 0.0,
            allow_out_of_bounds: false,
        };
        viewport.clamp_to_bounds();
        viewport.initial_position = viewport.position;
        viewport
    }

    /// Places the viewport at `(x, y)` and makes that the reset position.
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = dvec2(x, y);
        self.clamp_if_bounded();
        self.initial_position = self.position;
        self
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self.clamp_if_bounded();
        self.initial_position = self.position;
        self
    }

    pub fn set_margin(&mut self, margin: f64) {
        self.margin = margin;
        self.clamp_if_bounded();
    }

    pub fn set_allow_out_of_bounds(&mut self, allow: bool) {
        self.allow_out_of_bounds = allow;
        self.clamp_if_bounded();
    }

    pub fn dimensions(&self) -> DVec2 {
        self.dimensions
    }

    pub fn world_view(&self) -> DVec2 {
        self.world_view
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn initial_position(&self) -> DVec2 {
        self.initial_position
    }

    pub fn zoom_factor(&self) -> i32 {
        self.zoom_factor
    }

    /// Linear scale applied on both axes.
    pub fn zoom_scale(&self) -> f64 {
        ZOOM_BASE.powi(self.zoom_factor)
    }

    /// Rotation in degrees, not wrapped.
    pub fn rotation(&self) -> i32 {
        self.rotation
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    pub fn allows_out_of_bounds(&self) -> bool {
        self.allow_out_of_bounds
    }

    /// Visible area in world coordinates, ignoring zoom and rotation.
    pub fn area(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.dimensions.x,
            self.dimensions.y,
        )
    }

    fn center(&self) -> DVec2 {
        self.dimensions * 0.5
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.position += dvec2(dx, dy);
        self.clamp_if_bounded();
    }

    pub fn pan_to(&mut self, x: f64, y: f64) {
        self.position = dvec2(x, y);
        self.clamp_if_bounded();
    }

    /// A step that would leave `[MIN_ZOOM, MAX_ZOOM]` is dropped and the
    /// factor stays where it is.
    pub fn zoom_by(&mut self, dz: i32) {
        if let Some(zoom) = self.zoom_factor.checked_add(dz) {
            self.set_zoom(zoom);
        }
    }

    /// Ignored when `zoom` is outside the limits.
    pub fn set_zoom(&mut self, zoom: i32) {
        if (MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
            self.zoom_factor = zoom;
        }
    }

    pub fn rotate_by(&mut self, dr: i32) {
        self.rotation = self.rotation.wrapping_add(dr);
    }

    pub fn set_rotation(&mut self, rotation: i32) {
        self.rotation = rotation;
    }

    pub fn reset(&mut self) {
        self.position = self.initial_position;
        self.zoom_factor = 0;
        self.rotation = 0;
    }

    fn clamp_if_bounded(&mut self) {
        if !self.allow_out_of_bounds {
            self.clamp_to_bounds();
        }
    }

    /// Shifts the viewport by the smallest amount that keeps every edge at
    /// least `margin` away from the world boundary. Axes are independent.
    ///
    /// When the world is too small on an axis for both edges to fit, the
    /// viewport is centered on that axis instead.
    pub fn clamp_to_bounds(&mut self) {
        self.position.x = clamp_axis(
            self.position.x,
            self.dimensions.x,
            self.world_view.x,
            self.margin,
        );
        self.position.y = clamp_axis(
            self.position.y,
            self.dimensions.y,
            self.world_view.y,
            self.margin,
        );
    }

    /// World → screen matrix.
    pub fn render_matrix(&self) -> Transform2D {
        let center = self.center();
        let scale = self.zoom_scale();

        let mut m = Transform2D::new();
        m.translate(-self.position.x, -self.position.y);
        m.translate(-center.x, -center.y);
        m.scale(scale, scale);
        m.rotate(f64::from(self.rotation).to_radians());
        m.translate(center.x, center.y);
        m
    }

    pub fn world_to_screen(&self, world: DVec2) -> DVec2 {
        self.render_matrix().apply(world)
    }

    /// Returns `None` when the render matrix is singular.
    pub fn try_screen_to_world(&self, screen: DVec2) -> Option<DVec2> {
        self.render_matrix().inverse().map(|inv| inv.apply(screen))
    }

    /// Screen → world. Yields `(NaN, NaN)` when the render matrix cannot be
    /// inverted; callers must check with `is_nan()`.
    pub fn screen_to_world(&self, screen: DVec2) -> DVec2 {
        self.try_screen_to_world(screen).unwrap_or(DVec2::NAN)
    }
}

fn clamp_axis(start: f64, extent: f64, world: f64, margin: f64) -> f64 {
    let low = margin;
    let high = world - margin - extent;
    if high < low {
        return (world - extent) * 0.5;
    }
    start.clamp(low, high)
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "T: [{:.1}, {:.1}], R: {}, S: {}",
            self.position.x, self.position.y, self.rotation, self.zoom_factor
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_viewport() -> Viewport {
        Viewport::new(320.0, 240.0, 360.0, 280.0)
    }

    #[test]
    fn starts_centered_in_world() {
        let vp = demo_viewport();
        assert_eq!(vp.position(), dvec2(20.0, 20.0));
        assert_eq!(vp.initial_position(), dvec2(20.0, 20.0));
    }

    #[test]
    fn pan_clamps_each_edge() {
        let mut vp = demo_viewport();
        vp.pan_to(-50.0, 0.0);
        assert_eq!(vp.position().x, 0.0);

        vp.pan_to(45.0, 0.0);
        assert_eq!(vp.position().x, 40.0);
    }

    #[test]
    fn axes_clamp_independently() {
        let mut vp = demo_viewport();
        vp.pan_to(100.0, 10.0);
        assert_eq!(vp.position(), dvec2(40.0, 10.0));
    }

    #[test]
    fn margin_shrinks_the_allowed_range() {
        let mut vp = demo_viewport().with_margin(5.0);
        assert_eq!(vp.margin(), 5.0);
        vp.pan(-100.0, 100.0);
        assert_eq!(vp.position(), dvec2(5.0, 35.0));

        vp.set_margin(10.0);
        assert_eq!(vp.position(), dvec2(10.0, 30.0));
        assert_eq!(vp.area(), Rect::new(10.0, 30.0, 320.0, 240.0));
        assert_eq!(vp.world_view(), dvec2(360.0, 280.0));
    }

    #[test]
    fn out_of_bounds_allowed_skips_clamp() {
        let mut vp = demo_viewport();
        vp.set_allow_out_of_bounds(true);
        assert!(vp.allows_out_of_bounds());
        vp.pan_to(-50.0, 500.0);
        assert_eq!(vp.position(), dvec2(-50.0, 500.0));

        vp.set_allow_out_of_bounds(false);
        assert_eq!(vp.position(), dvec2(0.0, 40.0));
    }

    #[test]
    fn too_small_world_centers_axis() {
        let mut vp = Viewport::new(320.0, 240.0, 300.0, 280.0);
        vp.pan_to(17.0, 3.0);
        assert_eq!(vp.position(), dvec2(-10.0, 3.0));
    }

    #[test]
    fn zoom_stops_at_limits() {
        let mut vp = demo_viewport();
        for _ in 0..3000 {
            vp.zoom_by(1);
        }
        assert_eq!(vp.zoom_factor(), MAX_ZOOM);

        vp.set_zoom(-MAX_ZOOM);
        assert_eq!(vp.zoom_factor(), MIN_ZOOM);
        vp.zoom_by(-1);
        assert_eq!(vp.zoom_factor(), MIN_ZOOM);
    }

    #[test]
    fn out_of_range_zoom_step_is_dropped() {
        let mut vp = demo_viewport();
        vp.set_zoom(2395);
        vp.zoom_by(10);
        assert_eq!(vp.zoom_factor(), 2395);
        vp.zoom_by(5);
        assert_eq!(vp.zoom_factor(), MAX_ZOOM);

        vp.set_zoom(-2398);
        vp.zoom_by(-3);
        assert_eq!(vp.zoom_factor(), -2398);
        vp.zoom_by(i32::MIN);
        assert_eq!(vp.zoom_factor(), -2398);
    }

    #[test]
    fn out_of_range_set_zoom_is_ignored() {
        let mut vp = demo_viewport();
        vp.set_zoom(0);
        vp.set_zoom(9000);
        assert_eq!(vp.zoom_factor(), 0);
        vp.set_zoom(-2401);
        assert_eq!(vp.zoom_factor(), 0);
    }

    #[test]
    fn rotation_is_unbounded() {
        let mut vp = demo_viewport();
        vp.set_rotation(350);
        vp.rotate_by(20);
        assert_eq!(vp.rotation(), 370);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut vp = demo_viewport();
        vp.pan(-7.0, 3.0);
        vp.zoom_by(40);
        vp.rotate_by(90);
        vp.reset();
        assert_eq!(vp.position(), dvec2(20.0, 20.0));
        assert_eq!(vp.zoom_factor(), 0);
        assert_eq!(vp.rotation(), 0);
    }

    #[test]
    fn center_is_fixed_point() {
        let mut vp = demo_viewport().with_position(0.0, 0.0);
        let center = dvec2(160.0, 120.0);
        for (zoom, rotation) in [(0, 0), (150, 33), (-600, 271), (1200, 90), (2399, 359)] {
            vp.set_zoom(zoom);
            vp.set_rotation(rotation);
            let mapped = vp.render_matrix().apply(center);
            // The composed translation grows with the scale, and so does its
            // rounding error once the pivot is added back.
            let tolerance = (1e-14 * vp.zoom_scale().max(1.0) * center.length()).max(1e-9);
            assert!(mapped.abs_diff_eq(center, tolerance), "{zoom} {rotation}: {mapped}");
        }
    }

    #[test]
    fn screen_to_world_inverts_world_to_screen() {
        let mut vp = demo_viewport();
        vp.pan(7.0, -3.0);
        let world = dvec2(123.0, 45.5);
        for zoom in [-400, -37, 0, 12, 250, 900] {
            for rotation in [0, 45, 90, 181, 359] {
                vp.set_zoom(zoom);
                vp.set_rotation(rotation);
                let back = vp.screen_to_world(vp.world_to_screen(world));
                assert!(back.abs_diff_eq(world, 1e-6), "{zoom} {rotation}: {back}");
            }
        }
    }

    #[test]
    fn unzoomed_render_matrix_is_plain_translation() {
        let vp = demo_viewport();
        let m = vp.render_matrix();
        assert!(m.apply(dvec2(20.0, 20.0)).abs_diff_eq(DVec2::ZERO, 1e-9));
    }

    #[test]
    fn display_summary() {
        let mut vp = demo_viewport();
        vp.zoom_by(3);
        assert_eq!(vp.to_string(), "T: [20.0, 20.0], R: 0, S: 3");
    }
}
