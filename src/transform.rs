use glam::{DAffine2, DVec2, dvec2};
use std::ops::Mul;

/// 2D affine transform (translate / scale / rotate).
///
/// Operations are post-applied: calling `translate` then `scale` first moves a
/// point and then scales the moved point. This mirrors how the renderer's
/// matrix stack is built up, one step at a time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform2D(DAffine2);

impl Transform2D {
    pub const IDENTITY: Transform2D = Transform2D(DAffine2::IDENTITY);

    pub fn new() -> Self {
        Self::IDENTITY
    }

    pub fn from_translation(dx: f64, dy: f64) -> Self {
        Self(DAffine2::from_translation(dvec2(dx, dy)))
    }

    pub fn from_scale(sx: f64, sy: f64) -> Self {
        Self(DAffine2::from_scale(dvec2(sx, sy)))
    }

    pub fn from_rotation(radians: f64) -> Self {
        Self(DAffine2::from_angle(radians))
    }

    /// Back to identity.
    pub fn reset(&mut self) {
        self.0 = DAffine2::IDENTITY;
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.0 = DAffine2::from_translation(dvec2(dx, dy)) * self.0;
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.0 = DAffine2::from_scale(dvec2(sx, sy)) * self.0;
    }

    pub fn rotate(&mut self, radians: f64) {
        self.0 = DAffine2::from_angle(radians) * self.0;
    }

    /// Appends `other`: it is applied after everything accumulated so far.
    pub fn concat(&mut self, other: &Transform2D) {
        self.0 = other.0 * self.0;
    }

    /// Translation component.
    pub fn translation(&self) -> DVec2 {
        self.0.translation
    }

    pub fn determinant(&self) -> f64 {
        self.0.matrix2.determinant()
    }

    pub fn is_invertible(&self) -> bool {
        let det = self.determinant();
        det != 0.0 && det.is_finite()
    }

    /// Returns `None` for singular matrices (e.g. a zoom so extreme it
    /// collapses to zero).
    pub fn inverse(&self) -> Option<Transform2D> {
        if !self.is_invertible() {
            return None;
        }
        let inv = self.0.inverse();
        if !inv.is_finite() {
            return None;
        }
        Some(Self(inv))
    }

    pub fn apply(&self, point: DVec2) -> DVec2 {
        self.0.transform_point2(point)
    }

    pub fn abs_diff_eq(&self, other: &Transform2D, max_abs_diff: f64) -> bool {
        self.0.abs_diff_eq(other.0, max_abs_diff)
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// `a * b` applies `b` first, then `a` (matrix order).
impl Mul for Transform2D {
    type Output = Transform2D;

    fn mul(self, rhs: Transform2D) -> Transform2D {
        Transform2D(self.0 * rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn close(a: DVec2, b: DVec2) -> bool {
        a.abs_diff_eq(b, 1e-9)
    }

    #[test]
    fn calls_apply_in_order() {
        let mut t = Transform2D::new();
        t.translate(10.0, 0.0);
        t.scale(2.0, 2.0);
        // (1 + 10) * 2
        assert!(close(t.apply(dvec2(1.0, 0.0)), dvec2(22.0, 0.0)));

        let mut u = Transform2D::new();
        u.scale(2.0, 2.0);
        u.translate(10.0, 0.0);
        assert!(close(u.apply(dvec2(1.0, 0.0)), dvec2(12.0, 0.0)));
    }

    #[test]
    fn concat_applies_other_after() {
        let mut t = Transform2D::from_translation(5.0, 5.0);
        t.concat(&Transform2D::from_scale(3.0, 1.0));
        assert!(close(t.apply(DVec2::ZERO), dvec2(15.0, 5.0)));
    }

    #[test]
    fn rotate_about_pivot() {
        let pivot = dvec2(50.0, 50.0);
        let mut t = Transform2D::new();
        t.translate(-pivot.x, -pivot.y);
        t.rotate(FRAC_PI_2);
        t.translate(pivot.x, pivot.y);

        assert!(close(t.apply(pivot), pivot));
        assert!(close(t.apply(dvec2(60.0, 50.0)), dvec2(50.0, 60.0)));
    }

    #[test]
    fn inverse_round_trips() {
        let mut t = Transform2D::new();
        t.translate(-12.5, 40.0);
        t.scale(1.7, 0.3);
        t.rotate(0.8);
        let inv = t.inverse().unwrap();
        let back = inv.inverse().unwrap();
        assert!(back.abs_diff_eq(&t, 1e-9));

        let p = dvec2(3.0, -7.0);
        assert!(close(inv.apply(t.apply(p)), p));
    }

    #[test]
    fn singular_has_no_inverse() {
        let t = Transform2D::from_scale(0.0, 1.0);
        assert!(!t.is_invertible());
        assert!(t.inverse().is_none());
    }

    #[test]
    fn mul_matches_concat() {
        let a = Transform2D::from_translation(1.0, 2.0);
        let b = Transform2D::from_rotation(0.3);
        let mut c = a;
        c.concat(&b);
        assert!((b * a).abs_diff_eq(&c, 1e-12));
    }
}
