// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Affine matrices, rectangles and the fuzzy-equality helpers the rest of
//! the crate uses to compare floating point geometry.

use float_cmp::ApproxEqUlps;

/// A trait for fuzzy/approximate equality comparisons of float numbers.
pub trait FuzzyEq<Rhs: ?Sized = Self> {
    /// Returns `true` if values are approximately equal.
    fn fuzzy_eq(&self, other: &Rhs) -> bool;

    /// Returns `true` if values are not approximately equal.
    #[inline]
    fn fuzzy_ne(&self, other: &Rhs) -> bool {
        !self.fuzzy_eq(other)
    }
}

/// A trait for fuzzy/approximate zero comparisons of float numbers.
pub trait FuzzyZero: FuzzyEq {
    /// Returns `true` if the number is approximately zero.
    fn is_fuzzy_zero(&self) -> bool;
}

impl FuzzyEq for f64 {
    #[inline]
    fn fuzzy_eq(&self, other: &f64) -> bool {
        self.approx_eq_ulps(other, 4)
    }
}

impl FuzzyZero for f64 {
    #[inline]
    fn is_fuzzy_zero(&self) -> bool {
        self.fuzzy_eq(&0.0)
    }
}

/// A 2D point.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// An affine transformation matrix.
///
/// `[m00 m01 m02; m10 m11 m12]`, applied to a point as
/// `x' = m00*x + m01*y + m02`, `y' = m10*x + m11*y + m12`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Transform {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
    pub m11: f64,
    pub m02: f64,
    pub m12: f64,
}

impl Default for Transform {
    #[inline]
    fn default() -> Self {
        Transform::identity()
    }
}

impl Transform {
    #[inline]
    pub fn new(m00: f64, m10: f64, m01: f64, m11: f64, m02: f64, m12: f64) -> Self {
        Transform { m00, m10, m01, m11, m02, m12 }
    }

    #[inline]
    pub fn identity() -> Self {
        Transform::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    #[inline]
    pub fn new_translate(tx: f64, ty: f64) -> Self {
        Transform::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    #[inline]
    pub fn new_scale(sx: f64, sy: f64) -> Self {
        Transform::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation in degrees, around the origin.
    pub fn new_rotate(degrees: f64) -> Self {
        let rad = degrees.to_radians();
        let (s, c) = rad.sin_cos();
        Transform::new(c, s, -s, c, 0.0, 0.0)
    }

    /// Rotation in degrees around an arbitrary pivot: translate(px,py) * rotate(deg) * translate(-px,-py).
    pub fn new_rotate_at(degrees: f64, px: f64, py: f64) -> Self {
        let mut m = Transform::new_translate(px, py);
        m.append(&Transform::new_rotate(degrees));
        m.append(&Transform::new_translate(-px, -py));
        m
    }

    /// `shear(x, y) = [1 tan(y); tan(x) 1]`, angles in degrees.
    pub fn new_skew(skew_x_deg: f64, skew_y_deg: f64) -> Self {
        Transform::new(
            1.0,
            skew_y_deg.to_radians().tan(),
            skew_x_deg.to_radians().tan(),
            1.0,
            0.0,
            0.0,
        )
    }

    #[inline]
    pub fn translate(&mut self, tx: f64, ty: f64) {
        self.append(&Transform::new_translate(tx, ty));
    }

    #[inline]
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.append(&Transform::new_scale(sx, sy));
    }

    #[inline]
    pub fn rotate(&mut self, degrees: f64) {
        self.append(&Transform::new_rotate(degrees));
    }

    /// `self = self * other`, i.e. `other` is applied first to a point:
    /// `p' = self . (other . p)`.
    pub fn append(&mut self, other: &Transform) {
        *self = Transform::concat(self, other);
    }

    /// Composes `a` and `b` such that the result, applied to a point `p`,
    /// equals `a` applied to `b` applied to `p` (`a . b . p`).
    pub fn concat(a: &Transform, b: &Transform) -> Transform {
        Transform {
            m00: a.m00 * b.m00 + a.m01 * b.m10,
            m10: a.m10 * b.m00 + a.m11 * b.m10,
            m01: a.m00 * b.m01 + a.m01 * b.m11,
            m11: a.m10 * b.m01 + a.m11 * b.m11,
            m02: a.m00 * b.m02 + a.m01 * b.m12 + a.m02,
            m12: a.m10 * b.m02 + a.m11 * b.m12 + a.m12,
        }
    }

    #[inline]
    pub fn determinant(&self) -> f64 {
        self.m00 * self.m11 - self.m01 * self.m10
    }

    /// Returns `None` when the matrix is singular (determinant is zero).
    pub fn invert(&self) -> Option<Transform> {
        let det = self.determinant();
        if det.is_fuzzy_zero() || !det.is_finite() {
            return None;
        }

        let inv_det = 1.0 / det;
        let m00 = self.m11 * inv_det;
        let m01 = -self.m01 * inv_det;
        let m10 = -self.m10 * inv_det;
        let m11 = self.m00 * inv_det;
        let m02 = -(self.m02 * m00 + self.m12 * m01);
        let m12 = -(self.m02 * m10 + self.m12 * m11);

        Some(Transform::new(m00, m10, m01, m11, m02, m12))
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.fuzzy_eq(&Transform::identity())
    }

    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.m00 * x + self.m01 * y + self.m02,
            self.m10 * x + self.m11 * y + self.m12,
        )
    }

    #[inline]
    pub fn apply_point(&self, p: Point) -> Point {
        let (x, y) = self.apply(p.x, p.y);
        Point::new(x, y)
    }

    /// Maps a rect through this matrix, returning the axis-aligned bounding
    /// box of the four transformed corners.
    pub fn map_rect(&self, rect: Rect) -> Rect {
        let corners = [
            self.apply(rect.x(), rect.y()),
            self.apply(rect.right(), rect.y()),
            self.apply(rect.right(), rect.bottom()),
            self.apply(rect.x(), rect.bottom()),
        ];

        let mut min_x = corners[0].0;
        let mut max_x = corners[0].0;
        let mut min_y = corners[0].1;
        let mut max_y = corners[0].1;
        for &(x, y) in &corners[1..] {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }

        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y).unwrap_or_else(Rect::zero)
    }
}

impl FuzzyEq for Transform {
    fn fuzzy_eq(&self, other: &Self) -> bool {
        self.m00.fuzzy_eq(&other.m00)
            && self.m10.fuzzy_eq(&other.m10)
            && self.m01.fuzzy_eq(&other.m01)
            && self.m11.fuzzy_eq(&other.m11)
            && self.m02.fuzzy_eq(&other.m02)
            && self.m12.fuzzy_eq(&other.m12)
    }
}

/// An axis-aligned rectangle. Width and height may be zero (a degenerate,
/// but still valid, bbox) but never negative.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Rect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Rect {
    /// Returns `None` if width or height is negative or not finite.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Option<Self> {
        if width < 0.0 || height < 0.0 || !width.is_finite() || !height.is_finite() {
            return None;
        }

        Some(Rect { x, y, width, height })
    }

    #[inline]
    pub fn zero() -> Self {
        Rect { x: 0.0, y: 0.0, width: 0.0, height: 0.0 }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width.is_fuzzy_zero() || self.height.is_fuzzy_zero()
    }

    /// Inflates the rect by `dx`/`dy` on every side.
    pub fn inflate(&self, dx: f64, dy: f64) -> Rect {
        Rect {
            x: self.x - dx,
            y: self.y - dy,
            width: (self.width + dx * 2.0).max(0.0),
            height: (self.height + dy * 2.0).max(0.0),
        }
    }

    /// The smallest rect containing both `self` and `other`.
    pub fn unite(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect { x, y, width: right - x, height: bottom - y }
    }

    /// The overlap of `self` and `other`, or a zero-size rect at the origin
    /// of the intersection when they don't overlap.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= x || bottom <= y {
            Rect { x, y, width: 0.0, height: 0.0 }
        } else {
            Rect { x, y, width: right - x, height: bottom - y }
        }
    }

    /// `sqrt(w^2 + h^2) / sqrt(2)`, used to resolve percent lengths that
    /// aren't tied to a single axis (e.g. a gradient radius).
    #[inline]
    pub fn diagonal(&self) -> f64 {
        (self.width * self.width + self.height * self.height).sqrt() / std::f64::consts::SQRT_2
    }
}

impl FuzzyEq for Rect {
    fn fuzzy_eq(&self, other: &Self) -> bool {
        self.x.fuzzy_eq(&other.x)
            && self.y.fuzzy_eq(&other.y)
            && self.width.fuzzy_eq(&other.width)
            && self.height.fuzzy_eq(&other.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invert_roundtrip() {
        let m = Transform::new(2.0, 0.5, -1.0, 3.0, 10.0, -4.0);
        let inv = m.invert().unwrap();
        let id = Transform::concat(&m, &inv);
        assert!(id.fuzzy_eq(&Transform::identity()));
    }

    #[test]
    fn singular_has_no_inverse() {
        let m = Transform::new(1.0, 2.0, 2.0, 4.0, 0.0, 0.0);
        assert!(m.invert().is_none());
    }

    #[test]
    fn rotate_at_pivot_is_fixed_point() {
        let m = Transform::new_rotate_at(90.0, 5.0, 5.0);
        let (x, y) = m.apply(5.0, 5.0);
        assert!(x.fuzzy_eq(&5.0));
        assert!(y.fuzzy_eq(&5.0));
    }

    #[test]
    fn map_rect_under_scale() {
        let m = Transform::new_scale(10.0, 10.0);
        let r = Rect::new(0.0, 0.0, 20.0, 10.0).unwrap();
        let mapped = m.map_rect(r);
        assert!(mapped.fuzzy_eq(&Rect::new(0.0, 0.0, 200.0, 100.0).unwrap()));
    }

    #[test]
    fn unite_and_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0).unwrap();
        let b = Rect::new(5.0, 5.0, 10.0, 10.0).unwrap();
        assert!(a.unite(&b).fuzzy_eq(&Rect::new(0.0, 0.0, 15.0, 15.0).unwrap()));
        assert!(a.intersect(&b).fuzzy_eq(&Rect::new(5.0, 5.0, 5.0, 5.0).unwrap()));
    }
}
