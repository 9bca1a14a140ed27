// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Path geometry: a command/point array builder with quad and elliptical
//! arc lowering to cubic Beziers, plus bounding box computation.

use crate::geom::{FuzzyZero, Rect, Transform};

/// A single path command. Quads and arcs are lowered to `CubicTo` at
/// insertion time, so only these four survive.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PathCommand {
    MoveTo,
    LineTo,
    CubicTo,
    Close,
}

/// A path: parallel arrays of commands and points.
///
/// The point count always equals the sum, over commands, of 1 point for
/// `MoveTo`/`LineTo`, 3 for `CubicTo`, 0 for `Close`.
#[derive(Clone, Debug, Default)]
pub struct PathData {
    commands: Vec<PathCommand>,
    points: Vec<f64>,
}

const KAPPA: f64 = 0.552_228_474_383_8;

impl PathData {
    #[inline]
    pub fn new() -> Self {
        PathData::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[inline]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    #[inline]
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    #[inline]
    pub fn clear(&mut self) {
        self.commands.clear();
        self.points.clear();
    }

    fn last_pos(&self) -> (f64, f64) {
        let n = self.points.len();
        debug_assert!(n >= 2, "move_to must precede any drawing command");
        (self.points[n - 2], self.points[n - 1])
    }

    #[inline]
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::MoveTo);
        self.points.push(x);
        self.points.push(y);
    }

    #[inline]
    pub fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::LineTo);
        self.points.push(x);
        self.points.push(y);
    }

    #[inline]
    pub fn cubic_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) {
        self.commands.push(PathCommand::CubicTo);
        self.points.push(x1);
        self.points.push(y1);
        self.points.push(x2);
        self.points.push(y2);
        self.points.push(x);
        self.points.push(y);
    }

    /// Lowers a quadratic Bezier to a cubic: the single control point is
    /// reused to synthesize both cubic controls.
    pub fn quad_to(&mut self, x1: f64, y1: f64, x: f64, y: f64) {
        let (px, py) = self.last_pos();
        let cx1 = px + 2.0 / 3.0 * (x1 - px);
        let cy1 = py + 2.0 / 3.0 * (y1 - py);
        let cx2 = x + 2.0 / 3.0 * (x1 - x);
        let cy2 = y + 2.0 / 3.0 * (y1 - y);
        self.cubic_to(cx1, cy1, cx2, cy2, x, y);
    }

    #[inline]
    pub fn close(&mut self) {
        if self.commands.last() == Some(&PathCommand::Close) {
            return;
        }
        self.commands.push(PathCommand::Close);
    }

    pub fn push_rect(&mut self, rect: Rect) {
        self.move_to(rect.x(), rect.y());
        self.line_to(rect.right(), rect.y());
        self.line_to(rect.right(), rect.bottom());
        self.line_to(rect.x(), rect.bottom());
        self.close();
    }

    /// Rounded rect via quarter-circle cubic approximations (kappa).
    pub fn push_rounded_rect(&mut self, rect: Rect, rx: f64, ry: f64) {
        if rx.is_fuzzy_zero() || ry.is_fuzzy_zero() {
            self.push_rect(rect);
            return;
        }

        let (x, y, w, h) = (rect.x(), rect.y(), rect.width(), rect.height());
        let kx = rx * KAPPA;
        let ky = ry * KAPPA;

        self.move_to(x + rx, y);
        self.line_to(x + w - rx, y);
        self.cubic_to(x + w - rx + kx, y, x + w, y + ry - ky, x + w, y + ry);
        self.line_to(x + w, y + h - ry);
        self.cubic_to(x + w, y + h - ry + ky, x + w - rx + kx, y + h, x + w - rx, y + h);
        self.line_to(x + rx, y + h);
        self.cubic_to(x + rx - kx, y + h, x, y + h - ry + ky, x, y + h - ry);
        self.line_to(x, y + ry);
        self.cubic_to(x, y + ry - ky, x + rx - kx, y, x + rx, y);
        self.close();
    }

    pub fn push_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64) {
        let kx = rx * KAPPA;
        let ky = ry * KAPPA;

        self.move_to(cx + rx, cy);
        self.cubic_to(cx + rx, cy + ky, cx + kx, cy + ry, cx, cy + ry);
        self.cubic_to(cx - kx, cy + ry, cx - rx, cy + ky, cx - rx, cy);
        self.cubic_to(cx - rx, cy - ky, cx - kx, cy - ry, cx, cy - ry);
        self.cubic_to(cx + kx, cy - ry, cx + rx, cy - ky, cx + rx, cy);
        self.close();
    }

    /// SVG 1.1 endpoint-to-center elliptical arc, lowered to one cubic
    /// per `pi/2` of sweep.
    ///
    /// Zero radii or a zero-length chord (`dx == 0` and `dy == 0`, i.e. the
    /// endpoints coincide) degenerate to a straight line rather than being
    /// silently dropped.
    pub fn arc_to(
        &mut self,
        mut rx: f64,
        mut ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    ) {
        let (x0, y0) = self.last_pos();

        rx = rx.abs();
        ry = ry.abs();

        if rx.is_fuzzy_zero() || ry.is_fuzzy_zero() || ((x0 - x).is_fuzzy_zero() && (y0 - y).is_fuzzy_zero()) {
            self.line_to(x, y);
            return;
        }

        let neg_rot = Transform::new_rotate(-x_axis_rotation);
        let (mx, my) = neg_rot.apply((x0 - x) / 2.0, (y0 - y) / 2.0);

        let radii_check = mx * mx / (rx * rx) + my * my / (ry * ry);
        if radii_check > 1.0 {
            let s = radii_check.sqrt();
            rx *= s;
            ry *= s;
        }

        // Maps into the space where the arc is a unit circle: undo the
        // x-axis rotation, then scale by 1/rx, 1/ry.
        let unit = Transform::concat(&Transform::new_scale(1.0 / rx, 1.0 / ry), &neg_rot);
        let (x0p, y0p) = unit.apply(x0, y0);
        let (x1p, y1p) = unit.apply(x, y);

        let dx = x1p - x0p;
        let dy = y1p - y0p;
        let d2 = dx * dx + dy * dy;
        let scale_sq = (1.0 / d2 - 0.25).max(0.0);
        let mut scale = scale_sq.sqrt();
        if sweep == large_arc {
            scale = -scale;
        }

        let cx1 = 0.5 * (x0p + x1p) - scale * dy;
        let cy1 = 0.5 * (y0p + y1p) + scale * dx;

        let th1 = (y0p - cy1).atan2(x0p - cx1);
        let th2 = (y1p - cy1).atan2(x1p - cx1);
        let mut th_arc = th2 - th1;
        if th_arc < 0.0 && sweep {
            th_arc += 2.0 * std::f64::consts::PI;
        } else if th_arc > 0.0 && !sweep {
            th_arc -= 2.0 * std::f64::consts::PI;
        }

        // Maps a unit-circle-space point back: scale by rx, ry, then apply
        // the x-axis rotation.
        let back = Transform::concat(&Transform::new_rotate(x_axis_rotation), &Transform::new_scale(rx, ry));

        let segments = (th_arc.abs() / (std::f64::consts::FRAC_PI_2)).ceil().max(1.0) as i32;
        for i in 0..segments {
            let a0 = th1 + i as f64 * th_arc / segments as f64;
            let a1 = th1 + (i + 1) as f64 * th_arc / segments as f64;
            let t = 8.0 / 6.0 * ((a1 - a0) / 4.0).tan();

            let ex = a1.cos() + cx1;
            let ey = a1.sin() + cy1;
            let c2x = ex + t * a1.sin();
            let c2y = ey - t * a1.cos();
            let c1x = a0.cos() - t * a0.sin() + cx1;
            let c1y = a0.sin() + t * a0.cos() + cy1;

            let (c1x, c1y) = back.apply(c1x, c1y);
            let (c2x, c2y) = back.apply(c2x, c2y);
            let (ex, ey) = back.apply(ex, ey);
            self.cubic_to(c1x, c1y, c2x, c2y, ex, ey);
        }
    }

    /// Exact (non-approximated) bounding box of the path's control
    /// polygon union, ignoring stroke.
    pub fn bbox(&self) -> Option<Rect> {
        if self.points.is_empty() {
            return None;
        }

        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        let mut i = 0;
        for cmd in &self.commands {
            let n = match cmd {
                PathCommand::MoveTo | PathCommand::LineTo => 1,
                PathCommand::CubicTo => 3,
                PathCommand::Close => 0,
            };

            for _ in 0..n {
                let x = self.points[i];
                let y = self.points[i + 1];
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
                i += 2;
            }
        }

        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    pub fn bbox_with_transform(&self, ts: &Transform) -> Option<Rect> {
        if self.points.is_empty() {
            return None;
        }

        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        let mut i = 0;
        for cmd in &self.commands {
            let n = match cmd {
                PathCommand::MoveTo | PathCommand::LineTo => 1,
                PathCommand::CubicTo => 3,
                PathCommand::Close => 0,
            };

            for _ in 0..n {
                let (x, y) = ts.apply(self.points[i], self.points[i + 1]);
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
                i += 2;
            }
        }

        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::FuzzyEq;

    #[test]
    fn quad_endpoints_preserved() {
        let mut p = PathData::new();
        p.move_to(0.0, 0.0);
        p.quad_to(5.0, 10.0, 10.0, 0.0);
        let pts = p.points();
        // cubic control points, then endpoint
        assert_eq!(pts.len(), 8);
        assert!((pts[6] - 10.0).abs() < 1e-9);
        assert!((pts[7] - 0.0).abs() < 1e-9);
    }

    #[test]
    fn arc_endpoint_matches() {
        let mut p = PathData::new();
        p.move_to(0.0, 0.0);
        p.arc_to(10.0, 10.0, 0.0, false, true, 10.0, 10.0);
        assert_eq!(p.commands().first(), Some(&PathCommand::MoveTo));
        assert!(p.commands().iter().any(|c| *c == PathCommand::CubicTo));

        let pts = p.points();
        let n = pts.len();
        let ex = pts[n - 2];
        let ey = pts[n - 1];
        assert!((ex - 10.0).abs() < 1e-4, "ex={}", ex);
        assert!((ey - 10.0).abs() < 1e-4, "ey={}", ey);

        let bbox = p.bbox().unwrap();
        assert!(bbox.x() >= -0.001 && bbox.y() >= -0.001);
        assert!(bbox.right() <= 10.001 && bbox.bottom() <= 10.001);
    }

    #[test]
    fn horizontal_arc_is_not_dropped() {
        // dy == 0: an OR-condition early exit here would drop pure
        // horizontal/vertical arcs entirely; this crate emits a proper arc
        // instead, per spec.md's redesign note on this exact bug.
        let mut p = PathData::new();
        p.move_to(0.0, 0.0);
        p.arc_to(5.0, 5.0, 0.0, false, true, 10.0, 0.0);
        assert!(!p.is_empty());
    }

    #[test]
    fn rect_bbox() {
        let mut p = PathData::new();
        p.push_rect(Rect::new(1.0, 2.0, 3.0, 4.0).unwrap());
        assert!(p.bbox().unwrap().fuzzy_eq(&Rect::new(1.0, 2.0, 3.0, 4.0).unwrap()));
    }
}
