// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Builds `PathData` for the basic shape elements from already-resolved
//! (unitless, user-space) geometry. Attribute parsing and percent
//! resolution happen in `render`; this module only knows geometry.

use crate::geom::{FuzzyZero, Rect};
use crate::path::PathData;

/// `rect x y width height [rx] [ry]`. Returns `None` for a non-positive
/// width/height, per SVG (such a rect renders nothing).
pub fn rect(x: f64, y: f64, width: f64, height: f64, mut rx: f64, mut ry: f64) -> Option<PathData> {
    if width <= 0.0 || height <= 0.0 {
        return None;
    }

    rx = rx.max(0.0).min(width / 2.0);
    ry = ry.max(0.0).min(height / 2.0);

    let rect = Rect::new(x, y, width, height)?;
    let mut path = PathData::new();
    if rx.is_fuzzy_zero() || ry.is_fuzzy_zero() {
        path.push_rect(rect);
    } else {
        path.push_rounded_rect(rect, rx, ry);
    }
    Some(path)
}

/// `circle`/`ellipse`. Returns `None` when either radius is zero (the
/// element draws nothing, per §4.E "circle/ellipse: zero radius skips the
/// draw").
pub fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64) -> Option<PathData> {
    if rx.is_fuzzy_zero() || ry.is_fuzzy_zero() || rx < 0.0 || ry < 0.0 {
        return None;
    }

    let mut path = PathData::new();
    path.push_ellipse(cx, cy, rx, ry);
    Some(path)
}

pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> PathData {
    let mut path = PathData::new();
    path.move_to(x1, y1);
    path.line_to(x2, y2);
    path
}

/// Shared by `polyline`/`polygon`; `close` appends a `Close` command
/// (only `polygon` wants that).
pub fn points(pts: &[(f64, f64)], close: bool) -> Option<PathData> {
    if pts.len() < 2 {
        return None;
    }

    let mut path = PathData::new();
    for (i, &(x, y)) in pts.iter().enumerate() {
        if i == 0 {
            path.move_to(x, y);
        } else {
            path.line_to(x, y);
        }
    }

    if close {
        path.close();
    }

    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::FuzzyEq;

    #[test]
    fn rect_clamps_radii() {
        let path = rect(0.0, 0.0, 10.0, 4.0, 100.0, 100.0).unwrap();
        // rx clamped to 5, ry clamped to 2: bbox should still be the full rect.
        assert!(path.bbox().unwrap().fuzzy_eq(&Rect::new(0.0, 0.0, 10.0, 4.0).unwrap()));
    }

    #[test]
    fn zero_radius_ellipse_skips() {
        assert!(ellipse(0.0, 0.0, 0.0, 5.0).is_none());
    }

    #[test]
    fn polygon_closes_polyline_does_not() {
        let pts = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)];
        let polygon = points(&pts, true).unwrap();
        let polyline = points(&pts, false).unwrap();
        assert_eq!(polygon.commands().last(), Some(&crate::path::PathCommand::Close));
        assert_ne!(polyline.commands().last(), Some(&crate::path::PathCommand::Close));
    }
}
