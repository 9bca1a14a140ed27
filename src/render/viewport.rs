// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Viewport bookkeeping: the current `(width, height)` percent-resolution
//! basis, and the `viewBox`/`preserveAspectRatio` matrix for nested `<svg>`.

use crate::geom::Transform;
use crate::tree::{AttributeId, Node};
use crate::values::{self, Length};

/// The current percent-resolution basis, carried down the recursion and
/// replaced whenever a nested `<svg>` establishes a new one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Viewport { width, height }
    }

    /// "x axis" percent resolution: against viewport width.
    pub fn resolve_x(&self, len: Length, dpi: f64, font_size: f64) -> f64 {
        len.to_user_units(dpi, font_size, self.width)
    }

    /// "y axis" percent resolution: against viewport height.
    pub fn resolve_y(&self, len: Length, dpi: f64, font_size: f64) -> f64 {
        len.to_user_units(dpi, font_size, self.height)
    }

    /// "other" percent resolution (radii and similarly axis-less lengths):
    /// the SVG diagonal/sqrt(2) rule.
    pub fn resolve_other(&self, len: Length, dpi: f64, font_size: f64) -> f64 {
        let diagonal = (self.width * self.width + self.height * self.height).sqrt() / std::f64::consts::SQRT_2;
        len.to_user_units(dpi, font_size, diagonal)
    }
}

fn parse_length_attr(node: Node, attr: AttributeId) -> Option<Length> {
    values::parse_length(node.attribute(attr)?)
}

/// Reads `x`/`y`/`width`/`height` as lengths resolved against `viewport`,
/// defaulting absent `width`/`height` to the full viewport (used by both
/// root sizing and nested `<svg>`).
pub fn read_xywh(node: Node, viewport: Viewport, dpi: f64) -> (f64, f64, f64, f64) {
    let x = parse_length_attr(node, AttributeId::X).map(|l| viewport.resolve_x(l, dpi, 0.0)).unwrap_or(0.0);
    let y = parse_length_attr(node, AttributeId::Y).map(|l| viewport.resolve_y(l, dpi, 0.0)).unwrap_or(0.0);
    let width = parse_length_attr(node, AttributeId::Width)
        .map(|l| viewport.resolve_x(l, dpi, 0.0))
        .unwrap_or(viewport.width);
    let height = parse_length_attr(node, AttributeId::Height)
        .map(|l| viewport.resolve_y(l, dpi, 0.0))
        .unwrap_or(viewport.height);
    (x, y, width, height)
}

/// Builds the `viewBox -> viewport` matrix for an element that declares a
/// `viewBox`, or `None` if it doesn't have one.
pub fn view_box_transform(node: Node, viewport_w: f64, viewport_h: f64) -> Option<Transform> {
    let view_box = values::parse_view_box(node.attribute(AttributeId::ViewBox)?)?;
    let aspect = node
        .attribute(AttributeId::PreserveAspectRatio)
        .and_then(values::parse_aspect_ratio)
        .unwrap_or_default();
    Some(values::view_box_to_viewport_transform(view_box, aspect, viewport_w, viewport_h))
}
