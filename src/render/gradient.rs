// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Gradient `xlink:href` inheritance: walks the reference chain and, for
//! each slot a gradient needs, takes the value from the first ancestor on
//! the chain that provides it.

use crate::canvas::{GradientStop, SpreadMethod as CanvasSpreadMethod};
use crate::geom::Transform;
use crate::tree::{AttributeId, ElementId, Node};
use crate::values::{self, SpreadMethod, Units};

/// Recursion bound for `xlink:href` chains; well past anything a real
/// document would use, just a backstop against pathological input.
const MAX_CHAIN: u32 = 64;

pub struct ResolvedLinear {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub transform: Transform,
    pub units: Units,
    pub spread_method: CanvasSpreadMethod,
    pub stops: Vec<GradientStop>,
}

pub struct ResolvedRadial {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fx: f64,
    pub fy: f64,
    pub transform: Transform,
    pub units: Units,
    pub spread_method: CanvasSpreadMethod,
    pub stops: Vec<GradientStop>,
}

fn chain(node: Node) -> impl Iterator<Item = Node> {
    let mut current = Some(node);
    let mut steps = 0;
    std::iter::from_fn(move || {
        let n = current?;
        if steps >= MAX_CHAIN {
            current = None;
            return None;
        }
        steps += 1;
        current = match n.tag_name() {
            ElementId::LinearGradient | ElementId::RadialGradient => n.resolve_href(),
            _ => None,
        };
        Some(n)
    })
}

fn first_attr(node: Node, attr: AttributeId) -> Option<&str> {
    chain(node).find_map(|n| n.attribute(attr))
}

fn collect_stops(node: Node) -> Option<Vec<GradientStop>> {
    chain(node).find_map(|n| {
        let stops: Vec<GradientStop> = n
            .children()
            .filter(|c| c.tag_name() == ElementId::Stop)
            .map(|stop| {
                let offset = stop
                    .attribute(AttributeId::Offset)
                    .and_then(|text| {
                        let mut s = values::Stream::from(text.trim());
                        let (v, is_percent) = s.parse_number_or_percent()?;
                        Some(if is_percent { v / 100.0 } else { v })
                    })
                    .unwrap_or(0.0)
                    .max(0.0)
                    .min(1.0);
                let color = stop
                    .find_attribute(AttributeId::StopColor)
                    .and_then(values::parse_color)
                    .unwrap_or_else(values::Color::black);
                let opacity =
                    stop.find_attribute(AttributeId::StopOpacity).and_then(values::parse_opacity).unwrap_or(1.0);
                GradientStop { offset, color: with_alpha(color, opacity) }
            })
            .collect();

        if stops.is_empty() {
            None
        } else {
            Some(stops)
        }
    })
}

fn with_alpha(c: values::Color, opacity: f64) -> values::Color {
    let a = (c.alpha as f64 / 255.0 * opacity * 255.0).round().max(0.0).min(255.0) as u8;
    values::Color::new_rgba(c.red, c.green, c.blue, a)
}

fn shared_transform(node: Node) -> Transform {
    first_attr(node, AttributeId::GradientTransform)
        .and_then(values::parse_transform_list)
        .unwrap_or_else(Transform::identity)
}

fn shared_units(node: Node) -> Units {
    match first_attr(node, AttributeId::GradientUnits) {
        Some(text) => values::parse_units(text, Units::ObjectBoundingBox),
        None => Units::ObjectBoundingBox,
    }
}

fn shared_spread(node: Node) -> CanvasSpreadMethod {
    match first_attr(node, AttributeId::SpreadMethod).and_then(values::parse_spread_method) {
        Some(SpreadMethod::Reflect) => CanvasSpreadMethod::Reflect,
        Some(SpreadMethod::Repeat) => CanvasSpreadMethod::Repeat,
        _ => CanvasSpreadMethod::Pad,
    }
}

/// Resolves a `<linearGradient>` node through its `xlink:href` chain.
/// Returns `None` when no ancestor on the chain provides any stops.
pub fn resolve_linear(node: Node) -> Option<ResolvedLinear> {
    let stops = collect_stops(node)?;

    let x1 = find_percent_attr(node, AttributeId::X1).unwrap_or(0.0);
    let y1 = find_percent_attr(node, AttributeId::Y1).unwrap_or(0.0);
    let x2 = find_percent_attr(node, AttributeId::X2).unwrap_or(1.0);
    let y2 = find_percent_attr(node, AttributeId::Y2).unwrap_or(0.0);

    Some(ResolvedLinear {
        x1,
        y1,
        x2,
        y2,
        transform: shared_transform(node),
        units: shared_units(node),
        spread_method: shared_spread(node),
        stops,
    })
}

/// Resolves a `<radialGradient>` node through its `xlink:href` chain.
pub fn resolve_radial(node: Node) -> Option<ResolvedRadial> {
    let stops = collect_stops(node)?;

    let cx = find_percent_attr(node, AttributeId::Cx).unwrap_or(0.5);
    let cy = find_percent_attr(node, AttributeId::Cy).unwrap_or(0.5);
    let r = find_percent_attr(node, AttributeId::R).unwrap_or(0.5);
    let fx = find_percent_attr(node, AttributeId::Fx).unwrap_or(cx);
    let fy = find_percent_attr(node, AttributeId::Fy).unwrap_or(cy);

    Some(ResolvedRadial {
        cx,
        cy,
        r,
        fx,
        fy,
        transform: shared_transform(node),
        units: shared_units(node),
        spread_method: shared_spread(node),
        stops,
    })
}

/// Reads a gradient geometry slot as a bare `[0, 1]` fraction: in
/// `objectBoundingBox` space (the common case) a percent and a unitless
/// number mean the same thing, so this only needs the number, not a full
/// `Length`.
fn find_percent_attr(node: Node, attr: AttributeId) -> Option<f64> {
    first_attr(node, attr).and_then(|text| {
        let mut s = values::Stream::from(text.trim());
        let (v, is_percent) = s.parse_number_or_percent()?;
        Some(if is_percent { v / 100.0 } else { v })
    })
}
