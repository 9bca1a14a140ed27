// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns a parsed `values::Paint` into a `canvas::ResolvedPaint`: follows
//! `url(#id)` references, calls the palette for `var()`, and resolves
//! `currentColor`.

use super::gradient;
use super::viewport::Viewport;
use crate::canvas::{GradientStop, LinearGradient, Palette, RadialGradient, ResolvedPaint};
use crate::geom::{Rect, Transform};
use crate::tree::{AttributeId, ElementId, Node};
use crate::values::{self, Color, FallbackColor, Paint, Units};

/// `None` means "skip the draw" (paint resolved to `none`, or to an
/// unusable reference with no usable fallback). `scope` is the element the
/// paint was read from, used only to look up `url(#id)` targets in the same
/// document.
pub fn resolve(
    scope: Node,
    paint: &Paint,
    current_color: Color,
    palette: &dyn Palette,
    bbox: Rect,
    viewport: Viewport,
    dpi: f64,
) -> Option<ResolvedPaint> {
    match paint {
        Paint::None => None,
        Paint::Color(c) => Some(ResolvedPaint::Color(*c)),
        Paint::CurrentColor => Some(ResolvedPaint::Color(current_color)),
        Paint::Var { name, fallback } => match palette.resolve(name) {
            Some(c) => Some(ResolvedPaint::Color(c)),
            None => resolve_fallback(*fallback, current_color),
        },
        Paint::Ref { id, fallback } => match scope.lookup_id(id) {
            Some(target) => resolve_ref(target, current_color, palette, bbox, viewport, dpi)
                .or_else(|| resolve_fallback(*fallback, current_color)),
            None => {
                log::warn!("paint reference #{} not found, using fallback", id);
                resolve_fallback(*fallback, current_color)
            }
        },
    }
}

fn resolve_fallback(fallback: Option<FallbackColor>, current_color: Color) -> Option<ResolvedPaint> {
    match fallback {
        Some(FallbackColor::Color(c)) => Some(ResolvedPaint::Color(c)),
        Some(FallbackColor::CurrentColor) => Some(ResolvedPaint::Color(current_color)),
        Some(FallbackColor::None) | None => None,
    }
}

fn resolve_ref(
    target: Node,
    current_color: Color,
    palette: &dyn Palette,
    bbox: Rect,
    viewport: Viewport,
    dpi: f64,
) -> Option<ResolvedPaint> {
    match target.tag_name() {
        ElementId::SolidColor => {
            let color = target.find_attribute(AttributeId::SolidColor).and_then(values::parse_color).unwrap_or_else(Color::black);
            let opacity = target.find_attribute(AttributeId::SolidOpacity).and_then(values::parse_opacity).unwrap_or(1.0);
            Some(ResolvedPaint::Color(scale_alpha(color, opacity)))
        }
        ElementId::LinearGradient => {
            let g = gradient::resolve_linear(target)?;
            let transform = gradient_space_transform(g.transform, g.units, bbox, viewport, dpi);
            Some(ResolvedPaint::LinearGradient(LinearGradient {
                x1: g.x1,
                y1: g.y1,
                x2: g.x2,
                y2: g.y2,
                transform,
                spread_method: g.spread_method,
                stops: g.stops,
            }))
        }
        ElementId::RadialGradient => {
            let g = gradient::resolve_radial(target)?;
            let transform = gradient_space_transform(g.transform, g.units, bbox, viewport, dpi);
            Some(ResolvedPaint::RadialGradient(RadialGradient {
                cx: g.cx,
                cy: g.cy,
                r: g.r,
                fx: g.fx,
                fy: g.fy,
                transform,
                spread_method: g.spread_method,
                stops: g.stops,
            }))
        }
        _ => {
            let _ = (current_color, palette);
            None
        }
    }
}

fn gradient_space_transform(gradient_transform: Transform, units: Units, bbox: Rect, viewport: Viewport, _dpi: f64) -> Transform {
    match units {
        Units::ObjectBoundingBox => {
            let mut t = Transform::new_translate(bbox.x(), bbox.y());
            t.append(&Transform::new_scale(bbox.width().max(1e-9), bbox.height().max(1e-9)));
            let mut full = gradient_transform;
            full.append(&t);
            full
        }
        Units::UserSpaceOnUse => {
            let _ = viewport;
            gradient_transform
        }
    }
}

fn scale_alpha(c: Color, opacity: f64) -> Color {
    let a = (c.alpha as f64 * opacity).round().max(0.0).min(255.0) as u8;
    Color::new_rgba(c.red, c.green, c.blue, a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::NoPalette;
    use crate::parser::parse;
    use crate::values::parse_paint;

    #[test]
    fn plain_color_resolves_directly() {
        let doc = parse("<svg/>").unwrap();
        let paint = parse_paint("#ff0000").unwrap();
        let resolved = resolve(
            doc.root().unwrap(),
            &paint,
            Color::black(),
            &NoPalette,
            Rect::new(0.0, 0.0, 1.0, 1.0).unwrap(),
            Viewport::new(10.0, 10.0),
            96.0,
        );
        assert_eq!(resolved, Some(ResolvedPaint::Color(Color::new_rgb(255, 0, 0))));
    }

    #[test]
    fn missing_ref_falls_back() {
        let doc = parse("<svg/>").unwrap();
        let paint = parse_paint("url(#missing, red)").unwrap();
        let resolved = resolve(
            doc.root().unwrap(),
            &paint,
            Color::black(),
            &NoPalette,
            Rect::new(0.0, 0.0, 1.0, 1.0).unwrap(),
            Viewport::new(10.0, 10.0),
            96.0,
        );
        assert_eq!(resolved, Some(ResolvedPaint::Color(Color::new_rgb(255, 0, 0))));
    }

    #[test]
    fn missing_ref_no_fallback_skips_draw() {
        let doc = parse("<svg/>").unwrap();
        let paint = parse_paint("url(#missing)").unwrap();
        let resolved = resolve(
            doc.root().unwrap(),
            &paint,
            Color::black(),
            &NoPalette,
            Rect::new(0.0, 0.0, 1.0, 1.0).unwrap(),
            Viewport::new(10.0, 10.0),
            96.0,
        );
        assert_eq!(resolved, None);
    }
}
