// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The recursive render traversal: the three modes (display/clipping/
//! bounding), inherited property lookup, coordinate-system management,
//! paint resolution, clip-path nesting, `<use>` indirection, and
//! `viewBox`/`preserveAspectRatio` composition.

mod clip;
mod gradient;
mod paint;
mod use_node;
mod viewport;

pub use viewport::Viewport;

use crate::canvas::{BlendMode, Canvas, NoPalette, Palette, ResolvedPaint, StrokeData};
use crate::geom::{Rect, Transform};
use crate::path::PathData;
use crate::shapes;
use crate::tree::{AttributeId, Document, ElementId, Node};
use crate::values::{self, Color, FillRule, LineCap, LineJoin, Units, Visibility};
use use_node::Rebind;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum RenderMode {
    Display,
    Bounding,
    Clipping,
}

struct Ctx<'c, C: Canvas> {
    canvas: &'c mut C,
    palette: &'c dyn Palette,
    dpi: f64,
    mode: RenderMode,
}

struct NullCanvas;

impl Canvas for NullCanvas {
    type Image = ();
}

/// Renders `id` (or the document root when `id` is `None`) into `canvas`.
/// `viewport` is the document's intrinsic `(width, height)`; `current_color`
/// seeds the `color` property inherited chain.
pub fn render<C: Canvas>(
    doc: &Document,
    canvas: &mut C,
    palette: &dyn Palette,
    dpi: f64,
    viewport: Viewport,
    current_color: Color,
    id: Option<&str>,
) {
    let target = match id {
        Some(id) => doc.by_id(id),
        None => doc.root(),
    };
    let target = match target {
        Some(t) => t,
        None => return,
    };

    let mut ctx = Ctx { canvas, palette, dpi, mode: RenderMode::Display };
    let mut accum = None;
    render_node(&mut ctx, target, Transform::identity(), viewport, current_color, &[], true, &mut accum);
}

/// Computes the tight bounding box of `id` (or the document root) without
/// issuing any canvas calls.
pub fn rect(doc: &Document, dpi: f64, viewport: Viewport, id: Option<&str>) -> Option<Rect> {
    let target = match id {
        Some(id) => doc.by_id(id),
        None => doc.root(),
    };
    let target = target?;

    let mut null_canvas = NullCanvas;
    let no_palette = NoPalette;
    let mut ctx = Ctx { canvas: &mut null_canvas, palette: &no_palette, dpi, mode: RenderMode::Bounding };
    let mut accum = None;
    render_node(&mut ctx, target, Transform::identity(), viewport, Color::black(), &[], true, &mut accum);
    accum
}

/// Renders one frame: `display:none`/opacity/transform/clip-path handling,
/// element-specific content, and bbox accumulation into `parent_accum`.
/// Returns `false` to abort the remaining traversal (a canvas callback
/// reported failure); the caller still finishes this frame's own cleanup
/// (group pop, bbox accumulation) before propagating the abort upward.
fn render_node<C: Canvas>(
    ctx: &mut Ctx<C>,
    node: Node,
    parent_ctm: Transform,
    viewport: Viewport,
    current_color: Color,
    rebinds: &[Rebind],
    is_root: bool,
    parent_accum: &mut Option<Rect>,
) -> bool {
    if node.attribute(AttributeId::Display).map(values::is_display_none).unwrap_or(false) {
        return true;
    }

    let opacity = if ctx.mode == RenderMode::Display {
        node.attribute(AttributeId::Opacity).and_then(values::parse_opacity).unwrap_or(1.0)
    } else {
        1.0
    };

    let transform_attr = parse_transform_attr(node);

    let (local, child_viewport) = compose_local(ctx, node, transform_attr, viewport, is_root);

    let mut ctm = parent_ctm;
    ctm.append(&local);

    let current_color = node.attribute(AttributeId::Color).and_then(values::parse_color).unwrap_or(current_color);

    let clip_target = if ctx.mode != RenderMode::Clipping { clip::resolve(node) } else { None };

    let has_children = element_has_children(node);
    let push = ctx.mode == RenderMode::Display && (clip_target.is_some() || (opacity < 1.0 && has_children));
    if push {
        ctx.canvas.push_group(opacity, BlendMode::SrcOver);
    }
    let paint_alpha = if push { 1.0 } else { opacity };

    let mut local_bbox: Option<Rect> = None;
    let cont = match node.tag_name() {
        ElementId::Use => render_use(ctx, node, ctm, viewport, current_color, rebinds, &mut local_bbox),
        ElementId::Svg | ElementId::G => {
            render_container(ctx, node, ctm, child_viewport, current_color, rebinds, &mut local_bbox)
        }
        ElementId::Rect
        | ElementId::Circle
        | ElementId::Ellipse
        | ElementId::Line
        | ElementId::Polyline
        | ElementId::Polygon
        | ElementId::Path => {
            render_shape(ctx, node, ctm, viewport, current_color, paint_alpha, rebinds, &mut local_bbox)
        }
        _ => true,
    };

    if let Some(clip_node) = clip_target {
        let clip_bbox = render_clip_mask(ctx, clip_node, ctm, viewport, local_bbox);
        local_bbox = match (local_bbox, clip_bbox) {
            (Some(a), Some(b)) => Some(a.intersect(&b)),
            _ => None,
        };
    }

    if push {
        ctx.canvas.pop_group(opacity, BlendMode::SrcOver);
    }

    if let Some(bbox) = local_bbox {
        let mapped = local.map_rect(bbox);
        *parent_accum = Some(match *parent_accum {
            Some(acc) => acc.unite(&mapped),
            None => mapped,
        });
    }

    cont
}

fn element_has_children(node: Node) -> bool {
    match node.tag_name() {
        ElementId::Use => node
            .resolve_href()
            .map(|t| matches!(t.tag_name(), ElementId::G | ElementId::Svg) || t.children().next().is_some())
            .unwrap_or(false),
        _ => node.children().next().is_some(),
    }
}

/// Folds the element's own `transform` attribute together with any
/// type-specific coordinate-system change (`<use>`'s `x`/`y`, nested
/// `<svg>`'s `x`/`y` + `viewBox`) into a single matrix mapping this frame's
/// local space into its parent's. Also returns the viewport this frame's
/// *children* resolve percent lengths against (unchanged except for a
/// `<svg>` establishing a new one).
fn compose_local<C: Canvas>(
    ctx: &Ctx<C>,
    node: Node,
    transform_attr: Transform,
    viewport: Viewport,
    is_root: bool,
) -> (Transform, Viewport) {
    let mut local = transform_attr;
    match node.tag_name() {
        ElementId::Use => {
            let (x, y) = use_node::resolve_translation(node, viewport, ctx.dpi);
            local.append(&Transform::new_translate(x, y));
            (local, viewport)
        }
        ElementId::Svg if is_root => {
            if let Some(vb) = viewport::view_box_transform(node, viewport.width, viewport.height) {
                local.append(&vb);
            }
            (local, viewport)
        }
        ElementId::Svg => {
            let (x, y, w, h) = viewport::read_xywh(node, viewport, ctx.dpi);
            local.append(&Transform::new_translate(x, y));
            if let Some(vb) = viewport::view_box_transform(node, w, h) {
                local.append(&vb);
            }
            (local, Viewport::new(w, h))
        }
        _ => (local, viewport),
    }
}

fn render_container<C: Canvas>(
    ctx: &mut Ctx<C>,
    node: Node,
    ctm: Transform,
    child_viewport: Viewport,
    current_color: Color,
    rebinds: &[Rebind],
    local_bbox: &mut Option<Rect>,
) -> bool {
    let mut accum = None;
    let mut cont = true;
    for child in node.children().filter(|c| c.tag_name().is_renderable()) {
        if !render_node(ctx, child, ctm, child_viewport, current_color, rebinds, false, &mut accum) {
            cont = false;
            break;
        }
    }
    *local_bbox = accum;
    cont
}

fn render_use<C: Canvas>(
    ctx: &mut Ctx<C>,
    node: Node,
    ctm: Transform,
    viewport: Viewport,
    current_color: Color,
    rebinds: &[Rebind],
    local_bbox: &mut Option<Rect>,
) -> bool {
    let target = match node.resolve_href() {
        Some(t) => t,
        None => return true,
    };
    if !target.tag_name().is_renderable() {
        return true;
    }

    let mut new_rebinds = rebinds.to_vec();
    new_rebinds.push(Rebind { referenced: target.id(), effective_parent: node.id() });

    let mut accum = None;
    let cont = render_node(ctx, target, ctm, viewport, current_color, &new_rebinds, false, &mut accum);
    *local_bbox = accum;
    cont
}

fn render_clip_mask<C: Canvas>(
    ctx: &mut Ctx<C>,
    clip_node: Node,
    base_ctm: Transform,
    viewport: Viewport,
    content_bbox: Option<Rect>,
) -> Option<Rect> {
    let mut composed_local = if clip::units(clip_node) == Units::ObjectBoundingBox {
        match content_bbox {
            Some(bbox) => {
                let mut t = Transform::new_translate(bbox.x(), bbox.y());
                t.append(&Transform::new_scale(bbox.width().max(1e-9), bbox.height().max(1e-9)));
                t
            }
            None => return None,
        }
    } else {
        Transform::identity()
    };

    composed_local.append(&parse_transform_attr(clip_node));

    let mut local_ctm = base_ctm;
    local_ctm.append(&composed_local);

    let push_display = ctx.mode == RenderMode::Display;
    if push_display {
        ctx.canvas.push_group(1.0, BlendMode::DstIn);
    }

    let mut accum = None;
    {
        let mut sub_ctx = Ctx { canvas: &mut *ctx.canvas, palette: ctx.palette, dpi: ctx.dpi, mode: RenderMode::Clipping };
        for child in clip_node.children().filter(|c| c.tag_name().is_renderable()) {
            render_node(&mut sub_ctx, child, local_ctm, viewport, Color::black(), &[], false, &mut accum);
        }
    }

    if push_display {
        ctx.canvas.pop_group(1.0, BlendMode::DstIn);
    }

    accum.map(|a| composed_local.map_rect(a))
}

/// Reads and parses the `transform` attribute, logging and falling back to
/// the identity matrix on a malformed value (an absent attribute is not a
/// failure and logs nothing).
fn parse_transform_attr(node: Node) -> Transform {
    match node.attribute(AttributeId::Transform) {
        Some(text) => values::parse_transform_list(text).unwrap_or_else(|| {
            log::warn!("malformed transform on {}: {:?}", node_label(node), text);
            Transform::identity()
        }),
        None => Transform::identity(),
    }
}

/// A short description of `node` for log messages: its `id` if it has one,
/// otherwise its tag name.
fn node_label(node: Node) -> String {
    match node.attribute(AttributeId::Id) {
        Some(id) => format!("#{}", id),
        None => format!("<{:?}>", node.tag_name()),
    }
}

fn render_shape<C: Canvas>(
    ctx: &mut Ctx<C>,
    node: Node,
    ctm: Transform,
    viewport: Viewport,
    current_color: Color,
    paint_alpha: f64,
    rebinds: &[Rebind],
    local_bbox: &mut Option<Rect>,
) -> bool {
    let path = match build_path(node, viewport, ctx.dpi) {
        Some(p) => p,
        None => return true,
    };
    *local_bbox = path.bbox();

    match ctx.mode {
        RenderMode::Bounding => {
            if let Some(stroke) = stroke_data(node, rebinds, viewport, ctx.dpi) {
                if let Some(bbox) = *local_bbox {
                    let delta = stroke_inflate(&stroke);
                    *local_bbox = Some(bbox.inflate(delta, delta));
                }
            }
            true
        }
        RenderMode::Clipping => {
            let fill_rule =
                use_node::find_attribute(node, rebinds, AttributeId::ClipRule).and_then(values::parse_fill_rule).unwrap_or_default();
            let paint = ResolvedPaint::Color(Color::black());
            ctx.canvas.fill_path(&path, ctm, fill_rule, &paint)
        }
        RenderMode::Display => render_shape_display(ctx, node, &path, ctm, viewport, current_color, paint_alpha, rebinds),
    }
}

fn render_shape_display<C: Canvas>(
    ctx: &mut Ctx<C>,
    node: Node,
    path: &PathData,
    ctm: Transform,
    viewport: Viewport,
    current_color: Color,
    paint_alpha: f64,
    rebinds: &[Rebind],
) -> bool {
    let visible = use_node::find_attribute(node, rebinds, AttributeId::Visibility)
        .and_then(values::parse_visibility)
        .map(|v| v != Visibility::Hidden)
        .unwrap_or(true);
    if !visible {
        return true;
    }

    let bbox = path.bbox().unwrap_or_else(Rect::zero);

    let mut ok = true;

    let fill_text = use_node::find_attribute(node, rebinds, AttributeId::Fill);
    let fill_paint = fill_text.and_then(values::parse_paint).unwrap_or(values::Paint::Color(Color::black()));
    let fill_opacity = use_node::find_attribute(node, rebinds, AttributeId::FillOpacity).and_then(values::parse_opacity).unwrap_or(1.0);
    if let Some(resolved) = paint::resolve(node, &fill_paint, current_color, ctx.palette, bbox, viewport, ctx.dpi) {
        let resolved = apply_alpha(resolved, paint_alpha * fill_opacity);
        let fill_rule =
            use_node::find_attribute(node, rebinds, AttributeId::FillRule).and_then(values::parse_fill_rule).unwrap_or_default();
        if !ctx.canvas.fill_path(path, ctm, fill_rule, &resolved) {
            log::warn!("fill_path failed for {}", node_label(node));
            ok = false;
        }
    }

    if let Some(stroke) = stroke_data(node, rebinds, viewport, ctx.dpi) {
        let stroke_text = use_node::find_attribute(node, rebinds, AttributeId::Stroke);
        if let Some(stroke_paint) = stroke_text.and_then(values::parse_paint) {
            let stroke_opacity =
                use_node::find_attribute(node, rebinds, AttributeId::StrokeOpacity).and_then(values::parse_opacity).unwrap_or(1.0);
            if let Some(resolved) = paint::resolve(node, &stroke_paint, current_color, ctx.palette, bbox, viewport, ctx.dpi) {
                let resolved = apply_alpha(resolved, paint_alpha * stroke_opacity);
                let dashes = dash_array(node, rebinds, viewport, ctx.dpi);
                if !ctx.canvas.stroke_path(path, ctm, &stroke, dashes.as_deref(), &resolved) {
                    log::warn!("stroke_path failed for {}", node_label(node));
                    ok = false;
                }
            }
        }
    }

    ok
}

fn build_path(node: Node, viewport: Viewport, dpi: f64) -> Option<PathData> {
    match node.tag_name() {
        ElementId::Rect => {
            let x = len_x(node, AttributeId::X, viewport, dpi).unwrap_or(0.0);
            let y = len_y(node, AttributeId::Y, viewport, dpi).unwrap_or(0.0);
            let width = len_x(node, AttributeId::Width, viewport, dpi)?;
            let height = len_y(node, AttributeId::Height, viewport, dpi)?;
            let rx_attr = len_other(node, AttributeId::Rx, viewport, dpi);
            let ry_attr = len_other(node, AttributeId::Ry, viewport, dpi);
            let (rx, ry) = match (rx_attr, ry_attr) {
                (Some(rx), Some(ry)) => (rx, ry),
                (Some(rx), None) => (rx, rx),
                (None, Some(ry)) => (ry, ry),
                (None, None) => (0.0, 0.0),
            };
            shapes::rect(x, y, width, height, rx, ry)
        }
        ElementId::Circle => {
            let cx = len_x(node, AttributeId::Cx, viewport, dpi).unwrap_or(0.0);
            let cy = len_y(node, AttributeId::Cy, viewport, dpi).unwrap_or(0.0);
            let r = len_other(node, AttributeId::R, viewport, dpi)?;
            shapes::ellipse(cx, cy, r, r)
        }
        ElementId::Ellipse => {
            let cx = len_x(node, AttributeId::Cx, viewport, dpi).unwrap_or(0.0);
            let cy = len_y(node, AttributeId::Cy, viewport, dpi).unwrap_or(0.0);
            let rx = len_other(node, AttributeId::Rx, viewport, dpi)?;
            let ry = len_other(node, AttributeId::Ry, viewport, dpi)?;
            shapes::ellipse(cx, cy, rx, ry)
        }
        ElementId::Line => {
            let x1 = len_x(node, AttributeId::X1, viewport, dpi).unwrap_or(0.0);
            let y1 = len_y(node, AttributeId::Y1, viewport, dpi).unwrap_or(0.0);
            let x2 = len_x(node, AttributeId::X2, viewport, dpi).unwrap_or(0.0);
            let y2 = len_y(node, AttributeId::Y2, viewport, dpi).unwrap_or(0.0);
            Some(shapes::line(x1, y1, x2, y2))
        }
        ElementId::Polyline => {
            let pts = node.attribute(AttributeId::Points).and_then(values::parse_points)?;
            shapes::points(&pts, false)
        }
        ElementId::Polygon => {
            let pts = node.attribute(AttributeId::Points).and_then(values::parse_points)?;
            shapes::points(&pts, true)
        }
        ElementId::Path => {
            let d = node.attribute(AttributeId::D)?;
            let path = values::parse_path(d);
            if path.is_none() {
                log::warn!("malformed path data on {}", node_label(node));
            }
            path
        }
        _ => None,
    }
}

fn len_x(node: Node, attr: AttributeId, viewport: Viewport, dpi: f64) -> Option<f64> {
    node.attribute(attr).and_then(values::parse_length).map(|l| viewport.resolve_x(l, dpi, 0.0))
}

fn len_y(node: Node, attr: AttributeId, viewport: Viewport, dpi: f64) -> Option<f64> {
    node.attribute(attr).and_then(values::parse_length).map(|l| viewport.resolve_y(l, dpi, 0.0))
}

fn len_other(node: Node, attr: AttributeId, viewport: Viewport, dpi: f64) -> Option<f64> {
    node.attribute(attr).and_then(values::parse_length).map(|l| viewport.resolve_other(l, dpi, 0.0))
}

fn stroke_data(node: Node, rebinds: &[Rebind], viewport: Viewport, dpi: f64) -> Option<StrokeData> {
    let stroke = use_node::find_attribute(node, rebinds, AttributeId::Stroke)?;
    if stroke.trim() == "none" {
        return None;
    }

    let width = use_node::find_attribute(node, rebinds, AttributeId::StrokeWidth)
        .and_then(values::parse_length)
        .map(|l| viewport.resolve_other(l, dpi, 0.0))
        .unwrap_or(1.0);
    if width <= 0.0 {
        return None;
    }

    let miterlimit = use_node::find_attribute(node, rebinds, AttributeId::StrokeMiterlimit)
        .and_then(values::parse_number)
        .unwrap_or(4.0);
    let dashoffset = use_node::find_attribute(node, rebinds, AttributeId::StrokeDashoffset)
        .and_then(values::parse_length)
        .map(|l| viewport.resolve_other(l, dpi, 0.0))
        .unwrap_or(0.0);
    let linecap =
        use_node::find_attribute(node, rebinds, AttributeId::StrokeLinecap).and_then(values::parse_line_cap).unwrap_or_default();
    let linejoin =
        use_node::find_attribute(node, rebinds, AttributeId::StrokeLinejoin).and_then(values::parse_line_join).unwrap_or_default();

    Some(StrokeData { width, miterlimit, dashoffset, linecap, linejoin })
}

fn stroke_inflate(stroke: &StrokeData) -> f64 {
    let caplimit =
        if stroke.linecap == LineCap::Square { stroke.width / 2.0 * std::f64::consts::SQRT_2 } else { stroke.width / 2.0 };
    let joinlimit = if stroke.linejoin == LineJoin::Miter { stroke.width / 2.0 * stroke.miterlimit } else { stroke.width / 2.0 };
    caplimit.max(joinlimit)
}

/// Whitespace/comma-separated list of lengths; a parse failure mid-list
/// truncates the array at that point rather than rejecting it outright.
fn dash_array(node: Node, rebinds: &[Rebind], viewport: Viewport, dpi: f64) -> Option<Vec<f64>> {
    let text = use_node::find_attribute(node, rebinds, AttributeId::StrokeDasharray)?;
    if text.trim() == "none" {
        return None;
    }

    let mut out = Vec::new();
    for tok in text.split(|c: char| c == ',' || c.is_whitespace()).filter(|s| !s.is_empty()) {
        match values::parse_length(tok) {
            Some(l) => out.push(viewport.resolve_other(l, dpi, 0.0)),
            None => break,
        }
    }

    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

fn apply_alpha(paint: ResolvedPaint, alpha: f64) -> ResolvedPaint {
    if (alpha - 1.0).abs() < 1e-9 {
        return paint;
    }
    match paint {
        ResolvedPaint::Color(c) => ResolvedPaint::Color(scale_color_alpha(c, alpha)),
        ResolvedPaint::LinearGradient(mut g) => {
            for s in &mut g.stops {
                s.color = scale_color_alpha(s.color, alpha);
            }
            ResolvedPaint::LinearGradient(g)
        }
        ResolvedPaint::RadialGradient(mut g) => {
            for s in &mut g.stops {
                s.color = scale_color_alpha(s.color, alpha);
            }
            ResolvedPaint::RadialGradient(g)
        }
    }
}

fn scale_color_alpha(c: Color, alpha: f64) -> Color {
    let a = (c.alpha as f64 * alpha).round().max(0.0).min(255.0) as u8;
    Color::new_rgba(c.red, c.green, c.blue, a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{GradientStop, LinearGradient};
    use crate::parser::parse;
    use crate::path::PathCommand;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recording {
        fills: Vec<(Transform, FillRule, ResolvedPaint)>,
        strokes: Vec<(Transform, ResolvedPaint)>,
        groups: Vec<(bool, f64, BlendMode)>,
    }

    struct RecordingCanvas(RefCell<Recording>);

    impl Canvas for RecordingCanvas {
        type Image = ();

        fn fill_path(&mut self, path: &PathData, matrix: Transform, fill_rule: FillRule, paint: &ResolvedPaint) -> bool {
            let _ = path;
            self.0.borrow_mut().fills.push((matrix, fill_rule, paint.clone()));
            true
        }

        fn stroke_path(
            &mut self,
            path: &PathData,
            matrix: Transform,
            _stroke: &StrokeData,
            _dasharray: Option<&[f64]>,
            paint: &ResolvedPaint,
        ) -> bool {
            let _ = path;
            self.0.borrow_mut().strokes.push((matrix, paint.clone()));
            true
        }

        fn push_group(&mut self, opacity: f64, blend_mode: BlendMode) -> bool {
            self.0.borrow_mut().groups.push((true, opacity, blend_mode));
            true
        }

        fn pop_group(&mut self, opacity: f64, blend_mode: BlendMode) -> bool {
            self.0.borrow_mut().groups.push((false, opacity, blend_mode));
            true
        }
    }

    #[test]
    fn plain_rect_fills_once_with_expected_bbox() {
        let doc = parse(r#"<svg viewBox="0 0 10 10"><rect x="1" y="2" width="3" height="4" fill="#ff0000"/></svg>"#).unwrap();
        let mut canvas = RecordingCanvas(RefCell::new(Recording::default()));
        render(&doc, &mut canvas, &NoPalette, 96.0, Viewport::new(10.0, 10.0), Color::black(), None);

        let rec = canvas.0.borrow();
        assert_eq!(rec.fills.len(), 1);
        let (matrix, fill_rule, paint) = &rec.fills[0];
        assert!(matrix.is_identity());
        assert_eq!(*fill_rule, FillRule::NonZero);
        assert_eq!(*paint, ResolvedPaint::Color(Color::new_rgb(255, 0, 0)));

        let bbox = rect(&doc, 96.0, Viewport::new(10.0, 10.0), None).unwrap();
        assert!((bbox.x() - 1.0).abs() < 1e-9);
        assert!((bbox.y() - 2.0).abs() < 1e-9);
        assert!((bbox.width() - 3.0).abs() < 1e-9);
        assert!((bbox.height() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn view_box_scaling_produces_expected_ctm() {
        let doc = parse(
            r#"<svg width="200" height="100" viewBox="0 0 20 10"><rect x="0" y="0" width="20" height="10" fill="black"/></svg>"#,
        )
        .unwrap();
        let mut canvas = RecordingCanvas(RefCell::new(Recording::default()));
        render(&doc, &mut canvas, &NoPalette, 96.0, Viewport::new(200.0, 100.0), Color::black(), None);

        let rec = canvas.0.borrow();
        assert_eq!(rec.fills.len(), 1);
        let (matrix, _, paint) = &rec.fills[0];
        assert!(matrix.fuzzy_eq_for_test(&Transform::new_scale(10.0, 10.0)));
        assert_eq!(*paint, ResolvedPaint::Color(Color::new_rgb(0, 0, 0)));
    }

    #[test]
    fn gradient_reference_resolves_with_inherited_stops() {
        let doc = parse(
            r#"<svg><defs>
                <linearGradient id="a"><stop offset="0" stop-color="red"/><stop offset="1" stop-color="blue"/></linearGradient>
                <linearGradient id="b" xlink:href="#a" x1="0" x2="1"/>
            </defs><rect width="1" height="1" fill="url(#b)"/></svg>"#,
        )
        .unwrap();
        let mut canvas = RecordingCanvas(RefCell::new(Recording::default()));
        render(&doc, &mut canvas, &NoPalette, 96.0, Viewport::new(1.0, 1.0), Color::black(), None);

        let rec = canvas.0.borrow();
        assert_eq!(rec.fills.len(), 1);
        match &rec.fills[0].2 {
            ResolvedPaint::LinearGradient(LinearGradient { x1, x2, stops, .. }) => {
                assert_eq!(*x1, 0.0);
                assert_eq!(*x2, 1.0);
                assert_eq!(
                    stops,
                    &vec![
                        GradientStop { offset: 0.0, color: Color::new_rgb(255, 0, 0) },
                        GradientStop { offset: 1.0, color: Color::new_rgb(0, 0, 255) },
                    ]
                );
            }
            other => panic!("expected a linear gradient, got {:?}", other),
        }
    }

    #[test]
    fn clip_and_opacity_group_sequence_matches_expected_order() {
        let doc = parse(
            r#"<svg><defs><clipPath id="c"><circle cx="5" cy="5" r="5"/></clipPath></defs>
               <g opacity="0.5" clip-path="url(#c)"><rect width="1" height="1" fill="red"/></g></svg>"#,
        )
        .unwrap();
        let mut canvas = RecordingCanvas(RefCell::new(Recording::default()));
        render(&doc, &mut canvas, &NoPalette, 96.0, Viewport::new(10.0, 10.0), Color::black(), None);

        let rec = canvas.0.borrow();
        assert_eq!(rec.groups, vec![
            (true, 0.5, BlendMode::SrcOver),
            (true, 1.0, BlendMode::DstIn),
            (false, 1.0, BlendMode::DstIn),
            (false, 0.5, BlendMode::SrcOver),
        ]);
        assert_eq!(rec.fills.len(), 2);
    }

    #[test]
    fn use_indirection_translates_and_inherits_from_use_site() {
        let doc = parse(
            r#"<svg><defs><rect id="r" x="0" y="0" width="1" height="1"/></defs>
               <use xlink:href="#r" x="5" y="7" fill="green"/></svg>"#,
        )
        .unwrap();
        let mut canvas = RecordingCanvas(RefCell::new(Recording::default()));
        render(&doc, &mut canvas, &NoPalette, 96.0, Viewport::new(10.0, 10.0), Color::black(), None);

        let rec = canvas.0.borrow();
        assert_eq!(rec.fills.len(), 1);
        let (matrix, _, paint) = &rec.fills[0];
        assert!(matrix.fuzzy_eq_for_test(&Transform::new_translate(5.0, 7.0)));
        assert_eq!(*paint, ResolvedPaint::Color(Color::new_rgb(0, 128, 0)));
    }

    #[test]
    fn current_color_seed_reaches_a_leaf_shape_with_no_color_attribute_in_its_chain() {
        let doc = parse(r#"<svg><rect width="1" height="1" fill="currentColor"/></svg>"#).unwrap();
        let mut canvas = RecordingCanvas(RefCell::new(Recording::default()));
        let seed = Color::new_rgb(10, 20, 30);
        render(&doc, &mut canvas, &NoPalette, 96.0, Viewport::new(10.0, 10.0), seed, None);

        let rec = canvas.0.borrow();
        assert_eq!(rec.fills.len(), 1);
        assert_eq!(rec.fills[0].2, ResolvedPaint::Color(seed));
    }

    #[test]
    fn arc_path_lowers_to_cubics_ending_at_target_point() {
        let doc = parse(r#"<svg><path d="M0,0 A10,10 0 0 1 10,10" stroke="black" fill="none"/></svg>"#).unwrap();
        let mut canvas = RecordingCanvas(RefCell::new(Recording::default()));
        render(&doc, &mut canvas, &NoPalette, 96.0, Viewport::new(10.0, 10.0), Color::black(), None);

        let bbox = rect(&doc, 96.0, Viewport::new(10.0, 10.0), None).unwrap();
        assert!(bbox.x() >= -0.001 && bbox.y() >= -0.001);
        assert!(bbox.right() <= 10.5 && bbox.bottom() <= 10.5);
    }

    trait FuzzyEqForTest {
        fn fuzzy_eq_for_test(&self, other: &Self) -> bool;
    }

    impl FuzzyEqForTest for Transform {
        fn fuzzy_eq_for_test(&self, other: &Self) -> bool {
            use crate::geom::FuzzyEq;
            self.fuzzy_eq(other)
        }
    }
}
