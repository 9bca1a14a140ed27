// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! End-to-end tests driven through the public `Document` facade only
//! (no `crate::` access to internals), exercising the load/render/rect
//! round trip the way an external caller would.

use otfsvg::canvas::{BlendMode, Canvas, NoPalette, Palette, ResolvedPaint};
use otfsvg::geom::{Rect, Transform};
use otfsvg::path::PathData;
use otfsvg::values::{Color, FillRule};
use otfsvg::{Document, Options};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Fill { paint: ResolvedPaint, matrix: Transform, bbox: Option<Rect> },
    Push { opacity: f64, blend: BlendMode },
    Pop { opacity: f64, blend: BlendMode },
}

#[derive(Default)]
struct RecordingCanvas {
    calls: Vec<Call>,
}

impl Canvas for RecordingCanvas {
    type Image = ();

    fn fill_path(&mut self, path: &PathData, matrix: Transform, _fill_rule: FillRule, paint: &ResolvedPaint) -> bool {
        self.calls.push(Call::Fill { paint: paint.clone(), matrix, bbox: path.bbox() });
        true
    }

    fn push_group(&mut self, opacity: f64, blend_mode: BlendMode) -> bool {
        self.calls.push(Call::Push { opacity, blend: blend_mode });
        true
    }

    fn pop_group(&mut self, opacity: f64, blend_mode: BlendMode) -> bool {
        self.calls.push(Call::Pop { opacity, blend: blend_mode });
        true
    }
}

#[test]
fn loads_and_renders_a_plain_rect() {
    let doc = Document::parse(
        r#"<svg viewBox="0 0 10 10"><rect x="1" y="2" width="3" height="4" fill="#ff0000"/></svg>"#,
        &Options::default(),
    )
    .unwrap();

    assert_eq!((doc.width(), doc.height()), (10.0, 10.0));

    let mut canvas = RecordingCanvas::default();
    doc.render(&mut canvas, &NoPalette, None);

    assert_eq!(canvas.calls.len(), 1);
    match &canvas.calls[0] {
        Call::Fill { paint, matrix, bbox } => {
            assert_eq!(*paint, ResolvedPaint::Color(Color::new_rgb(255, 0, 0)));
            assert!(matrix.is_identity());
            let bbox = bbox.unwrap();
            assert_eq!((bbox.x(), bbox.y(), bbox.width(), bbox.height()), (1.0, 2.0, 3.0, 4.0));
        }
        other => panic!("expected a fill, got {:?}", other),
    }

    let rect = doc.rect(None).unwrap();
    assert_eq!((rect.x(), rect.y(), rect.width(), rect.height()), (1.0, 2.0, 3.0, 4.0));
}

#[test]
fn renders_by_element_id() {
    let doc = Document::parse(
        r#"<svg viewBox="0 0 10 10">
            <rect id="a" width="1" height="1" fill="red"/>
            <rect id="b" x="5" width="1" height="1" fill="blue"/>
        </svg>"#,
        &Options::default(),
    )
    .unwrap();

    let mut canvas = RecordingCanvas::default();
    doc.render(&mut canvas, &NoPalette, Some("b"));

    assert_eq!(canvas.calls.len(), 1);
    match &canvas.calls[0] {
        Call::Fill { paint, .. } => assert_eq!(*paint, ResolvedPaint::Color(Color::new_rgb(0, 0, 255))),
        other => panic!("expected a fill, got {:?}", other),
    }
}

#[test]
fn clip_and_opacity_group_sequence_matches_the_spec() {
    let doc = Document::parse(
        r#"<svg viewBox="0 0 10 10">
            <defs><clipPath id="c"><circle cx="5" cy="5" r="5"/></clipPath></defs>
            <g opacity="0.5" clip-path="url(#c)"><rect width="10" height="10" fill="black"/></g>
        </svg>"#,
        &Options::default(),
    )
    .unwrap();

    let mut canvas = RecordingCanvas::default();
    doc.render(&mut canvas, &NoPalette, None);

    let kinds: Vec<_> = canvas
        .calls
        .iter()
        .map(|c| match c {
            Call::Fill { .. } => "fill",
            Call::Push { .. } => "push",
            Call::Pop { .. } => "pop",
        })
        .collect();
    assert_eq!(kinds, ["push", "fill", "push", "fill", "pop", "pop"]);

    assert_eq!(canvas.calls[0], Call::Push { opacity: 0.5, blend: BlendMode::SrcOver });
    assert_eq!(canvas.calls[2], Call::Push { opacity: 1.0, blend: BlendMode::DstIn });
    assert_eq!(canvas.calls[4], Call::Pop { opacity: 1.0, blend: BlendMode::DstIn });
    assert_eq!(canvas.calls[5], Call::Pop { opacity: 0.5, blend: BlendMode::SrcOver });
}

struct StaticPalette;
impl Palette for StaticPalette {
    fn resolve(&self, name: &str) -> Option<Color> {
        if name == "accent" {
            Some(Color::new_rgb(10, 20, 30))
        } else {
            None
        }
    }
}

#[test]
fn var_paint_resolves_through_a_caller_supplied_palette() {
    let doc = Document::parse(
        r#"<svg viewBox="0 0 10 10"><rect width="10" height="10" fill="var(--accent)"/></svg>"#,
        &Options::default(),
    )
    .unwrap();

    let mut canvas = RecordingCanvas::default();
    doc.render(&mut canvas, &StaticPalette, None);

    assert_eq!(canvas.calls.len(), 1);
    match &canvas.calls[0] {
        Call::Fill { paint, .. } => assert_eq!(*paint, ResolvedPaint::Color(Color::new_rgb(10, 20, 30))),
        other => panic!("expected a fill, got {:?}", other),
    }
}

#[test]
fn load_clear_reload_is_idempotent() {
    let text = r#"<svg viewBox="0 0 4 4"><rect id="r" width="4" height="4" fill="black"/></svg>"#;
    let mut doc = Document::new();
    doc.load(text, &Options::default()).unwrap();
    let first_size = (doc.width(), doc.height());
    let first_has_id = doc.node_by_id("r").is_some();

    doc.clear();
    assert_eq!((doc.width(), doc.height()), (0.0, 0.0));
    assert!(doc.node_by_id("r").is_none());

    doc.load(text, &Options::default()).unwrap();
    assert_eq!((doc.width(), doc.height()), first_size);
    assert_eq!(doc.node_by_id("r").is_some(), first_has_id);
}
