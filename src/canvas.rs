// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The external drawing interface. Exposed as a capability trait with
//! no-op defaults, rather than the record-of-function-pointers the core
//! this crate is grounded on uses: callers implement only the methods they
//! care about.

use crate::geom::{Rect, Transform};
use crate::path::PathData;
use crate::values::{Color, FillRule, LineCap, LineJoin};

/// A resolved paint server, ready to hand to a canvas. Unlike
/// `values::Paint`, every reference has already been followed.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedPaint {
    Color(Color),
    LinearGradient(LinearGradient),
    RadialGradient(RadialGradient),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpreadMethod {
    Pad,
    Reflect,
    Repeat,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub transform: Transform,
    pub spread_method: SpreadMethod,
    pub stops: Vec<GradientStop>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fx: f64,
    pub fy: f64,
    pub transform: Transform,
    pub spread_method: SpreadMethod,
    pub stops: Vec<GradientStop>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeData {
    pub width: f64,
    pub miterlimit: f64,
    pub dashoffset: f64,
    pub linecap: LineCap,
    pub linejoin: LineJoin,
}

/// `dasharray` is kept out of `StrokeData` proper since it's a
/// variable-length list; canvases that care about dashing read it off the
/// side channel carried alongside `StrokeData` in `fn stroke_path`.
pub type DashArray = [f64];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendMode {
    SrcOver,
    DstIn,
}

/// An opaque decoded raster image handle. The canvas implementation gives
/// this whatever shape it needs by choosing its own `Image` type via the
/// associated type on `Canvas`.
pub trait Canvas {
    type Image;

    #[allow(unused_variables)]
    fn fill_path(&mut self, path: &PathData, matrix: Transform, fill_rule: FillRule, paint: &ResolvedPaint) -> bool {
        true
    }

    #[allow(unused_variables)]
    fn stroke_path(
        &mut self,
        path: &PathData,
        matrix: Transform,
        stroke: &StrokeData,
        dasharray: Option<&[f64]>,
        paint: &ResolvedPaint,
    ) -> bool {
        true
    }

    #[allow(unused_variables)]
    fn push_group(&mut self, opacity: f64, blend_mode: BlendMode) -> bool {
        true
    }

    #[allow(unused_variables)]
    fn pop_group(&mut self, opacity: f64, blend_mode: BlendMode) -> bool {
        true
    }

    #[allow(unused_variables)]
    fn decode_image(&mut self, href: &str) -> Option<Self::Image> {
        None
    }

    #[allow(unused_variables)]
    fn draw_image(&mut self, image: &Self::Image, matrix: Transform, clip_rect: Rect, opacity: f64) -> bool {
        true
    }
}

/// Resolves `var(--name)` paints. Out of scope for this crate's own
/// implementation (no default palette is provided); callers wire up
/// whatever lookup they need.
pub trait Palette {
    fn resolve(&self, name: &str) -> Option<Color>;
}

/// A `Palette` that never resolves anything, for callers with no custom
/// properties.
pub struct NoPalette;

impl Palette for NoPalette {
    fn resolve(&self, _name: &str) -> Option<Color> {
        None
    }
}
