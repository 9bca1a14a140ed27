// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`otfsvg` is a compact renderer for a subset of [SVG], sized for use as a
glyph-rendering backend: OpenType `SVG ` table glyphs, icon fonts, UI
assets baked at build time. It does not draw pixels itself -- given a
parsed document it drives an abstract [`Canvas`](canvas::Canvas) through a
small vtable (fill a path, stroke a path, push/pop a compositing group,
decode/draw an image), and it can answer "what is the tight bounding box
of this element" without touching a canvas at all.

Supported: basic shapes, the path mini-language (including elliptical
arcs), nested `<svg>`, `<use>`, linear/radial gradients with
`xlink:href` inheritance, solid colors, `clip-path`, opacity groups,
`currentColor`, and `var(--name)` paints resolved through a caller
[`Palette`](canvas::Palette).

Not supported, by design: full SVG 1.1/2 compliance, CSS selectors and
stylesheets, `<text>`, filters, animation, scripting, patterns, and
masks other than `clip-path`.

[SVG]: https://en.wikipedia.org/wiki/Scalable_Vector_Graphics
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::too_many_arguments)]

pub mod canvas;
mod error;
pub mod geom;
mod options;
pub mod path;
mod parser;
mod render;
pub mod shapes;
pub mod tree;
pub mod values;
mod xml;

pub use canvas::{BlendMode, Canvas, Palette};
pub use error::Error;
pub use geom::{Rect, Transform};
pub use options::Options;
pub use render::Viewport;
pub use values::Color;

/// A loaded document: the parsed element tree plus the intrinsic size
/// derived from it at load time.
///
/// Owns its tree; the source text it was parsed from is borrowed for the
/// whole of `'input`, per the parser's zero-copy attribute slices.
pub struct Document<'input> {
    tree: tree::Document<'input>,
    width: f64,
    height: f64,
    dpi: f64,
}

impl<'input> Document<'input> {
    /// An empty document. [`Document::width`]/[`Document::height`] are `0.0`
    /// until [`Document::load`] succeeds.
    pub fn new() -> Self {
        Document { tree: tree::Document::empty(), width: 0.0, height: 0.0, dpi: 96.0 }
    }

    /// Parses `text` into a fresh document.
    pub fn parse(text: &'input str, opts: &Options) -> Result<Self, Error> {
        let mut doc = Document::new();
        doc.load(text, opts)?;
        Ok(doc)
    }

    /// Parses raw bytes into a fresh document, validating UTF-8 first.
    pub fn parse_data(data: &'input [u8], opts: &Options) -> Result<Self, Error> {
        let mut doc = Document::new();
        doc.load_data(data, opts)?;
        Ok(doc)
    }

    /// Validates `data` as UTF-8, then parses it per [`Document::load`],
    /// replacing this document's contents. On failure -- including invalid
    /// UTF-8 -- the document is left in the cleared (empty) state.
    pub fn load_data(&mut self, data: &'input [u8], opts: &Options) -> Result<(), Error> {
        let text = match std::str::from_utf8(data) {
            Ok(text) => text,
            Err(_) => {
                self.clear();
                return Err(Error::NotAnUtf8Str);
            }
        };
        self.load(text, opts)
    }

    /// Parses `text`, replacing this document's contents. On failure the
    /// document is left in the cleared (empty) state, matching `load;
    /// clear; load` idempotence.
    pub fn load(&mut self, text: &'input str, opts: &Options) -> Result<(), Error> {
        self.clear();

        let tree = parser::parse(text)?;
        // parser::parse only returns Ok when the tree has an <svg> root.
        let root = tree.root().expect("parsed document always has a root");
        let (width, height) = match intrinsic_size(root, opts) {
            Some(size) => size,
            None => return Err(Error::InvalidSize),
        };

        self.tree = tree;
        self.width = width;
        self.height = height;
        self.dpi = opts.dpi;

        log::debug!("loaded document: {}x{}, {} elements", self.width, self.height, self.tree.len());
        Ok(())
    }

    /// Empties the document, releasing the tree and resetting the intrinsic
    /// size to `0x0`.
    pub fn clear(&mut self) {
        self.tree.clear();
        self.width = 0.0;
        self.height = 0.0;
    }

    /// The intrinsic width, in user units, derived at load time from
    /// `viewBox` or `width`/[`Options::fallback_width`].
    pub fn width(&self) -> f64 {
        self.width
    }

    /// The intrinsic height, in user units, derived at load time from
    /// `viewBox` or `height`/[`Options::fallback_height`].
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Looks up an element by its `id` attribute.
    pub fn node_by_id(&self, id: &str) -> Option<tree::Node<'_, 'input>> {
        self.tree.by_id(id)
    }

    /// Renders `id` (or the whole document, when `id` is `None`) by driving
    /// `canvas` through its vtable. `palette` is consulted for any
    /// `var(--name)` paint; pass [`canvas::NoPalette`] if the document
    /// doesn't use them.
    pub fn render<C: Canvas>(&self, canvas: &mut C, palette: &dyn Palette, id: Option<&str>) {
        let viewport = Viewport::new(self.width, self.height);
        render::render(&self.tree, canvas, palette, self.dpi, viewport, Color::black(), id);
    }

    /// Computes the tight bounding box of `id` (or the whole document) with
    /// no canvas calls. `None` if `id` doesn't resolve, or if the subtree
    /// renders nothing.
    pub fn rect(&self, id: Option<&str>) -> Option<Rect> {
        let viewport = Viewport::new(self.width, self.height);
        render::rect(&self.tree, self.dpi, viewport, id)
    }
}

impl<'input> Default for Document<'input> {
    fn default() -> Self {
        Document::new()
    }
}

/// Per §4.F: `viewBox` present on the root wins outright (intrinsic size is
/// `(vw, vh)`, `width`/`height` are ignored for sizing purposes); otherwise
/// `width`/`height` resolve against `(fallback_width, fallback_height)`,
/// defaulting to `100%` (i.e. the fallback itself) when absent.
fn intrinsic_size(root: tree::Node, opts: &Options) -> Option<(f64, f64)> {
    let (width, height) = match root.attribute(tree::AttributeId::ViewBox).and_then(values::parse_view_box) {
        Some(view_box) => (view_box.width(), view_box.height()),
        None => {
            let width = root
                .attribute(tree::AttributeId::Width)
                .and_then(values::parse_length)
                .map(|l| l.to_user_units(opts.dpi, 0.0, opts.fallback_width))
                .unwrap_or(opts.fallback_width);
            let height = root
                .attribute(tree::AttributeId::Height)
                .and_then(values::parse_length)
                .map(|l| l.to_user_units(opts.dpi, 0.0, opts.fallback_height))
                .unwrap_or(opts.fallback_height);
            (width, height)
        }
    };

    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Some((width, height))
    } else {
        None
    }
}
