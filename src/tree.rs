// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The parsed element tree: a closed tag/attribute enum pair, an
//! arena-backed node list, and an id index for `url(#id)`/`xlink:href`
//! lookups.
//!
//! The arena is a plain `Vec<NodeData>` indexed by `NodeId`, not the bump
//! allocator a C implementation would reach for: growth amortizes the same
//! way, nodes never need per-object free, and this sidesteps `unsafe`
//! entirely (the rest of the crate has no use for it either).

use std::collections::HashMap;
use std::hash::{BuildHasherDefault, Hasher};

/// Closed set of recognized elements. An unrecognized tag is skipped,
/// together with its subtree, during parsing -- it never gets a `NodeId`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum ElementId {
    Svg,
    G,
    Defs,
    Use,
    Path,
    Rect,
    Circle,
    Ellipse,
    Line,
    Polyline,
    Polygon,
    ClipPath,
    LinearGradient,
    RadialGradient,
    Stop,
    SolidColor,
}

impl ElementId {
    pub fn from_tag_name(name: &str) -> Option<ElementId> {
        Some(match name {
            "svg" => ElementId::Svg,
            "g" => ElementId::G,
            "defs" => ElementId::Defs,
            "use" => ElementId::Use,
            "path" => ElementId::Path,
            "rect" => ElementId::Rect,
            "circle" => ElementId::Circle,
            "ellipse" => ElementId::Ellipse,
            "line" => ElementId::Line,
            "polyline" => ElementId::Polyline,
            "polygon" => ElementId::Polygon,
            "clipPath" => ElementId::ClipPath,
            "linearGradient" => ElementId::LinearGradient,
            "radialGradient" => ElementId::RadialGradient,
            "stop" => ElementId::Stop,
            "solidColor" => ElementId::SolidColor,
            _ => return None,
        })
    }

    /// `defs`/`clipPath`/gradients/`stop`/`solidColor` draw nothing
    /// directly; they're only reachable through an id reference.
    pub fn is_renderable(self) -> bool {
        !matches!(
            self,
            ElementId::Defs
                | ElementId::ClipPath
                | ElementId::LinearGradient
                | ElementId::RadialGradient
                | ElementId::Stop
                | ElementId::SolidColor
        )
    }
}

/// Closed set of recognized attributes, spelled exactly as in the source.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum AttributeId {
    Id,
    D,
    Points,
    X,
    Y,
    X1,
    Y1,
    X2,
    Y2,
    Cx,
    Cy,
    R,
    Rx,
    Ry,
    Fx,
    Fy,
    Width,
    Height,
    ViewBox,
    PreserveAspectRatio,
    Offset,
    Transform,
    GradientTransform,
    GradientUnits,
    ClipPathUnits,
    SpreadMethod,
    XlinkHref,
    Fill,
    FillOpacity,
    FillRule,
    Stroke,
    StrokeOpacity,
    StrokeWidth,
    StrokeLinecap,
    StrokeLinejoin,
    StrokeMiterlimit,
    StrokeDasharray,
    StrokeDashoffset,
    Color,
    Opacity,
    Display,
    Visibility,
    Overflow,
    ClipPath,
    ClipRule,
    SolidColor,
    SolidOpacity,
    StopColor,
    StopOpacity,
}

impl AttributeId {
    pub fn from_name(name: &str) -> Option<AttributeId> {
        Some(match name {
            "id" => AttributeId::Id,
            "d" => AttributeId::D,
            "points" => AttributeId::Points,
            "x" => AttributeId::X,
            "y" => AttributeId::Y,
            "x1" => AttributeId::X1,
            "y1" => AttributeId::Y1,
            "x2" => AttributeId::X2,
            "y2" => AttributeId::Y2,
            "cx" => AttributeId::Cx,
            "cy" => AttributeId::Cy,
            "r" => AttributeId::R,
            "rx" => AttributeId::Rx,
            "ry" => AttributeId::Ry,
            "fx" => AttributeId::Fx,
            "fy" => AttributeId::Fy,
            "width" => AttributeId::Width,
            "height" => AttributeId::Height,
            "viewBox" => AttributeId::ViewBox,
            "preserveAspectRatio" => AttributeId::PreserveAspectRatio,
            "offset" => AttributeId::Offset,
            "transform" => AttributeId::Transform,
            "gradientTransform" => AttributeId::GradientTransform,
            "gradientUnits" => AttributeId::GradientUnits,
            "clipPathUnits" => AttributeId::ClipPathUnits,
            "spreadMethod" => AttributeId::SpreadMethod,
            "xlink:href" => AttributeId::XlinkHref,
            "fill" => AttributeId::Fill,
            "fill-opacity" => AttributeId::FillOpacity,
            "fill-rule" => AttributeId::FillRule,
            "stroke" => AttributeId::Stroke,
            "stroke-opacity" => AttributeId::StrokeOpacity,
            "stroke-width" => AttributeId::StrokeWidth,
            "stroke-linecap" => AttributeId::StrokeLinecap,
            "stroke-linejoin" => AttributeId::StrokeLinejoin,
            "stroke-miterlimit" => AttributeId::StrokeMiterlimit,
            "stroke-dasharray" => AttributeId::StrokeDasharray,
            "stroke-dashoffset" => AttributeId::StrokeDashoffset,
            "color" => AttributeId::Color,
            "opacity" => AttributeId::Opacity,
            "display" => AttributeId::Display,
            "visibility" => AttributeId::Visibility,
            "overflow" => AttributeId::Overflow,
            "clip-path" => AttributeId::ClipPath,
            "clip-rule" => AttributeId::ClipRule,
            "solid-color" => AttributeId::SolidColor,
            "solid-opacity" => AttributeId::SolidOpacity,
            "stop-color" => AttributeId::StopColor,
            "stop-opacity" => AttributeId::StopOpacity,
            _ => return None,
        })
    }

    /// Properties that inherit down the tree when not set locally. Everything
    /// else is either non-inheriting (geometry, `id`, `transform`, ...) or
    /// meaningless outside its own element.
    pub fn inherits(self) -> bool {
        matches!(
            self,
            AttributeId::Fill
                | AttributeId::FillOpacity
                | AttributeId::FillRule
                | AttributeId::Stroke
                | AttributeId::StrokeOpacity
                | AttributeId::StrokeWidth
                | AttributeId::StrokeLinecap
                | AttributeId::StrokeLinejoin
                | AttributeId::StrokeMiterlimit
                | AttributeId::StrokeDasharray
                | AttributeId::StrokeDashoffset
                | AttributeId::Color
                | AttributeId::Visibility
                | AttributeId::ClipRule
                | AttributeId::SolidColor
                | AttributeId::SolidOpacity
        )
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub(crate) fn new(idx: usize) -> Self {
        NodeId(idx)
    }

    #[inline]
    fn index(self) -> usize {
        self.0
    }
}

struct NodeData<'input> {
    element: ElementId,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    next_sibling: Option<NodeId>,
    attrs: Vec<(AttributeId, &'input str)>,
}

/// FNV-like hasher per the document's prescribed `h = len; h = h*31+byte`
/// recurrence, wired into `std::collections::HashMap` via
/// `BuildHasherDefault`.
#[derive(Default)]
pub struct RecurrenceHasher(u64);

impl Hasher for RecurrenceHasher {
    fn write(&mut self, bytes: &[u8]) {
        let mut h = self.0.wrapping_add(bytes.len() as u64);
        for &b in bytes {
            h = h.wrapping_mul(31).wrapping_add(b as u64);
        }
        self.0 = h;
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

type IdMap = HashMap<String, NodeId, BuildHasherDefault<RecurrenceHasher>>;

/// The parsed tree plus id index. `'input` is the lifetime of the source
/// byte buffer every attribute value slice borrows from.
pub struct Document<'input> {
    nodes: Vec<NodeData<'input>>,
    ids: IdMap,
}

impl<'input> Document<'input> {
    pub(crate) fn empty() -> Self {
        Document { nodes: Vec::new(), ids: IdMap::default() }
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.ids.clear();
    }

    /// Number of elements in the tree.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Appends a new node as the last child of `parent` (`None` for the
    /// root), returning its id. O(1) thanks to the `last_child` pointer.
    pub(crate) fn append(&mut self, parent: Option<NodeId>, element: ElementId) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(NodeData {
            element,
            parent,
            first_child: None,
            last_child: None,
            next_sibling: None,
            attrs: Vec::new(),
        });

        if let Some(parent) = parent {
            let prev_last = self.nodes[parent.index()].last_child;
            self.nodes[parent.index()].last_child = Some(id);
            match prev_last {
                Some(last) => self.nodes[last.index()].next_sibling = Some(id),
                None => self.nodes[parent.index()].first_child = Some(id),
            }
        }

        id
    }

    pub(crate) fn push_attribute(&mut self, node: NodeId, attr: AttributeId, value: &'input str) {
        self.nodes[node.index()].attrs.push((attr, value));
    }

    pub(crate) fn insert_id(&mut self, id: String, node: NodeId) {
        // Document order wins: last write overwrites any earlier one.
        self.ids.insert(id, node);
    }

    pub fn root(&self) -> Option<Node<'_, 'input>> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(Node { doc: self, id: NodeId::new(0) })
        }
    }

    pub fn get(&self, id: NodeId) -> Node<'_, 'input> {
        Node { doc: self, id }
    }

    pub fn by_id(&self, id: &str) -> Option<Node<'_, 'input>> {
        self.ids.get(id).map(|&id| self.get(id))
    }
}

/// A borrowed handle to one node plus the document it lives in, mirroring
/// the read-only `Node` wrapper pattern used throughout this crate's
/// teacher.
#[derive(Clone, Copy)]
pub struct Node<'a, 'input> {
    doc: &'a Document<'input>,
    id: NodeId,
}

impl<'a, 'input> Node<'a, 'input> {
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    fn data(&self) -> &'a NodeData<'input> {
        &self.doc.nodes[self.id.index()]
    }

    #[inline]
    pub fn tag_name(&self) -> ElementId {
        self.data().element
    }

    pub fn parent(&self) -> Option<Node<'a, 'input>> {
        self.data().parent.map(|id| self.doc.get(id))
    }

    pub fn children(&self) -> Children<'a, 'input> {
        Children { doc: self.doc, next: self.data().first_child }
    }

    /// Ancestors starting at (and including) `self`, walking up to the root.
    pub fn self_and_ancestors(&self) -> Ancestors<'a, 'input> {
        Ancestors { doc: self.doc, next: Some(self.id) }
    }

    /// Value set directly on this element, or `None`.
    pub fn attribute(&self, attr: AttributeId) -> Option<&'input str> {
        self.data().attrs.iter().find(|(a, _)| *a == attr).map(|(_, v)| *v)
    }

    #[inline]
    pub fn has_attribute(&self, attr: AttributeId) -> bool {
        self.attribute(attr).is_some()
    }

    /// Local value if present, else the nearest ancestor's. Only meaningful
    /// for attributes where `AttributeId::inherits` is `true`.
    pub fn find_attribute(&self, attr: AttributeId) -> Option<&'input str> {
        self.self_and_ancestors().find_map(|n| n.attribute(attr))
    }

    pub fn resolve_href(&self) -> Option<Node<'a, 'input>> {
        let href = self.attribute(AttributeId::XlinkHref)?;
        let id = href.strip_prefix('#')?;
        self.doc.by_id(id)
    }

    /// Looks up any element in this node's document by its `id` attribute,
    /// for resolving `url(#id)` references that aren't `xlink:href`.
    pub fn lookup_id(&self, id: &str) -> Option<Node<'a, 'input>> {
        self.doc.by_id(id)
    }

    /// Returns the node with the given id within the same document as
    /// `self`. `id` is assumed to come from this document (`NodeId`s don't
    /// cross `Document`s).
    pub fn with_id(&self, id: NodeId) -> Node<'a, 'input> {
        self.doc.get(id)
    }
}

pub struct Children<'a, 'input> {
    doc: &'a Document<'input>,
    next: Option<NodeId>,
}

impl<'a, 'input> Iterator for Children<'a, 'input> {
    type Item = Node<'a, 'input>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.doc.nodes[id.index()].next_sibling;
        Some(self.doc.get(id))
    }
}

pub struct Ancestors<'a, 'input> {
    doc: &'a Document<'input>,
    next: Option<NodeId>,
}

impl<'a, 'input> Iterator for Ancestors<'a, 'input> {
    type Item = Node<'a, 'input>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.doc.nodes[id.index()].parent;
        Some(self.doc.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_links_siblings_in_order() {
        let mut doc = Document::empty();
        let root = doc.append(None, ElementId::Svg);
        let a = doc.append(Some(root), ElementId::Rect);
        let b = doc.append(Some(root), ElementId::Circle);

        let kids: Vec<_> = doc.get(root).children().map(|n| n.id()).collect();
        assert_eq!(kids, vec![a, b]);
    }

    #[test]
    fn local_vs_inherited_lookup() {
        let mut doc = Document::empty();
        let root = doc.append(None, ElementId::Svg);
        doc.push_attribute(root, AttributeId::Fill, "red");
        let child = doc.append(Some(root), ElementId::G);
        let grandchild = doc.append(Some(child), ElementId::Rect);

        let gc = doc.get(grandchild);
        assert_eq!(gc.attribute(AttributeId::Fill), None);
        assert_eq!(gc.find_attribute(AttributeId::Fill), Some("red"));
    }

    #[test]
    fn id_map_last_write_wins() {
        let mut doc = Document::empty();
        let root = doc.append(None, ElementId::Svg);
        let a = doc.append(Some(root), ElementId::Rect);
        let b = doc.append(Some(root), ElementId::Circle);
        doc.insert_id("dup".to_string(), a);
        doc.insert_id("dup".to_string(), b);

        assert_eq!(doc.by_id("dup").unwrap().id(), b);
    }

    #[test]
    fn unknown_tag_has_no_element_id() {
        assert_eq!(ElementId::from_tag_name("marker"), None);
    }
}
