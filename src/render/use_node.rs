// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! `<use>` indirection.
//!
//! A `<use>` element renders a copy of whatever its `xlink:href` points at,
//! translated by `x`/`y`, with inherited properties (`fill`, `color`, ...)
//! resolved against the `<use>` site rather than the referenced element's
//! original location in the tree. A systems-language renderer would satisfy
//! that by temporarily repointing the referenced node's parent pointer
//! before recursing and restoring it after; mutating a shared, possibly
//! multiply-referenced tree during recursion is exactly the kind of aliasing
//! the borrow checker is built to catch, so instead the render recursion
//! threads an explicit list of `(referenced, effective_parent)` rebinds and
//! consults it whenever it needs a node's logical parent.

use crate::tree::{AttributeId, Node, NodeId};
use crate::values::Length;

/// One active `<use>` indirection: `referenced` should behave, for the
/// purposes of inherited-property lookup, as if its parent were
/// `effective_parent` (the `<use>` element itself) instead of its real tree
/// parent.
#[derive(Clone, Copy)]
pub struct Rebind {
    pub referenced: NodeId,
    pub effective_parent: NodeId,
}

/// Returns the logical parent of `node`, honoring any active rebinds:
/// the most recently pushed rebind for `node`'s id wins, falling back to
/// the real tree parent when nothing rebinds it.
pub fn effective_parent<'a, 'input>(node: Node<'a, 'input>, rebinds: &[Rebind]) -> Option<Node<'a, 'input>> {
    for rebind in rebinds.iter().rev() {
        if rebind.referenced == node.id() {
            return Some(node.with_id(rebind.effective_parent));
        }
    }
    node.parent()
}

/// Inherited-property lookup that honors active rebinds: walks `node`'s
/// local attribute, then its rebind-aware logical parent chain, same as
/// `Node::find_attribute` but substituting `effective_parent` for the real
/// tree parent at each step.
pub fn find_attribute<'input>(mut node: Node<'_, 'input>, rebinds: &[Rebind], attr: AttributeId) -> Option<&'input str> {
    loop {
        if let Some(v) = node.attribute(attr) {
            return Some(v);
        }
        node = effective_parent(node, rebinds)?;
    }
}

/// The `x`/`y` translation a `<use>` applies to its referenced content,
/// resolved against the current viewport.
pub fn resolve_translation(
    use_node: Node,
    viewport: super::viewport::Viewport,
    dpi: f64,
) -> (f64, f64) {
    let x = use_node
        .attribute(AttributeId::X)
        .and_then(crate::values::parse_length)
        .map(|l: Length| viewport.resolve_x(l, dpi, 0.0))
        .unwrap_or(0.0);
    let y = use_node
        .attribute(AttributeId::Y)
        .and_then(crate::values::parse_length)
        .map(|l: Length| viewport.resolve_y(l, dpi, 0.0))
        .unwrap_or(0.0);
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::tree::AttributeId as A;

    #[test]
    fn effective_parent_falls_back_to_real_parent_when_not_rebound() {
        let doc = parse(r#"<svg><g><rect id="r" fill="red"/></g></svg>"#).unwrap();
        let rect = doc.by_id("r").unwrap();
        let real_parent = rect.parent().unwrap();
        let ep = effective_parent(rect, &[]).unwrap();
        assert_eq!(ep.id(), real_parent.id());
    }

    #[test]
    fn effective_parent_honors_active_rebind() {
        let doc = parse(
            r#"<svg>
                <defs><rect id="r" width="1" height="1"/></defs>
                <g fill="blue"><use xlink:href="#r"/></g>
            </svg>"#,
        )
        .unwrap();

        let rect = doc.by_id("r").unwrap();
        let use_group = doc.root().unwrap().children().nth(1).unwrap();
        let rebinds = [Rebind { referenced: rect.id(), effective_parent: use_group.id() }];

        let ep = effective_parent(rect, &rebinds).unwrap();
        assert_eq!(ep.attribute(A::Fill), Some("blue"));
    }

    #[test]
    fn find_attribute_walks_through_a_rebind() {
        let doc = parse(
            r#"<svg>
                <defs><rect id="r" width="1" height="1"/></defs>
                <g fill="blue"><use xlink:href="#r"/></g>
            </svg>"#,
        )
        .unwrap();

        let rect = doc.by_id("r").unwrap();
        let use_group = doc.root().unwrap().children().nth(1).unwrap();
        let rebinds = [Rebind { referenced: rect.id(), effective_parent: use_group.id() }];

        assert_eq!(rect.find_attribute(A::Fill), None);
        assert_eq!(find_attribute(rect, &rebinds, A::Fill), Some("blue"));
    }

    #[test]
    fn translation_defaults_to_zero() {
        let doc = parse(r#"<svg><use xlink:href="#r"/></svg>"#).unwrap();
        let use_node = doc.root().unwrap().children().next().unwrap();
        let (x, y) = resolve_translation(use_node, super::super::viewport::Viewport::new(10.0, 10.0), 96.0);
        assert_eq!((x, y), (0.0, 0.0));
    }
}
