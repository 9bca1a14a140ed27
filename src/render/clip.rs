// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! `clip-path` resolution. The actual clipping draw (recursing into the
//! referenced subtree in clipping mode, composited with `dst-in`) lives in
//! `render::mod` next to the rest of the frame machinery; this module just
//! finds the target element and its `clipPathUnits`.

use crate::tree::{AttributeId, ElementId, Node};
use crate::values::{self, Units};

/// A `clip-path: url(#id)` value, parsed down to the bare id (no fallback
/// is meaningful for `clip-path`, unlike `fill`/`stroke`).
fn parse_clip_path_id(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    let inner = trimmed.strip_prefix("url(")?.strip_suffix(')')?;
    inner.trim().strip_prefix('#').map(|s| s.trim())
}

/// Resolves `node`'s `clip-path` attribute to its `<clipPath>` element, if
/// any. Returns `None` both when the attribute is absent and when it
/// references something that isn't a `<clipPath>`.
pub fn resolve(node: Node) -> Option<Node> {
    let text = node.attribute(AttributeId::ClipPath)?;
    let id = parse_clip_path_id(text)?;
    let target = node.lookup_id(id)?;
    if target.tag_name() == ElementId::ClipPath {
        Some(target)
    } else {
        None
    }
}

/// `clipPathUnits`: defaults to `userSpaceOnUse`, unlike gradients which
/// default to `objectBoundingBox`.
pub fn units(clip_path_node: Node) -> Units {
    match clip_path_node.attribute(AttributeId::ClipPathUnits) {
        Some(text) => values::parse_units(text, Units::UserSpaceOnUse),
        None => Units::UserSpaceOnUse,
    }
}
