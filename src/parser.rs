// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Builds a `tree::Document` from the token stream in `crate::xml`.

use crate::error::Error;
use crate::tree::{AttributeId, Document, ElementId, NodeId};
use crate::xml::{ElementEnd, Token, Tokenizer};

pub fn parse<'input>(text: &'input str) -> Result<Document<'input>, Error> {
    let mut doc = Document::empty();
    let mut stack: Vec<NodeId> = Vec::new();
    // Depth of an unrecognized-tag subtree currently being skipped; `None`
    // when not skipping. Counts open tags seen while skipping so a nested
    // unknown tag of the same or different name doesn't end the skip early.
    let mut skip_depth: Option<u32> = None;

    let mut tokenizer = Tokenizer::from_str(text);
    while let Some(token) = tokenizer.next() {
        let token = token?;
        match token {
            Token::ElementStart(name) => {
                if skip_depth.is_some() {
                    *skip_depth.as_mut().unwrap() += 1;
                    continue;
                }

                match ElementId::from_tag_name(name) {
                    Some(element) => {
                        let parent = stack.last().copied();
                        if parent.is_none() && element != ElementId::Svg {
                            return Err(Error::MissingSvgRoot);
                        }
                        let node = doc.append(parent, element);
                        stack.push(node);
                    }
                    None => {
                        skip_depth = Some(1);
                    }
                }
            }
            Token::Attribute(name, value) => {
                if skip_depth.is_some() {
                    continue;
                }
                if let Some(&node) = stack.last() {
                    if let Some(attr) = AttributeId::from_name(name) {
                        if attr == AttributeId::Id {
                            doc.insert_id(value.to_string(), node);
                        }
                        doc.push_attribute(node, attr, value);
                    }
                }
            }
            Token::ElementEnd(ElementEnd::Empty) => {
                if let Some(depth) = skip_depth {
                    if depth <= 1 {
                        skip_depth = None;
                    } else {
                        skip_depth = Some(depth - 1);
                    }
                    continue;
                }
                stack.pop();
            }
            Token::ElementEnd(ElementEnd::Close(_)) => {
                if let Some(depth) = skip_depth {
                    if depth <= 1 {
                        skip_depth = None;
                    } else {
                        skip_depth = Some(depth - 1);
                    }
                    continue;
                }
                stack.pop();
            }
        }
    }

    if !stack.is_empty() {
        doc.clear();
        return Err(Error::MissingSvgRoot);
    }

    match doc.root() {
        Some(root) if root.tag_name() == ElementId::Svg => Ok(doc),
        _ => Err(Error::MissingSvgRoot),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ElementId;

    #[test]
    fn plain_rect_tree() {
        let doc = parse(r#"<svg viewBox="0 0 10 10"><rect x="1" y="2" width="3" height="4" fill="#ff0000"/></svg>"#).unwrap();
        let root = doc.root().unwrap();
        assert_eq!(root.tag_name(), ElementId::Svg);
        let rect = root.children().next().unwrap();
        assert_eq!(rect.tag_name(), ElementId::Rect);
        assert_eq!(rect.attribute(AttributeId::Fill), Some("#ff0000"));
    }

    #[test]
    fn non_svg_root_is_rejected() {
        assert!(parse(r#"<g><rect/></g>"#).is_err());
    }

    #[test]
    fn unknown_tag_subtree_is_skipped_entirely() {
        let doc = parse(r#"<svg><marker><rect id="hidden"/></marker><rect id="visible"/></svg>"#).unwrap();
        assert!(doc.by_id("hidden").is_none());
        assert!(doc.by_id("visible").is_some());
        assert_eq!(doc.root().unwrap().children().count(), 1);
    }

    #[test]
    fn id_map_last_one_wins() {
        let doc = parse(r#"<svg><rect id="a"/><circle id="a"/></svg>"#).unwrap();
        assert_eq!(doc.by_id("a").unwrap().tag_name(), ElementId::Circle);
    }

    #[test]
    fn unknown_attribute_is_ignored_not_fatal() {
        let doc = parse(r#"<svg><rect bogus="1" x="5"/></svg>"#).unwrap();
        let rect = doc.root().unwrap().children().next().unwrap();
        assert_eq!(rect.attribute(AttributeId::X), Some("5"));
    }

    #[test]
    fn malformed_structure_fails() {
        assert!(parse(r#"<svg><rect x="1'></svg>"#).is_err());
    }
}
