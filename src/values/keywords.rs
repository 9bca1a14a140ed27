// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The closed-keyword attributes: small enough that a dedicated scanner
//! would be overkill, so each is just a `match` over the trimmed text.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FillRule {
    NonZero,
    EvenOdd,
}

impl Default for FillRule {
    fn default() -> Self {
        FillRule::NonZero
    }
}

pub fn parse_fill_rule(text: &str) -> Option<FillRule> {
    match text.trim() {
        "nonzero" => Some(FillRule::NonZero),
        "evenodd" => Some(FillRule::EvenOdd),
        _ => None,
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

impl Default for LineCap {
    fn default() -> Self {
        LineCap::Butt
    }
}

pub fn parse_line_cap(text: &str) -> Option<LineCap> {
    match text.trim() {
        "butt" => Some(LineCap::Butt),
        "round" => Some(LineCap::Round),
        "square" => Some(LineCap::Square),
        _ => None,
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
}

impl Default for LineJoin {
    fn default() -> Self {
        LineJoin::Miter
    }
}

pub fn parse_line_join(text: &str) -> Option<LineJoin> {
    match text.trim() {
        "miter" => Some(LineJoin::Miter),
        "round" => Some(LineJoin::Round),
        "bevel" => Some(LineJoin::Bevel),
        _ => None,
    }
}

/// `gradientUnits`/`clipPathUnits`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Units {
    UserSpaceOnUse,
    ObjectBoundingBox,
}

pub fn parse_units(text: &str, default: Units) -> Units {
    match text.trim() {
        "userSpaceOnUse" => Units::UserSpaceOnUse,
        "objectBoundingBox" => Units::ObjectBoundingBox,
        _ => default,
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SpreadMethod {
    Pad,
    Reflect,
    Repeat,
}

impl Default for SpreadMethod {
    fn default() -> Self {
        SpreadMethod::Pad
    }
}

pub fn parse_spread_method(text: &str) -> Option<SpreadMethod> {
    match text.trim() {
        "pad" => Some(SpreadMethod::Pad),
        "reflect" => Some(SpreadMethod::Reflect),
        "repeat" => Some(SpreadMethod::Repeat),
        _ => None,
    }
}

/// `display`: only `none` is meaningful, anything else behaves as the
/// default (visible).
pub fn is_display_none(text: &str) -> bool {
    text.trim() == "none"
}

/// `visibility`: inherited, default `visible`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Visibility {
    Visible,
    Hidden,
    Collapse,
}

impl Default for Visibility {
    fn default() -> Self {
        Visibility::Visible
    }
}

pub fn parse_visibility(text: &str) -> Option<Visibility> {
    match text.trim() {
        "visible" => Some(Visibility::Visible),
        "hidden" => Some(Visibility::Hidden),
        "collapse" => Some(Visibility::Collapse),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_rule_roundtrip() {
        assert_eq!(parse_fill_rule("evenodd"), Some(FillRule::EvenOdd));
        assert_eq!(parse_fill_rule("bogus"), None);
    }

    #[test]
    fn units_falls_back_to_default_on_unknown() {
        assert_eq!(parse_units("bogus", Units::ObjectBoundingBox), Units::ObjectBoundingBox);
        assert_eq!(parse_units("userSpaceOnUse", Units::ObjectBoundingBox), Units::UserSpaceOnUse);
    }
}
