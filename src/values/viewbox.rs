// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::stream::Stream;
use crate::geom::{Rect, Transform};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    None,
    XMinYMin,
    XMidYMin,
    XMaxYMin,
    XMinYMid,
    XMidYMid,
    XMaxYMid,
    XMinYMax,
    XMidYMax,
    XMaxYMax,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeetOrSlice {
    Meet,
    Slice,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AspectRatio {
    pub align: Align,
    pub meet_or_slice: MeetOrSlice,
}

impl Default for AspectRatio {
    fn default() -> Self {
        AspectRatio { align: Align::XMidYMid, meet_or_slice: MeetOrSlice::Meet }
    }
}

/// Parses `preserveAspectRatio`: `[defer] {align} [meet|slice]`. `defer` is
/// accepted and ignored (it only matters for `<image>` embedding, which this
/// crate's image handling doesn't distinguish).
pub fn parse_aspect_ratio(text: &str) -> Option<AspectRatio> {
    let mut s = Stream::from(text.trim());
    s.consume_str("defer");
    s.skip_spaces();

    let align_str = s.consume_ident();
    let align = match align_str {
        "none" => Align::None,
        "xMinYMin" => Align::XMinYMin,
        "xMidYMin" => Align::XMidYMin,
        "xMaxYMin" => Align::XMaxYMin,
        "xMinYMid" => Align::XMinYMid,
        "xMidYMid" => Align::XMidYMid,
        "xMaxYMid" => Align::XMaxYMid,
        "xMinYMax" => Align::XMinYMax,
        "xMidYMax" => Align::XMidYMax,
        "xMaxYMax" => Align::XMaxYMax,
        _ => return None,
    };

    s.skip_spaces();
    let meet_or_slice = match s.consume_ident() {
        "meet" => MeetOrSlice::Meet,
        "slice" => MeetOrSlice::Slice,
        "" => MeetOrSlice::Meet,
        _ => return None,
    };

    s.skip_spaces();
    if !s.at_end() {
        return None;
    }

    Some(AspectRatio { align, meet_or_slice })
}

/// Parses a `viewBox`: four whitespace/comma-separated numbers
/// `min-x min-y width height`. A non-positive width/height is invalid.
pub fn parse_view_box(text: &str) -> Option<Rect> {
    let mut s = Stream::from(text.trim());
    s.skip_spaces();
    let x = s.parse_number()?;
    s.skip_spaces_and_comma();
    let y = s.parse_number()?;
    s.skip_spaces_and_comma();
    let w = s.parse_number()?;
    s.skip_spaces_and_comma();
    let h = s.parse_number()?;
    s.skip_spaces();

    if !s.at_end() || w <= 0.0 || h <= 0.0 {
        return None;
    }

    Rect::new(x, y, w, h)
}

/// Computes the `viewBox -> viewport` matrix per `preserveAspectRatio`.
pub fn view_box_to_viewport_transform(view_box: Rect, aspect: AspectRatio, viewport_w: f64, viewport_h: f64) -> Transform {
    if aspect.align == Align::None {
        let sx = viewport_w / view_box.width();
        let sy = viewport_h / view_box.height();
        let mut t = Transform::new_scale(sx, sy);
        t.append(&Transform::new_translate(-view_box.x(), -view_box.y()));
        return t;
    }

    let sx = viewport_w / view_box.width();
    let sy = viewport_h / view_box.height();
    let s = match aspect.meet_or_slice {
        MeetOrSlice::Meet => sx.min(sy),
        MeetOrSlice::Slice => sx.max(sy),
    };

    let content_w = view_box.width() * s;
    let content_h = view_box.height() * s;
    let slack_x = viewport_w - content_w;
    let slack_y = viewport_h - content_h;

    let tx = match aspect.align {
        Align::XMinYMin | Align::XMinYMid | Align::XMinYMax => 0.0,
        Align::XMidYMin | Align::XMidYMid | Align::XMidYMax => slack_x / 2.0,
        Align::XMaxYMin | Align::XMaxYMid | Align::XMaxYMax => slack_x,
        Align::None => unreachable!(),
    };
    let ty = match aspect.align {
        Align::XMinYMin | Align::XMidYMin | Align::XMaxYMin => 0.0,
        Align::XMinYMid | Align::XMidYMid | Align::XMaxYMid => slack_y / 2.0,
        Align::XMinYMax | Align::XMidYMax | Align::XMaxYMax => slack_y,
        Align::None => unreachable!(),
    };

    let mut t = Transform::new_translate(tx, ty);
    t.append(&Transform::new_scale(s, s));
    t.append(&Transform::new_translate(-view_box.x(), -view_box.y()));
    t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::FuzzyEq;

    #[test]
    fn view_box_basic() {
        let vb = parse_view_box("0 0 20 10").unwrap();
        assert!(vb.fuzzy_eq(&Rect::new(0.0, 0.0, 20.0, 10.0).unwrap()));
    }

    #[test]
    fn view_box_rejects_non_positive_dims() {
        assert!(parse_view_box("0 0 0 10").is_none());
    }

    #[test]
    fn aspect_ratio_default_is_xmidymid_meet() {
        assert_eq!(parse_aspect_ratio("").unwrap_or_default(), AspectRatio::default());
        assert_eq!(parse_aspect_ratio("xMidYMid meet"), Some(AspectRatio::default()));
    }

    #[test]
    fn none_alignment_is_non_uniform_scale() {
        let vb = Rect::new(0.0, 0.0, 10.0, 10.0).unwrap();
        let aspect = AspectRatio { align: Align::None, meet_or_slice: MeetOrSlice::Meet };
        let t = view_box_to_viewport_transform(vb, aspect, 200.0, 100.0);
        let (x, y) = t.apply(10.0, 10.0);
        assert!(x.fuzzy_eq(&200.0));
        assert!(y.fuzzy_eq(&100.0));
    }

    #[test]
    fn meet_centers_when_aspect_differs() {
        let vb = Rect::new(0.0, 0.0, 10.0, 10.0).unwrap();
        let t = view_box_to_viewport_transform(vb, AspectRatio::default(), 200.0, 100.0);
        // scale = min(20, 10) = 10; content is 100x100 inside a 200x100 viewport.
        let (x0, y0) = t.apply(0.0, 0.0);
        assert!(x0.fuzzy_eq(&50.0));
        assert!(y0.fuzzy_eq(&0.0));
    }
}
