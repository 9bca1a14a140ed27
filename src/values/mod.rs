// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Attribute-value scanners: numbers, lengths, colors, paints, transform
//! lists, `viewBox`/`preserveAspectRatio`, the path `d` mini-language,
//! `points` lists, and the small closed-keyword attributes.

mod color;
mod keywords;
mod number;
mod paint;
mod path_parser;
mod points;
mod stream;
mod transform;
mod viewbox;

pub use color::{is_current_color, parse_color, Color};
pub use keywords::{
    is_display_none, parse_fill_rule, parse_line_cap, parse_line_join, parse_spread_method, parse_units,
    parse_visibility, FillRule, LineCap, LineJoin, SpreadMethod, Units, Visibility,
};
pub use number::{parse_length, parse_number, parse_number_list, parse_opacity, Length, LengthUnit};
pub use paint::{parse_paint, FallbackColor, Paint};
pub use path_parser::parse_path;
pub use points::parse_points;
pub use stream::Stream;
pub use transform::parse_transform_list;
pub use viewbox::{parse_aspect_ratio, parse_view_box, view_box_to_viewport_transform, Align, AspectRatio, MeetOrSlice};
