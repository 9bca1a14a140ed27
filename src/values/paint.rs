// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::color::{self, Color};
use super::stream::Stream;

/// The parsed shape of a `fill`/`stroke` value, before any `url(#id)` or
/// `var()` lookup has been performed. `currentColor` is resolved by the
/// caller (it needs the inherited `color` property) and so is represented
/// as its own variant rather than folded into `Color`.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    None,
    Color(Color),
    CurrentColor,
    /// `url(#id)` with an optional fallback color, used when the id is
    /// missing or resolves to an unsupported element.
    Ref { id: String, fallback: Option<FallbackColor> },
    /// `var(--name[, fallback])`.
    Var { name: String, fallback: Option<FallbackColor> },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FallbackColor {
    None,
    CurrentColor,
    Color(Color),
}

pub fn parse_paint(text: &str) -> Option<Paint> {
    let trimmed = text.trim();
    if trimmed == "none" {
        return Some(Paint::None);
    }
    if color::is_current_color(trimmed) {
        return Some(Paint::CurrentColor);
    }

    let mut s = Stream::from(trimmed);
    if s.consume_str("url(") {
        return parse_url_paint(&mut s);
    }
    if s.consume_str("var(") {
        return parse_var_paint(&mut s);
    }

    color::parse_color(trimmed).map(Paint::Color)
}

fn parse_url_paint(s: &mut Stream) -> Option<Paint> {
    s.skip_spaces();
    if !s.consume_byte(b'#') {
        return None;
    }
    let start = s.pos();
    while matches!(s.curr_byte(), Some(b) if b != b')' && b != b',') {
        s.advance(1);
    }
    let id = s.slice_from(start).to_string();
    if id.is_empty() {
        return None;
    }

    let fallback = parse_optional_fallback(s)?;

    s.skip_spaces();
    if !s.consume_byte(b')') {
        return None;
    }

    Some(Paint::Ref { id, fallback })
}

fn parse_var_paint(s: &mut Stream) -> Option<Paint> {
    s.skip_spaces();
    if !s.consume_str("--") {
        return None;
    }
    let start = s.pos();
    while matches!(s.curr_byte(), Some(b) if b != b')' && b != b',') {
        s.advance(1);
    }
    let name = s.slice_from(start).trim_end().to_string();
    if name.is_empty() {
        return None;
    }

    let fallback = parse_optional_fallback(s)?;

    s.skip_spaces();
    if !s.consume_byte(b')') {
        return None;
    }

    Some(Paint::Var { name, fallback })
}

/// Parses `, <fallback>` if present, leaving the stream positioned right
/// before the closing `)` either way. Returns `Ok(None)` when there's no
/// comma at all.
fn parse_optional_fallback(s: &mut Stream) -> Option<Option<FallbackColor>> {
    s.skip_spaces();
    if s.curr_byte() != Some(b',') {
        return Some(None);
    }
    s.advance(1);
    s.skip_spaces();
    let start = s.pos();
    while matches!(s.curr_byte(), Some(b) if b != b')') {
        s.advance(1);
    }
    let text = s.slice_from(start).trim();
    Some(Some(parse_fallback_text(text)))
}

fn parse_fallback_text(text: &str) -> FallbackColor {
    if color::is_current_color(text) {
        FallbackColor::CurrentColor
    } else if text == "none" {
        FallbackColor::None
    } else {
        color::parse_color(text).map(FallbackColor::Color).unwrap_or(FallbackColor::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_and_current_color() {
        assert_eq!(parse_paint("none"), Some(Paint::None));
        assert_eq!(parse_paint("currentColor"), Some(Paint::CurrentColor));
    }

    #[test]
    fn bare_color() {
        assert_eq!(parse_paint("#ff0000"), Some(Paint::Color(Color::new_rgb(255, 0, 0))));
    }

    #[test]
    fn url_with_fallback() {
        assert_eq!(
            parse_paint("url(#a, red)"),
            Some(Paint::Ref { id: "a".to_string(), fallback: Some(FallbackColor::Color(Color::new_rgb(255, 0, 0))) })
        );
    }

    #[test]
    fn url_without_fallback() {
        assert_eq!(parse_paint("url(#grad1)"), Some(Paint::Ref { id: "grad1".to_string(), fallback: None }));
    }

    #[test]
    fn var_with_and_without_fallback() {
        assert_eq!(parse_paint("var(--accent)"), Some(Paint::Var { name: "accent".to_string(), fallback: None }));
        assert_eq!(
            parse_paint("var(--accent, blue)"),
            Some(Paint::Var {
                name: "accent".to_string(),
                fallback: Some(FallbackColor::Color(Color::new_rgb(0, 0, 255)))
            })
        );
    }
}
