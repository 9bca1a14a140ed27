// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::stream::Stream;

/// A `<length>` with its unit still attached, per §4.B.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LengthUnit {
    None,
    Percent,
    Em,
    Ex,
    Px,
    In,
    Cm,
    Mm,
    Pt,
    Pc,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Length {
    pub number: f64,
    pub unit: LengthUnit,
}

impl Length {
    pub fn new(number: f64, unit: LengthUnit) -> Self {
        Length { number, unit }
    }

    /// Resolves the length to user units.
    ///
    /// `dpi` drives the absolute units (`in`/`cm`/`mm`/`pt`/`pc`); `font_size`
    /// drives `em`/`ex` (`ex` is approximated as half the font size, same as
    /// the reference renderer this crate's value parsing is grounded on);
    /// `reference` is the percentage basis for `%%`.
    pub fn to_user_units(self, dpi: f64, font_size: f64, reference: f64) -> f64 {
        match self.unit {
            LengthUnit::None | LengthUnit::Px => self.number,
            LengthUnit::Percent => self.number / 100.0 * reference,
            LengthUnit::Em => self.number * font_size,
            LengthUnit::Ex => self.number * font_size * 0.5,
            LengthUnit::In => self.number * dpi,
            LengthUnit::Cm => self.number * dpi / 2.54,
            LengthUnit::Mm => self.number * dpi / 25.4,
            LengthUnit::Pt => self.number * dpi / 72.0,
            LengthUnit::Pc => self.number * dpi / 6.0,
        }
    }
}

/// Parses a standalone `number` (no unit suffix allowed).
pub fn parse_number(text: &str) -> Option<f64> {
    let mut s = Stream::from(text.trim());
    let n = s.parse_number()?;
    s.skip_spaces();
    if s.at_end() {
        Some(n)
    } else {
        None
    }
}

/// Parses a `<length>`: a number optionally followed by a unit identifier
/// or `%`. An unrecognized unit is treated as a parse failure.
pub fn parse_length(text: &str) -> Option<Length> {
    let mut s = Stream::from(text.trim());
    let n = s.parse_number()?;

    if s.consume_byte(b'%') {
        s.skip_spaces();
        return if s.at_end() { Some(Length::new(n, LengthUnit::Percent)) } else { None };
    }

    let unit_str = s.consume_ident();
    let unit = match unit_str {
        "" => LengthUnit::None,
        "em" => LengthUnit::Em,
        "ex" => LengthUnit::Ex,
        "px" => LengthUnit::Px,
        "in" => LengthUnit::In,
        "cm" => LengthUnit::Cm,
        "mm" => LengthUnit::Mm,
        "pt" => LengthUnit::Pt,
        "pc" => LengthUnit::Pc,
        _ => return None,
    };

    s.skip_spaces();
    if s.at_end() {
        Some(Length::new(n, unit))
    } else {
        None
    }
}

/// Parses a `<list-of-numbers>` separated by whitespace and/or commas.
pub fn parse_number_list(text: &str) -> Option<Vec<f64>> {
    let mut s = Stream::from(text.trim());
    let mut out = Vec::new();
    s.skip_spaces();
    while !s.at_end() {
        out.push(s.parse_number()?);
        s.skip_spaces_and_comma();
    }
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

/// Parses an opacity value, clamped to `[0, 1]`. Percentages are accepted.
pub fn parse_opacity(text: &str) -> Option<f64> {
    let mut s = Stream::from(text.trim());
    let (n, is_percent) = s.parse_number_or_percent()?;
    s.skip_spaces();
    if !s.at_end() {
        return None;
    }
    let n = if is_percent { n / 100.0 } else { n };
    Some(n.max(0.0).min(1.0))
}
