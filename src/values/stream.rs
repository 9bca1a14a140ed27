// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A small cursor over a `&str`, shared by every value parser in
//! `crate::values`. Grounded on `svgrtypes::Stream`'s cursor design, cut
//! down to just what this crate's parsers need.

trait ByteExt {
    fn is_digit(&self) -> bool;
    fn is_space(&self) -> bool;
    fn is_sign(&self) -> bool;
    fn is_letter(&self) -> bool;
    fn is_hex_digit(&self) -> bool;
}

impl ByteExt for u8 {
    #[inline]
    fn is_digit(&self) -> bool {
        matches!(*self, b'0'..=b'9')
    }

    #[inline]
    fn is_space(&self) -> bool {
        matches!(*self, b' ' | b'\t' | b'\n' | b'\r')
    }

    #[inline]
    fn is_sign(&self) -> bool {
        matches!(*self, b'+' | b'-')
    }

    #[inline]
    fn is_letter(&self) -> bool {
        matches!(*self, b'A'..=b'Z' | b'a'..=b'z')
    }

    #[inline]
    fn is_hex_digit(&self) -> bool {
        matches!(*self, b'0'..=b'9' | b'A'..=b'F' | b'a'..=b'f')
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Stream<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> From<&'a str> for Stream<'a> {
    #[inline]
    fn from(text: &'a str) -> Self {
        Stream { text, pos: 0 }
    }
}

impl<'a> Stream<'a> {
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    #[inline]
    pub fn curr_byte(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.text.len());
    }

    pub fn skip_spaces(&mut self) {
        while matches!(self.curr_byte(), Some(b) if b.is_space()) {
            self.advance(1);
        }
    }

    /// Skips whitespace and at most one comma, as required between
    /// numbers in most SVG value lists.
    pub fn skip_spaces_and_comma(&mut self) {
        self.skip_spaces();
        if self.curr_byte() == Some(b',') {
            self.advance(1);
            self.skip_spaces();
        }
    }

    #[inline]
    pub fn starts_with(&self, s: &str) -> bool {
        self.text[self.pos..].starts_with(s)
    }

    pub fn consume_str(&mut self, s: &str) -> bool {
        if self.starts_with(s) {
            self.advance(s.len());
            true
        } else {
            false
        }
    }

    pub fn consume_byte(&mut self, b: u8) -> bool {
        if self.curr_byte() == Some(b) {
            self.advance(1);
            true
        } else {
            false
        }
    }

    pub(crate) fn slice_from(&self, start: usize) -> &'a str {
        &self.text[start..self.pos]
    }

    pub fn remaining(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Consumes a run of ASCII letters (used for keywords and units).
    pub fn consume_ident(&mut self) -> &'a str {
        let start = self.pos;
        while matches!(self.curr_byte(), Some(b) if b.is_letter() || b == b'-') {
            self.advance(1);
        }
        self.slice_from(start)
    }

    /// Parses an SVG/CSS `number`:
    /// `[+-]? ( digit* '.' digit+ | digit+ ) ( [eE] [+-]? digit+ )?`.
    ///
    /// The exponent marker is only consumed when followed by a digit or a
    /// sign-then-digit -- this is what keeps `3em`/`3ex` length units from
    /// being swallowed as `3e` + garbage; any other unit prefix starting
    /// with `e` (there are none in this crate's recognized length units)
    /// would not get the same protection.
    pub fn parse_number(&mut self) -> Option<f64> {
        let start = self.pos;

        if matches!(self.curr_byte(), Some(b) if b.is_sign()) {
            self.advance(1);
        }

        let mut saw_digits = false;
        while matches!(self.curr_byte(), Some(b) if b.is_digit()) {
            self.advance(1);
            saw_digits = true;
        }

        if self.curr_byte() == Some(b'.') {
            self.advance(1);
            while matches!(self.curr_byte(), Some(b) if b.is_digit()) {
                self.advance(1);
                saw_digits = true;
            }
        }

        if !saw_digits {
            self.pos = start;
            return None;
        }

        if matches!(self.curr_byte(), Some(b'e') | Some(b'E')) {
            let mark = self.pos;
            let mut p = self.pos + 1;
            let bytes = self.text.as_bytes();
            if matches!(bytes.get(p), Some(b) if b.is_sign()) {
                p += 1;
            }
            if matches!(bytes.get(p), Some(b) if b.is_digit()) {
                self.pos = p;
                while matches!(self.curr_byte(), Some(b) if b.is_digit()) {
                    self.advance(1);
                }
            } else {
                self.pos = mark;
            }
        }

        self.slice_from(start).parse::<f64>().ok()
    }

    /// Parses a number immediately followed by an optional `%`.
    /// Returns `(value, is_percent)`.
    pub fn parse_number_or_percent(&mut self) -> Option<(f64, bool)> {
        let n = self.parse_number()?;
        if self.consume_byte(b'%') {
            Some((n, true))
        } else {
            Some((n, false))
        }
    }

    /// Parses a run of hex digits (for `#rgb`/`#rrggbb` colors).
    pub fn consume_hex_digits(&mut self) -> &'a str {
        let start = self.pos;
        while matches!(self.curr_byte(), Some(b) if b.is_hex_digit()) {
            self.advance(1);
        }
        self.slice_from(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_basic() {
        let mut s = Stream::from("-12.5e2rest");
        assert_eq!(s.parse_number(), Some(-1250.0));
        assert_eq!(s.remaining(), "rest");
    }

    #[test]
    fn em_suffix_not_consumed_as_exponent() {
        let mut s = Stream::from("3em");
        assert_eq!(s.parse_number(), Some(3.0));
        assert_eq!(s.remaining(), "em");
    }

    #[test]
    fn ex_suffix_not_consumed_as_exponent() {
        let mut s = Stream::from("3ex");
        assert_eq!(s.parse_number(), Some(3.0));
        assert_eq!(s.remaining(), "ex");
    }

    #[test]
    fn bare_e_letter_not_confused_for_exponent() {
        let mut s = Stream::from("3e");
        assert_eq!(s.parse_number(), Some(3.0));
        assert_eq!(s.remaining(), "e");
    }
}
