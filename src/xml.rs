// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A scanner over the tiny XML subset this crate needs: elements,
//! attributes, comments, CDATA, the XML declaration and DOCTYPE. Text
//! nodes are discarded and entity references are never expanded -- this is
//! not a general-purpose XML parser, it exists to feed `crate::parser`.

use std::fmt;

#[derive(Debug)]
pub struct XmlError {
    msg: &'static str,
    pos: usize,
}

impl fmt::Display for XmlError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} at byte {}", self.msg, self.pos)
    }
}

impl std::error::Error for XmlError {}

fn err(msg: &'static str, pos: usize) -> XmlError {
    XmlError { msg, pos }
}

/// How an element's content ended.
#[derive(Debug, PartialEq, Eq)]
pub enum ElementEnd<'a> {
    /// `/>`.
    Empty,
    /// `</name>`.
    Close(&'a str),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// `<name`; followed by zero or more `Attribute` tokens and then either
    /// `ElementEnd(Empty)` or the element's children and a matching
    /// `ElementEnd(Close)`.
    ElementStart(&'a str),
    Attribute(&'a str, &'a str),
    ElementEnd(ElementEnd<'a>),
}

pub struct Tokenizer<'a> {
    text: &'a str,
    pos: usize,
    /// Set right after `ElementStart`/attributes, before we know whether
    /// the tag self-closes.
    in_tag: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn from_str(text: &'a str) -> Self {
        Tokenizer { text, pos: 0, in_tag: false }
    }

    fn bytes(&self) -> &'a [u8] {
        self.text.as_bytes()
    }

    fn curr(&self) -> Option<u8> {
        self.bytes().get(self.pos).copied()
    }

    fn starts_with(&self, s: &str) -> bool {
        self.text[self.pos..].starts_with(s)
    }

    fn skip_spaces(&mut self) {
        while matches!(self.curr(), Some(b) if b == b' ' || b == b'\t' || b == b'\n' || b == b'\r') {
            self.pos += 1;
        }
    }

    fn skip_misc_before_tag(&mut self) -> Result<(), XmlError> {
        loop {
            self.skip_spaces();
            if self.starts_with("<?") {
                self.skip_until("?>")?;
            } else if self.starts_with("<!--") {
                self.skip_until("-->")?;
            } else if self.starts_with("<!DOCTYPE") {
                self.skip_doctype()?;
            } else {
                return Ok(());
            }
        }
    }

    fn skip_until(&mut self, end: &str) -> Result<(), XmlError> {
        let start = self.pos;
        match self.text[self.pos..].find(end) {
            Some(rel) => {
                self.pos += rel + end.len();
                Ok(())
            }
            None => Err(err("unterminated construct", start)),
        }
    }

    fn skip_doctype(&mut self) -> Result<(), XmlError> {
        let start = self.pos;
        let mut depth = 0i32;
        loop {
            match self.curr() {
                None => return Err(err("unterminated DOCTYPE", start)),
                Some(b'[') => {
                    depth += 1;
                    self.pos += 1;
                }
                Some(b']') => {
                    depth -= 1;
                    self.pos += 1;
                }
                Some(b'>') if depth <= 0 => {
                    self.pos += 1;
                    return Ok(());
                }
                _ => self.pos += 1,
            }
        }
    }

    /// Returns the next meaningful token, or `None` at end of input.
    pub fn next(&mut self) -> Option<Result<Token<'a>, XmlError>> {
        if self.in_tag {
            return Some(self.next_in_tag());
        }

        loop {
            if let Err(e) = self.skip_misc_before_tag() {
                return Some(Err(e));
            }

            if self.pos >= self.text.len() {
                return None;
            }

            if self.starts_with("<![CDATA[") {
                // CDATA outside of an element is meaningless text content; skip it.
                if let Err(e) = self.skip_until("]]>") {
                    return Some(Err(e));
                }
                continue;
            }

            if self.curr() == Some(b'<') {
                if self.bytes().get(self.pos + 1) == Some(&b'/') {
                    return Some(self.parse_close_tag());
                }
                return Some(self.parse_open_tag());
            }

            // Bare text content between tags: discarded.
            let start = self.pos;
            while !self.at_tag_boundary() {
                self.pos += 1;
            }
            if self.pos == start {
                return Some(Err(err("stray data", start)));
            }
        }
    }

    fn at_tag_boundary(&self) -> bool {
        self.curr() == Some(b'<') || self.pos >= self.text.len()
    }

    fn parse_open_tag(&mut self) -> Result<Token<'a>, XmlError> {
        let start = self.pos;
        self.pos += 1; // '<'
        let name_start = self.pos;
        while matches!(self.curr(), Some(b) if !is_tag_delim(b)) {
            self.pos += 1;
        }
        if self.pos == name_start {
            return Err(err("missing element name", start));
        }
        let name = &self.text[name_start..self.pos];
        self.in_tag = true;
        Ok(Token::ElementStart(name))
    }

    fn parse_close_tag(&mut self) -> Result<Token<'a>, XmlError> {
        let start = self.pos;
        self.pos += 2; // "</"
        let name_start = self.pos;
        while matches!(self.curr(), Some(b) if b != b'>' && !b.is_ascii_whitespace()) {
            self.pos += 1;
        }
        let name = &self.text[name_start..self.pos];
        self.skip_spaces();
        if self.curr() != Some(b'>') {
            return Err(err("malformed close tag", start));
        }
        self.pos += 1;
        Ok(Token::ElementEnd(ElementEnd::Close(name)))
    }

    fn next_in_tag(&mut self) -> Result<Token<'a>, XmlError> {
        self.skip_spaces();
        let start = self.pos;
        match self.curr() {
            None => Err(err("unterminated tag", start)),
            Some(b'/') => {
                self.pos += 1;
                if self.curr() != Some(b'>') {
                    return Err(err("malformed self-closing tag", start));
                }
                self.pos += 1;
                self.in_tag = false;
                Ok(Token::ElementEnd(ElementEnd::Empty))
            }
            Some(b'>') => {
                self.pos += 1;
                self.in_tag = false;
                // The element has children; hand control back to the
                // top-level loop, which will emit the next start/close tag.
                self.next_in_tag_to_body()
            }
            _ => self.parse_attribute(),
        }
    }

    /// Called right after consuming the `>` that opens an element's body.
    /// Falls through to whatever token comes next (child start tag, close
    /// tag, or this same element's close tag).
    fn next_in_tag_to_body(&mut self) -> Result<Token<'a>, XmlError> {
        loop {
            self.skip_misc_before_tag()?;

            if self.pos >= self.text.len() {
                return Err(err("unexpected end of document", self.pos));
            }

            if self.starts_with("<![CDATA[") {
                self.skip_until("]]>")?;
                continue;
            }

            if self.curr() == Some(b'<') {
                if self.bytes().get(self.pos + 1) == Some(&b'/') {
                    return self.parse_close_tag();
                }
                return self.parse_open_tag();
            }

            // Text content: discard up to the next tag.
            let start = self.pos;
            while !self.at_tag_boundary() {
                self.pos += 1;
            }
            if self.pos == start {
                return Err(err("stray data", start));
            }
        }
    }

    fn parse_attribute(&mut self) -> Result<Token<'a>, XmlError> {
        let start = self.pos;
        let name_start = self.pos;
        while matches!(self.curr(), Some(b) if !is_tag_delim(b) && b != b'=') {
            self.pos += 1;
        }
        if self.pos == name_start {
            return Err(err("expected attribute name", start));
        }
        let name = &self.text[name_start..self.pos];

        self.skip_spaces();
        if self.curr() != Some(b'=') {
            return Err(err("expected '='", self.pos));
        }
        self.pos += 1;
        self.skip_spaces();

        let quote = self.curr();
        if quote != Some(b'"') && quote != Some(b'\'') {
            return Err(err("expected quote", self.pos));
        }
        let quote = quote.unwrap();
        self.pos += 1;
        let value_start = self.pos;
        while matches!(self.curr(), Some(b) if b != quote) {
            self.pos += 1;
        }
        if self.curr() != Some(quote) {
            return Err(err("unterminated attribute value", value_start));
        }
        let value = &self.text[value_start..self.pos];
        self.pos += 1;

        Ok(Token::Attribute(name, value))
    }
}

#[inline]
fn is_tag_delim(b: u8) -> bool {
    b == b'>' || b == b'/' || b.is_ascii_whitespace()
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>, XmlError>;

    fn next(&mut self) -> Option<Self::Item> {
        Tokenizer::next(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(text: &str) -> Result<Vec<Token>, XmlError> {
        Tokenizer::from_str(text).collect()
    }

    #[test]
    fn self_closing_with_attrs() {
        let toks = collect(r#"<rect x="1" y="2"/>"#).unwrap();
        assert_eq!(
            toks,
            vec![
                Token::ElementStart("rect"),
                Token::Attribute("x", "1"),
                Token::Attribute("y", "2"),
                Token::ElementEnd(ElementEnd::Empty),
            ]
        );
    }

    #[test]
    fn nested_elements() {
        let toks = collect(r#"<svg><rect/></svg>"#).unwrap();
        assert_eq!(
            toks,
            vec![
                Token::ElementStart("svg"),
                Token::ElementStart("rect"),
                Token::ElementEnd(ElementEnd::Empty),
                Token::ElementEnd(ElementEnd::Close("svg")),
            ]
        );
    }

    #[test]
    fn skips_xml_decl_comment_cdata_doctype() {
        let toks = collect(
            r#"<?xml version="1.0"?><!DOCTYPE svg [ <!ENTITY foo "bar"> ]><!-- hi --><svg><![CDATA[junk]]></svg>"#,
        )
        .unwrap();
        assert_eq!(toks.len(), 2);
        assert_eq!(toks[0], Token::ElementStart("svg"));
    }

    #[test]
    fn unknown_subtree_is_still_tokenized_for_skipping() {
        // The tokenizer has no notion of "known tags"; that's the parser's
        // job. It must still emit balanced tokens for an unrecognized tag.
        let toks = collect(r#"<svg><foo><bar/></foo></svg>"#).unwrap();
        assert_eq!(toks.len(), 6);
    }

    #[test]
    fn unterminated_comment_is_an_error() {
        let mut t = Tokenizer::from_str("<!-- never closed");
        assert!(t.next().unwrap().is_err());
    }

    #[test]
    fn mismatched_quote_is_an_error() {
        let mut t = Tokenizer::from_str(r#"<rect x="1'/>"#);
        // ElementStart ok, then the attribute parse should fail.
        assert!(matches!(t.next(), Some(Ok(Token::ElementStart("rect")))));
        assert!(t.next().unwrap().is_err());
    }
}
