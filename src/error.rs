// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::xml::XmlError;

/// List of all errors that can occur while loading a document.
///
/// Per-attribute parse failures and `url(#id)` resolution misses are not
/// part of this enum -- they silently fall back to a default and are only
/// surfaced via `log::warn!`.
#[derive(Debug)]
pub enum Error {
    /// Only UTF-8 content is supported.
    NotAnUtf8Str,

    /// Failed to parse the XML structure.
    ParsingFailed(XmlError),

    /// The root element is missing or isn't `<svg>`.
    MissingSvgRoot,

    /// The document doesn't have a valid size.
    ///
    /// Occurs when width and/or height are <= 0, or when none of
    /// `width`/`height`/`viewBox` produce a usable intrinsic size.
    InvalidSize,
}

impl From<XmlError> for Error {
    fn from(e: XmlError) -> Self {
        Error::ParsingFailed(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::NotAnUtf8Str => write!(f, "provided data is not valid UTF-8"),
            Error::ParsingFailed(e) => write!(f, "SVG parsing failed cause {}", e),
            Error::MissingSvgRoot => write!(f, "the document has no <svg> root element"),
            Error::InvalidSize => write!(f, "the document has an invalid size"),
        }
    }
}

impl std::error::Error for Error {}
