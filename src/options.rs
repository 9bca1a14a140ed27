// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Load-time configuration.

/// Options controlling how a document without an explicit pixel size (no
/// `viewBox`, no `width`/`height`) is sized, and how absolute length units
/// resolve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Options {
    /// Used to resolve `width`/`height` given as a percentage, and as the
    /// intrinsic width when neither is present.
    pub fallback_width: f64,
    /// Same as `fallback_width`, for height.
    pub fallback_height: f64,
    /// Dots per inch, used to convert `in`/`cm`/`mm`/`pt`/`pc` lengths to
    /// user units.
    pub dpi: f64,
}

impl Default for Options {
    fn default() -> Self {
        Options { fallback_width: 100.0, fallback_height: 100.0, dpi: 96.0 }
    }
}
