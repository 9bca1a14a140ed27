// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::stream::Stream;

/// Parses a `points` attribute (`polyline`/`polygon`): a flat list of
/// numbers, taken two at a time as `(x, y)` pairs. A trailing odd number is
/// dropped, matching the common "ignore the incomplete last pair" behavior.
pub fn parse_points(text: &str) -> Option<Vec<(f64, f64)>> {
    let mut s = Stream::from(text.trim());
    let mut flat = Vec::new();

    s.skip_spaces_and_comma();
    while !s.at_end() {
        flat.push(s.parse_number()?);
        s.skip_spaces_and_comma();
    }

    if flat.len() < 2 {
        return None;
    }

    Some(flat.chunks_exact(2).map(|c| (c[0], c[1])).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_pairs() {
        assert_eq!(parse_points("0,0 1,0 1,1"), Some(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]));
    }

    #[test]
    fn whitespace_separated() {
        assert_eq!(parse_points(" 0 0  1 0 1 1 "), Some(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]));
    }

    #[test]
    fn trailing_odd_value_is_dropped() {
        assert_eq!(parse_points("0,0 1,0 5"), Some(vec![(0.0, 0.0), (1.0, 0.0)]));
    }
}
