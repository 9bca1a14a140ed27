// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::stream::Stream;
use crate::path::PathData;

/// Which kind of control point a smooth command (`S`/`s`, `T`/`t`) reflects.
#[derive(Clone, Copy, PartialEq, Eq)]
enum PrevControl {
    None,
    Cubic(f64, f64),
    Quad(f64, f64),
}

/// Parses an SVG path `d` string into a `PathData`.
///
/// Implements the standard implicit-repeat rule (extra coordinate groups
/// after a command's fixed arity repeat the same command, with `M`/`m`
/// repeating as `L`/`l`) and the `S`/`T` smooth reflection rule: the
/// reflected control point is the current point's mirror image of the
/// previous command's control point, or the current point itself when the
/// previous command isn't of the matching family.
///
/// A `d` that doesn't start with `M`/`m` is a hard parse error.
pub fn parse_path(text: &str) -> Option<PathData> {
    let mut s = Stream::from(text.trim());
    let mut path = PathData::new();

    let mut cx = 0.0_f64;
    let mut cy = 0.0_f64;
    let mut start_x = 0.0_f64;
    let mut start_y = 0.0_f64;
    let mut prev_control = PrevControl::None;
    let mut cmd: Option<u8> = None;

    s.skip_spaces_and_comma();
    if s.curr_byte() != Some(b'M') && s.curr_byte() != Some(b'm') {
        return None;
    }

    while !s.at_end() {
        s.skip_spaces_and_comma();
        if s.at_end() {
            break;
        }

        let byte = s.curr_byte()?;
        let is_letter = byte.is_ascii_alphabetic();
        if is_letter {
            s.advance(1);
            cmd = Some(byte);
        } else if cmd == Some(b'M') {
            cmd = Some(b'L');
        } else if cmd == Some(b'm') {
            cmd = Some(b'l');
        } else if cmd == Some(b'Z') || cmd == Some(b'z') {
            // closepath takes no arguments and can't implicitly repeat;
            // trailing bare numbers after it are a hard parse error.
            return None;
        }

        let c = cmd?;
        match c {
            b'M' | b'm' => {
                let (x, y) = parse_coord_pair(&mut s)?;
                let (x, y) = if c == b'm' { (cx + x, cy + y) } else { (x, y) };
                path.move_to(x, y);
                cx = x;
                cy = y;
                start_x = x;
                start_y = y;
                prev_control = PrevControl::None;
            }
            b'L' | b'l' => {
                let (x, y) = parse_coord_pair(&mut s)?;
                let (x, y) = if c == b'l' { (cx + x, cy + y) } else { (x, y) };
                path.line_to(x, y);
                cx = x;
                cy = y;
                prev_control = PrevControl::None;
            }
            b'H' | b'h' => {
                s.skip_spaces();
                let x = s.parse_number()?;
                let x = if c == b'h' { cx + x } else { x };
                path.line_to(x, cy);
                cx = x;
                prev_control = PrevControl::None;
            }
            b'V' | b'v' => {
                s.skip_spaces();
                let y = s.parse_number()?;
                let y = if c == b'v' { cy + y } else { y };
                path.line_to(cx, y);
                cy = y;
                prev_control = PrevControl::None;
            }
            b'C' | b'c' => {
                let (x1, y1) = parse_coord_pair(&mut s)?;
                let (x2, y2) = parse_coord_pair(&mut s)?;
                let (x, y) = parse_coord_pair(&mut s)?;
                let (x1, y1, x2, y2, x, y) = if c == b'c' {
                    (cx + x1, cy + y1, cx + x2, cy + y2, cx + x, cy + y)
                } else {
                    (x1, y1, x2, y2, x, y)
                };
                path.cubic_to(x1, y1, x2, y2, x, y);
                prev_control = PrevControl::Cubic(x2, y2);
                cx = x;
                cy = y;
            }
            b'S' | b's' => {
                let (x2, y2) = parse_coord_pair(&mut s)?;
                let (x, y) = parse_coord_pair(&mut s)?;
                let (x2, y2, x, y) = if c == b's' { (cx + x2, cy + y2, cx + x, cy + y) } else { (x2, y2, x, y) };
                let (x1, y1) = match prev_control {
                    PrevControl::Cubic(px, py) => (2.0 * cx - px, 2.0 * cy - py),
                    _ => (cx, cy),
                };
                path.cubic_to(x1, y1, x2, y2, x, y);
                prev_control = PrevControl::Cubic(x2, y2);
                cx = x;
                cy = y;
            }
            b'Q' | b'q' => {
                let (x1, y1) = parse_coord_pair(&mut s)?;
                let (x, y) = parse_coord_pair(&mut s)?;
                let (x1, y1, x, y) = if c == b'q' { (cx + x1, cy + y1, cx + x, cy + y) } else { (x1, y1, x, y) };
                path.quad_to(x1, y1, x, y);
                prev_control = PrevControl::Quad(x1, y1);
                cx = x;
                cy = y;
            }
            b'T' | b't' => {
                let (x, y) = parse_coord_pair(&mut s)?;
                let (x, y) = if c == b't' { (cx + x, cy + y) } else { (x, y) };
                let (x1, y1) = match prev_control {
                    PrevControl::Quad(px, py) => (2.0 * cx - px, 2.0 * cy - py),
                    _ => (cx, cy),
                };
                path.quad_to(x1, y1, x, y);
                prev_control = PrevControl::Quad(x1, y1);
                cx = x;
                cy = y;
            }
            b'A' | b'a' => {
                s.skip_spaces();
                let rx = s.parse_number()?;
                s.skip_spaces_and_comma();
                let ry = s.parse_number()?;
                s.skip_spaces_and_comma();
                let rotation = s.parse_number()?;
                s.skip_spaces_and_comma();
                let large_arc = parse_flag(&mut s)?;
                s.skip_spaces_and_comma();
                let sweep = parse_flag(&mut s)?;
                s.skip_spaces_and_comma();
                let (x, y) = parse_coord_pair(&mut s)?;
                let (x, y) = if c == b'a' { (cx + x, cy + y) } else { (x, y) };
                path.arc_to(rx, ry, rotation, large_arc, sweep, x, y);
                cx = x;
                cy = y;
                prev_control = PrevControl::None;
            }
            b'Z' | b'z' => {
                path.close();
                cx = start_x;
                cy = start_y;
                prev_control = PrevControl::None;
            }
            _ => return None,
        }
    }

    Some(path)
}

fn parse_coord_pair(s: &mut Stream) -> Option<(f64, f64)> {
    s.skip_spaces();
    let x = s.parse_number()?;
    s.skip_spaces_and_comma();
    let y = s.parse_number()?;
    Some((x, y))
}

/// Arc flags are single `0`/`1` characters, possibly glued to the next
/// token with no separator (`1100` is `large_arc=1 sweep=1 x=0 0`).
fn parse_flag(s: &mut Stream) -> Option<bool> {
    s.skip_spaces();
    match s.curr_byte() {
        Some(b'0') => {
            s.advance(1);
            Some(false)
        }
        Some(b'1') => {
            s.advance(1);
            Some(true)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::FuzzyEq;
    use crate::path::PathCommand;

    #[test]
    fn rejects_d_not_starting_with_moveto() {
        assert!(parse_path("L 1 1").is_none());
    }

    #[test]
    fn implicit_lineto_repeat() {
        let p = parse_path("M0 0 L1 1 2 2").unwrap();
        assert_eq!(p.commands(), &[PathCommand::MoveTo, PathCommand::LineTo, PathCommand::LineTo]);
        assert_eq!(p.points(), &[0.0, 0.0, 1.0, 1.0, 2.0, 2.0]);
    }

    #[test]
    fn moveto_then_bare_coords_become_lineto() {
        let p = parse_path("M0 0 1 1").unwrap();
        assert_eq!(p.commands(), &[PathCommand::MoveTo, PathCommand::LineTo]);
    }

    #[test]
    fn relative_commands_accumulate() {
        let p = parse_path("m0 0 l10 0 0 10").unwrap();
        assert_eq!(p.points(), &[0.0, 0.0, 10.0, 0.0, 10.0, 10.0]);
    }

    #[test]
    fn smooth_cubic_reflects_previous_control() {
        let p = parse_path("M0 0 C0 10 10 10 10 0 S20 -10 20 0").unwrap();
        // second cubic's first control should be the reflection of (10,10) about (10,0): (10,-10)
        let pts = p.points();
        // commands: move(2) + cubic(6) + cubic(6) = 14 values; second cubic starts at index 8
        assert!(pts[8].fuzzy_eq(&10.0));
        assert!(pts[9].fuzzy_eq(&-10.0));
    }

    #[test]
    fn smooth_without_preceding_cubic_uses_current_point() {
        let p = parse_path("M0 0 S10 10 20 0").unwrap();
        let pts = p.points();
        assert!(pts[2].fuzzy_eq(&0.0));
        assert!(pts[3].fuzzy_eq(&0.0));
    }

    #[test]
    fn close_returns_to_subpath_start() {
        let p = parse_path("M0 0 L10 0 L10 10 Z L5 5").unwrap();
        let pts = p.points();
        // the LineTo after Z should start from (0,0), landing at (5,5)
        let last = pts.len();
        assert!(pts[last - 2].fuzzy_eq(&5.0));
        assert!(pts[last - 1].fuzzy_eq(&5.0));
    }

    #[test]
    fn bare_numbers_after_close_are_rejected_not_looped() {
        assert!(parse_path("M0 0 Z 1 1").is_none());
    }

    #[test]
    fn glued_arc_flags() {
        let p = parse_path("M0 0 A5 5 0 1110 0").unwrap();
        assert!(!p.is_empty());
    }
}
