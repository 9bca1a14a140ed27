// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::stream::Stream;
use crate::geom::Transform;

/// Parses a `transform`/`gradientTransform`/`patternTransform` list:
/// `{matrix|translate|scale|rotate|skewX|skewY}(args)` separated by
/// whitespace and/or commas. Entries compose left-to-right as applied to
/// points (`p' = M1*M2*...*Mn*p`), so each parsed matrix is folded in with
/// `acc.append(&next)`.
pub fn parse_transform_list(text: &str) -> Option<Transform> {
    let mut s = Stream::from(text.trim());
    let mut acc = Transform::identity();

    s.skip_spaces();
    if s.at_end() {
        return None;
    }

    while !s.at_end() {
        let next = parse_one(&mut s)?;
        acc.append(&next);
        s.skip_spaces_and_comma();
    }

    Some(acc)
}

fn parse_one(s: &mut Stream) -> Option<Transform> {
    let name = s.consume_ident();
    s.skip_spaces();
    if !s.consume_byte(b'(') {
        return None;
    }

    let args = parse_args(s)?;
    s.skip_spaces();
    if !s.consume_byte(b')') {
        return None;
    }

    match name {
        "matrix" => {
            if args.len() != 6 {
                return None;
            }
            Some(Transform::new(args[0], args[1], args[2], args[3], args[4], args[5]))
        }
        "translate" => match args.as_slice() {
            [tx] => Some(Transform::new_translate(*tx, 0.0)),
            [tx, ty] => Some(Transform::new_translate(*tx, *ty)),
            _ => None,
        },
        "scale" => match args.as_slice() {
            [sx] => Some(Transform::new_scale(*sx, *sx)),
            [sx, sy] => Some(Transform::new_scale(*sx, *sy)),
            _ => None,
        },
        "rotate" => match args.as_slice() {
            [angle] => Some(Transform::new_rotate(*angle)),
            [angle, cx, cy] => Some(Transform::new_rotate_at(*angle, *cx, *cy)),
            _ => None,
        },
        "skewX" => match args.as_slice() {
            [angle] => Some(Transform::new_skew(*angle, 0.0)),
            _ => None,
        },
        "skewY" => match args.as_slice() {
            [angle] => Some(Transform::new_skew(0.0, *angle)),
            _ => None,
        },
        _ => None,
    }
}

fn parse_args(s: &mut Stream) -> Option<Vec<f64>> {
    let mut out = Vec::new();
    s.skip_spaces();
    while !s.at_end() && s.curr_byte() != Some(b')') {
        out.push(s.parse_number()?);
        s.skip_spaces_and_comma();
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::FuzzyEq;

    #[test]
    fn single_translate() {
        let t = parse_transform_list("translate(10, 20)").unwrap();
        assert!(t.fuzzy_eq(&Transform::new_translate(10.0, 20.0)));
    }

    #[test]
    fn matrix_form() {
        let t = parse_transform_list("matrix(1 0 0 1 5 6)").unwrap();
        assert!(t.fuzzy_eq(&Transform::new_translate(5.0, 6.0)));
    }

    #[test]
    fn composition_is_left_to_right_as_applied_to_points() {
        let t = parse_transform_list("translate(10,0) scale(2,2)").unwrap();
        let (x, y) = t.apply(1.0, 1.0);
        assert!(x.fuzzy_eq(&12.0));
        assert!(y.fuzzy_eq(&2.0));
    }

    #[test]
    fn rotate_with_pivot() {
        let t = parse_transform_list("rotate(90, 1, 1)").unwrap();
        let (x, y) = t.apply(1.0, 1.0);
        assert!(x.fuzzy_eq(&1.0));
        assert!(y.fuzzy_eq(&1.0));
    }

    #[test]
    fn malformed_arg_count_rejected() {
        assert!(parse_transform_list("skewX(1, 2)").is_none());
    }
}
