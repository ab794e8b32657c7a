use crate::error::MapError;
use crate::merge::{ElevationOp, SourceMap};

const CONTEXT: &str = "operation list";

/// Parses a comma-separated operation list like `"0: a2, 1:a1, 2: a0"` into
/// ordered `ElevationOp`s.
///
/// Each clause is `<dst>: <srcSpec>`. The source spec is scanned one character
/// at a time: `a`/`A` selects the first map, `b`/`B` the second (the selection
/// sticks until changed, starting at the first map), each digit emits one op
/// with that digit as source elevation, and whitespace is skipped. So
/// `"0: a2b1b2"` emits three ops, all targeting destination elevation 0.
pub fn parse_ops(command: &str) -> Result<Vec<ElevationOp>, MapError> {
    let mut ops = Vec::new();
    for clause in command.split(',') {
        let (dst, spec) = clause.split_once(':').ok_or_else(|| {
            MapError::malformed(CONTEXT, format!("clause without ':' separator: {}", clause.trim()))
        })?;
        let dst_elevation: i32 = dst.trim().parse().map_err(|_| {
            MapError::malformed(
                CONTEXT,
                format!("non-integer destination elevation: {}", dst.trim()),
            )
        })?;

        let mut src_map = SourceMap::First;
        let emitted = ops.len();
        for c in spec.chars() {
            if c.is_whitespace() {
                continue;
            }
            match c.to_ascii_lowercase() {
                'a' => src_map = SourceMap::First,
                'b' => src_map = SourceMap::Second,
                d if d.is_ascii_digit() => ops.push(ElevationOp {
                    dst_elevation,
                    src_map,
                    src_elevation: d as i32 - '0' as i32,
                }),
                _ => {
                    return Err(MapError::malformed(
                        CONTEXT,
                        format!("unexpected character '{}' in source spec: {}", c, spec.trim()),
                    ));
                }
            }
        }
        if ops.len() == emitted {
            return Err(MapError::malformed(
                CONTEXT,
                format!("source spec emits no operation: {}", clause.trim()),
            ));
        }
    }
    Ok(ops)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(dst: i32, src_map: SourceMap, src: i32) -> ElevationOp {
        ElevationOp { dst_elevation: dst, src_map, src_elevation: src }
    }

    #[test]
    fn clause_per_destination() {
        let ops = parse_ops("0: a2, 1:a1, 2: a0").unwrap();
        assert_eq!(
            ops,
            vec![
                op(0, SourceMap::First, 2),
                op(1, SourceMap::First, 1),
                op(2, SourceMap::First, 0),
            ]
        );
    }

    #[test]
    fn multiple_sources_in_one_clause() {
        let ops = parse_ops("0: a2b1").unwrap();
        assert_eq!(ops, vec![op(0, SourceMap::First, 2), op(0, SourceMap::Second, 1)]);
    }

    #[test]
    fn map_selection_sticks_across_digits() {
        let ops = parse_ops("1: a2b1b2").unwrap();
        assert_eq!(
            ops,
            vec![
                op(1, SourceMap::First, 2),
                op(1, SourceMap::Second, 1),
                op(1, SourceMap::Second, 2),
            ]
        );
    }

    #[test]
    fn first_map_is_the_default_selection() {
        let ops = parse_ops("0: 2").unwrap();
        assert_eq!(ops, vec![op(0, SourceMap::First, 2)]);
    }

    #[test]
    fn uppercase_and_spaces_accepted() {
        let ops = parse_ops("0: A 2 B 1").unwrap();
        assert_eq!(ops, vec![op(0, SourceMap::First, 2), op(0, SourceMap::Second, 1)]);
    }

    #[test]
    fn clause_without_separator_fails() {
        assert!(parse_ops("0 a2").is_err());
    }

    #[test]
    fn non_integer_destination_fails() {
        assert!(parse_ops("x: a2").is_err());
    }

    #[test]
    fn unexpected_character_fails() {
        assert!(parse_ops("0: c2").is_err());
    }

    #[test]
    fn clause_emitting_nothing_fails() {
        assert!(parse_ops("0: ab").is_err());
        assert!(parse_ops("0:").is_err());
        assert!(parse_ops("").is_err());
    }
}
