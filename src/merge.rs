use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::map::{Map, OBJ_ELEV_KEY, Square};

/// Which of the two input maps an operation copies from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceMap {
    First,
    Second,
}

/// One merge instruction: copy every square and object at `src_elevation` of
/// the selected source map into `dst_elevation` of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElevationOp {
    pub dst_elevation: i32,
    pub src_map: SourceMap,
    pub src_elevation: i32,
}

impl ElevationOp {
    pub fn description(&self, map_a_name: &str, map_b_name: &str) -> String {
        let name = match self.src_map {
            SourceMap::First => map_a_name,
            SourceMap::Second => map_b_name,
        };
        format!(
            "Copy squares and objects from {}, elevation {} to elevation {}",
            name, self.src_elevation, self.dst_elevation
        )
    }
}

/// Builds the output map from two source maps and an ordered op list.
///
/// Map A is the base: its header and script are copied to the output and map
/// B's are discarded. Ops run strictly in input order; several ops may feed
/// the same destination elevation, and one source elevation may fan out to
/// several destinations. Inputs are never mutated.
///
/// Fails with `MalformedInput` if any object of a selected source map lacks an
/// integer `obj_elev` property, whether or not that object matches the op.
pub fn merge(map_a: &Map, map_b: &Map, ops: &[ElevationOp]) -> Result<Map, MapError> {
    let mut out = Map {
        header: map_a.header.clone(),
        script: map_a.script.clone(),
        ..Map::default()
    };

    for op in ops {
        let src = match op.src_map {
            SourceMap::First => map_a,
            SourceMap::Second => map_b,
        };
        for sq in src.squares_at(op.src_elevation) {
            out.squares.push(Square {
                elevation: op.dst_elevation,
                ..sq.clone()
            });
        }
        for obj in &src.objects {
            if obj.elevation()? != op.src_elevation {
                continue;
            }
            let mut copy = obj.clone();
            copy.properties
                .insert(OBJ_ELEV_KEY, op.dst_elevation.to_string());
            out.objects.push(copy);
        }
    }

    Ok(out)
}
