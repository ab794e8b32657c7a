use serde::{Deserialize, Serialize};

use crate::error::MapError;

/// Object property holding the elevation an object sits on. Required by the
/// merge engine, rewritten on copy.
pub const OBJ_ELEV_KEY: &str = "obj_elev";
/// Header key every well-formed map must declare.
pub const MAP_NAME_KEY: &str = "map_name";

/// String key/value pairs preserving insertion order, used for header data and
/// object properties. Inserting an existing key overwrites the value in place,
/// keeping the key's original position, so output stays stable and diffable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fields {
    entries: Vec<(String, String)>,
}

impl Fields {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some((_, v)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            *v = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One grid cell: elevation layer, identifier, and the two tile-data tokens
/// joined with a single space. The tokens are opaque to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Square {
    pub elevation: i32,
    pub square_id: i32,
    pub data: String,
}

/// A placed entity: id, tile reference, and every other declared field kept as
/// a property, including `obj_elev`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapObject {
    pub id: i32,
    pub tile_num: i32,
    pub properties: Fields,
}

impl MapObject {
    /// The object's elevation as declared in its `obj_elev` property.
    pub fn elevation(&self) -> Result<i32, MapError> {
        let raw = self.properties.get(OBJ_ELEV_KEY).ok_or_else(|| {
            MapError::malformed(
                "objects",
                format!("object {} has no {} property", self.id, OBJ_ELEV_KEY),
            )
        })?;
        raw.parse().map_err(|_| {
            MapError::malformed(
                "objects",
                format!("object {} has non-integer {}: {}", self.id, OBJ_ELEV_KEY, raw),
            )
        })
    }
}

/// A fully parsed map. Produced by `codec::parse_map`, read-only to the merge
/// engine, consumed by `codec::serialize_map`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Map {
    pub header: Fields,
    pub squares: Vec<Square>,
    pub objects: Vec<MapObject>,
    pub script: String,
}

impl Map {
    pub fn map_name(&self) -> Option<&str> {
        self.header.get(MAP_NAME_KEY)
    }

    /// Distinct square elevations in order of first appearance. This is the
    /// grouping order the serializer emits.
    pub fn elevations(&self) -> Vec<i32> {
        let mut seen = Vec::new();
        for sq in &self.squares {
            if !seen.contains(&sq.elevation) {
                seen.push(sq.elevation);
            }
        }
        seen
    }

    pub fn squares_at(&self, elevation: i32) -> impl Iterator<Item = &Square> {
        self.squares.iter().filter(move |s| s.elevation == elevation)
    }
}
