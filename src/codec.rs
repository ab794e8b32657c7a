use crate::error::MapError;
use crate::map::{Fields, MAP_NAME_KEY, Map, MapObject, Square};

const MAP_DATA_SENTINEL: &str = ">>>>>>>>>>: MAP_DATA <<<<<<<<<<";
const MAP_SQUARES_SENTINEL: &str = ">>>>>>>>>>: MAP_SQUARES <<<<<<<<<<";
const SCRIPTS_SENTINEL: &str = ">>>>>>>>>>: SCRIPTS <<<<<<<<<<";
const OBJECTS_SENTINEL: &str = ">>>>>>>>>>: OBJECTS <<<<<<<<<<";

const OBJECTS_BLOCK_BEGIN: &str = "[[OBJECTS BEGIN]]";
const OBJECTS_BLOCK_END: &str = "[[OBJECTS END]]";
const OBJECT_BEGIN: &str = "[OBJECT BEGIN]";
const OBJECT_END: &str = "[OBJECT END]";

/// Parser position in the four-section file layout. Sequential state local to
/// one `parse_map` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Pre,
    Header,
    Squares,
    Scripts,
    Objects,
}

impl Section {
    fn name(self) -> &'static str {
        match self {
            Section::Pre => "preamble",
            Section::Header => "header section",
            Section::Squares => "squares section",
            Section::Scripts => "scripts section",
            Section::Objects => "objects section",
        }
    }
}

/// Parses a full map file into a `Map` in a single forward pass.
///
/// Sentinel lines switch the current section unconditionally and are never
/// stored as content. `text.lines()` strips `\r\n` and `\n` alike, so both
/// line endings parse identically.
pub fn parse_map(text: &str) -> Result<Map, MapError> {
    let mut map = Map::default();
    let mut section = Section::Pre;
    let mut cur_elev = -1;
    let mut open_object: Option<MapObject> = None;

    for line in text.lines() {
        match line {
            MAP_DATA_SENTINEL => {
                section = Section::Header;
                continue;
            }
            MAP_SQUARES_SENTINEL => {
                section = Section::Squares;
                continue;
            }
            SCRIPTS_SENTINEL => {
                section = Section::Scripts;
                continue;
            }
            OBJECTS_SENTINEL => {
                section = Section::Objects;
                continue;
            }
            _ => {}
        }

        if section == Section::Pre {
            continue;
        }

        // Blank lines are meaningful script content, so the scripts section is
        // handled before the blank-line skip below.
        if section == Section::Scripts {
            map.script.push_str(line);
            map.script.push('\n');
            continue;
        }

        if line.is_empty() {
            continue;
        }

        match section {
            Section::Header => {
                let (key, value) = split_key_value(line, section)?;
                map.header.insert(key, value.trim());
            }
            Section::Squares => {
                let (key, value) = split_key_value(line, section)?;
                if key == "square_elev" {
                    cur_elev = parse_int(value, line, section)?;
                } else if key == "sq" {
                    map.squares.push(parse_square(value, line, cur_elev)?);
                }
            }
            Section::Objects => {
                parse_object_line(line, &mut map, &mut open_object)?;
            }
            Section::Pre | Section::Scripts => {}
        }
    }

    if let Some(obj) = open_object {
        return Err(MapError::malformed(
            Section::Objects.name(),
            format!("unterminated object {} at end of input", obj.id),
        ));
    }
    if !map.header.contains_key(MAP_NAME_KEY) {
        return Err(MapError::malformed(
            Section::Header.name(),
            format!("missing required {} key", MAP_NAME_KEY),
        ));
    }
    Ok(map)
}

fn split_key_value(line: &str, section: Section) -> Result<(&str, &str), MapError> {
    line.split_once(':').ok_or_else(|| {
        MapError::malformed(section.name(), format!("line without ':' separator: {}", line))
    })
}

fn parse_int(value: &str, line: &str, section: Section) -> Result<i32, MapError> {
    value.trim().parse().map_err(|_| {
        MapError::malformed(section.name(), format!("non-integer field in line: {}", line))
    })
}

fn parse_square(value: &str, line: &str, elevation: i32) -> Result<Square, MapError> {
    let mut tokens = value.split_whitespace();
    // First token is the square id, the next two form the opaque tile data.
    // Anything past the third token is ignored.
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(id), Some(a), Some(b)) => Ok(Square {
            elevation,
            square_id: parse_int(id, line, Section::Squares)?,
            data: format!("{} {}", a, b),
        }),
        _ => Err(MapError::malformed(
            Section::Squares.name(),
            format!("sq line needs an id and two data tokens: {}", line),
        )),
    }
}

fn parse_object_line(
    line: &str,
    map: &mut Map,
    open_object: &mut Option<MapObject>,
) -> Result<(), MapError> {
    let section = Section::Objects;
    if line == OBJECTS_BLOCK_BEGIN || line == OBJECTS_BLOCK_END {
        return Ok(());
    }
    if line == OBJECT_BEGIN {
        if open_object.is_some() {
            return Err(MapError::malformed(
                section.name(),
                format!("{} while an object is already open", OBJECT_BEGIN),
            ));
        }
        *open_object = Some(MapObject {
            id: 0,
            tile_num: 0,
            properties: Fields::new(),
        });
        return Ok(());
    }
    if line == OBJECT_END {
        let obj = open_object.take().ok_or_else(|| {
            MapError::malformed(
                section.name(),
                format!("{} with no open object", OBJECT_END),
            )
        })?;
        map.objects.push(obj);
        return Ok(());
    }

    let (key, value) = split_key_value(line, section)?;
    let obj = open_object.as_mut().ok_or_else(|| {
        MapError::malformed(
            section.name(),
            format!("property line outside object framing: {}", line),
        )
    })?;
    if key == "obj_id" {
        obj.id = parse_int(value, line, section)?;
    } else if key == "obj_tile_num" {
        obj.tile_num = parse_int(value, line, section)?;
    } else {
        obj.properties.insert(key, value.trim());
    }
    Ok(())
}

/// Serializes a `Map` back into the four-section text layout. Total over any
/// `Map` value; no structural validation happens here.
///
/// The script text is emitted verbatim between the `SCRIPTS` and `OBJECTS`
/// sentinels with no extra padding, so a parse/serialize round trip leaves it
/// unchanged.
pub fn serialize_map(map: &Map) -> String {
    let mut out = String::new();
    push_line(&mut out, "");
    push_line(&mut out, MAP_DATA_SENTINEL);
    push_line(&mut out, "");
    for (key, value) in map.header.iter() {
        push_line(&mut out, &format!("{}: {}", key, value));
    }
    push_line(&mut out, "");
    push_line(&mut out, MAP_SQUARES_SENTINEL);
    push_line(&mut out, "");
    for elevation in map.elevations() {
        push_line(&mut out, &format!("square_elev: {}", elevation));
        push_line(&mut out, "");
        for sq in map.squares_at(elevation) {
            push_line(&mut out, &format!("sq: {} {}", sq.square_id, sq.data));
        }
        push_line(&mut out, "");
        push_line(&mut out, "");
    }
    push_line(&mut out, SCRIPTS_SENTINEL);
    out.push_str(&map.script);
    if !map.script.is_empty() && !map.script.ends_with('\n') {
        out.push('\n');
    }
    push_line(&mut out, OBJECTS_SENTINEL);
    push_line(&mut out, "");
    push_line(&mut out, OBJECTS_BLOCK_BEGIN);
    push_line(&mut out, "");
    for obj in &map.objects {
        push_line(&mut out, OBJECT_BEGIN);
        push_line(&mut out, &format!("obj_id: {}", obj.id));
        push_line(&mut out, &format!("obj_tile_num: {}", obj.tile_num));
        for (key, value) in obj.properties.iter() {
            push_line(&mut out, &format!("{}: {}", key, value));
        }
        push_line(&mut out, OBJECT_END);
        push_line(&mut out, "");
    }
    push_line(&mut out, "");
    push_line(&mut out, OBJECTS_BLOCK_END);
    out
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}
