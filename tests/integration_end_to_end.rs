use mappet::*;

fn map_text(name: &str, script: &str, squares: &[(i32, i32, &str)], objects: &[(i32, i32)]) -> String {
    let mut text = String::new();
    text.push_str(">>>>>>>>>>: MAP_DATA <<<<<<<<<<\n\n");
    text.push_str(&format!("map_name: {}\n\n", name));
    text.push_str(">>>>>>>>>>: MAP_SQUARES <<<<<<<<<<\n\n");
    let mut cur_elev = None;
    for (elevation, id, data) in squares {
        if cur_elev != Some(*elevation) {
            text.push_str(&format!("square_elev: {}\n", elevation));
            cur_elev = Some(*elevation);
        }
        text.push_str(&format!("sq: {} {}\n", id, data));
    }
    text.push_str("\n>>>>>>>>>>: SCRIPTS <<<<<<<<<<\n");
    text.push_str(script);
    text.push_str(">>>>>>>>>>: OBJECTS <<<<<<<<<<\n\n[[OBJECTS BEGIN]]\n\n");
    for (id, elevation) in objects {
        text.push_str("[OBJECT BEGIN]\n");
        text.push_str(&format!("obj_id: {}\n", id));
        text.push_str("obj_tile_num: 300\n");
        text.push_str(&format!("obj_elev: {}\n", elevation));
        text.push_str("[OBJECT END]\n\n");
    }
    text.push_str("[[OBJECTS END]]\n");
    text
}

#[test]
fn end_to_end_parse_merge_serialize() {
    // Map A: squares and objects on elevations 0-2, plus a script.
    let text_a = map_text(
        "MINE1",
        "proc look_at_me begin\nend\n",
        &[
            (0, 65537, "grid000 grid000"),
            (1, 65538, "grid001 grid000"),
            (2, 65539, "grid002 grid000"),
        ],
        &[(1, 0), (2, 1), (3, 2)],
    );
    // Map B: content on elevation 1 only.
    let text_b = map_text(
        "MINE3",
        "proc discarded begin\nend\n",
        &[(1, 70001, "grid100 grid100")],
        &[(9, 1)],
    );

    let map_a = parse_map(&text_a).unwrap();
    let map_b = parse_map(&text_b).unwrap();
    assert_eq!(map_a.map_name(), Some("MINE1"));
    assert_eq!(map_b.map_name(), Some("MINE3"));

    // Elevation 0 of the output gathers A's elevation 2 and B's elevation 1;
    // elevation 1 gathers A's elevation 1.
    let ops = parse_ops("0: a2b1, 1: a1").unwrap();
    assert_eq!(ops.len(), 3);

    let merged = merge(&map_a, &map_b, &ops).unwrap();
    assert_eq!(merged.map_name(), Some("MINE1"));
    assert_eq!(merged.script, map_a.script);

    let ids_at_0: Vec<i32> = merged.squares_at(0).map(|s| s.square_id).collect();
    assert_eq!(ids_at_0, vec![65539, 70001]);
    let ids_at_1: Vec<i32> = merged.squares_at(1).map(|s| s.square_id).collect();
    assert_eq!(ids_at_1, vec![65538]);

    // Copied objects carry their destination elevation.
    let obj_elevs: Vec<(i32, &str)> = merged
        .objects
        .iter()
        .map(|o| (o.id, o.properties.get("obj_elev").unwrap()))
        .collect();
    assert_eq!(obj_elevs, vec![(3, "0"), (9, "0"), (2, "1")]);

    // The merged map survives a serialize/parse round trip unchanged.
    let text_out = serialize_map(&merged);
    let reparsed = parse_map(&text_out).unwrap();
    assert_eq!(reparsed, merged);
}
