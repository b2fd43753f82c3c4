use oly26_terminal::picks::parse_picks_csv;

#[test]
fn canonical_headers_map_through_synonyms() {
    let raw = "Picks,Team,Forward 1,Forward 2,Defenseman\n\
               Alice,CAN,Connor McDavid,Nathan MacKinnon,Cale Makar\n\
               Bob,USA,Auston Matthews,Jack Eichel,Quinn Hughes\n";
    let rows = parse_picks_csv(raw).expect("picks should parse");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].entrant, "Alice");
    assert_eq!(rows[0].team, "CAN");
    assert_eq!(rows[0].forward1, "Connor McDavid");
    assert_eq!(rows[0].forward2, "Nathan MacKinnon");
    assert_eq!(rows[0].defenceman, "Cale Makar");
    assert_eq!(rows[1].defenceman, "Quinn Hughes");
}

#[test]
fn blank_header_cell_means_entrant() {
    let raw = ",Team\nAlice,CAN\n";
    let rows = parse_picks_csv(raw).expect("picks should parse");
    assert_eq!(rows[0].entrant, "Alice");
    assert_eq!(rows[0].team, "CAN");
}

#[test]
fn missing_columns_are_synthesized_empty() {
    let raw = "Name,Team\nAlice,CAN\n";
    let rows = parse_picks_csv(raw).expect("picks should parse");
    assert_eq!(rows[0].entrant, "Alice");
    assert_eq!(rows[0].forward1, "");
    assert_eq!(rows[0].forward2, "");
    assert_eq!(rows[0].defenceman, "");
}

#[test]
fn spreadsheet_null_markers_collapse_to_empty() {
    let raw = "Name,Team,Forward 1\nAlice, nan ,None\n";
    let rows = parse_picks_csv(raw).expect("picks should parse");
    assert_eq!(rows[0].team, "");
    assert_eq!(rows[0].forward1, "");
}

#[test]
fn quoted_cells_keep_embedded_commas() {
    let raw = "Name,Team,Forward 1\n\"Smith, Jr.\",CAN,\"O'Reilly, Ryan\"\n";
    let rows = parse_picks_csv(raw).expect("picks should parse");
    assert_eq!(rows[0].entrant, "Smith, Jr.");
    assert_eq!(rows[0].forward1, "O'Reilly, Ryan");
}

#[test]
fn short_rows_pad_with_empty_cells() {
    let raw = "Name,Team,Forward 1,Forward 2,Defenceman\r\nAlice,CAN\r\n";
    let rows = parse_picks_csv(raw).expect("picks should parse");
    assert_eq!(rows[0].entrant, "Alice");
    assert_eq!(rows[0].team, "CAN");
    assert_eq!(rows[0].forward1, "");
}

#[test]
fn duplicate_headers_keep_first_occurrence() {
    let raw = "Name,Picks,Team\nAlice,Shadow,CAN\n";
    let rows = parse_picks_csv(raw).expect("picks should parse");
    assert_eq!(rows[0].entrant, "Alice");
}

#[test]
fn unrecognized_columns_are_ignored() {
    let raw = "Name,Team,Paid Up?\nAlice,CAN,yes\n";
    let rows = parse_picks_csv(raw).expect("picks should parse");
    assert_eq!(rows[0].entrant, "Alice");
    assert_eq!(rows[0].team, "CAN");
}

#[test]
fn empty_input_is_an_error() {
    assert!(parse_picks_csv("").is_err());
}

#[test]
fn header_only_file_yields_no_rows() {
    let rows = parse_picks_csv("Name,Team\n").expect("header alone should parse");
    assert!(rows.is_empty());
}
