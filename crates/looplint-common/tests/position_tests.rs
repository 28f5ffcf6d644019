use super::position::{LineMap, Position};

#[test]
fn test_offset_to_position_across_lines() {
    let source = "package x\n\nfunc f() {}\n";
    let map = LineMap::build(source);
    assert_eq!(map.line_count(), 4);
    assert_eq!(map.offset_to_position(0), Position::new(0, 0));
    assert_eq!(map.offset_to_position(10), Position::new(1, 0));
    assert_eq!(map.offset_to_position(16), Position::new(2, 5));
}

#[test]
fn test_crlf_counts_as_single_line_break() {
    let source = "a\r\nb\rc";
    let map = LineMap::build(source);
    assert_eq!(map.line_count(), 3);
    assert_eq!(map.offset_to_position(3), Position::new(1, 0));
    assert_eq!(map.offset_to_position(5), Position::new(2, 0));
}

#[test]
fn test_position_round_trip_clamps_to_source() {
    let source = "ab\ncd";
    let map = LineMap::build(source);
    assert_eq!(map.position_to_offset(Position::new(1, 1), source), Some(4));
    assert_eq!(map.position_to_offset(Position::new(1, 40), source), Some(5));
    assert_eq!(map.position_to_offset(Position::new(7, 0), source), None);
}
