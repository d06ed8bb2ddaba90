//! Captured room blocks must extract to exactly the recorded rooms

use mudmap_room::{extract_room_info, generate_id, normalize, RoomInfo};
use mudmap_test_utils::{init_test_logging, room_fixtures};
use pretty_assertions::assert_eq;

#[test]
fn test_fixtures_extract_field_by_field() {
    init_test_logging();

    for fixture in room_fixtures().unwrap() {
        let room = extract_room_info(&normalize(&fixture.input))
            .unwrap_or_else(|| panic!("{}: no room extracted", fixture.label));
        let expected = &fixture.output;

        assert_eq!(room.name(), expected.name(), "{}", fixture.label);
        assert_eq!(room.short_name(), expected.short_name(), "{}", fixture.label);
        assert_eq!(room.percent(), expected.percent(), "{}", fixture.label);
        assert_eq!(room.minimap(), expected.minimap(), "{}", fixture.label);
        assert_eq!(room.description(), expected.description(), "{}", fixture.label);
        assert_eq!(room.exits(), expected.exits(), "{}", fixture.label);
        assert_eq!(room.id(), expected.id(), "{}", fixture.label);
    }
}

#[test]
fn test_fixture_ids_are_content_hashes() {
    for fixture in room_fixtures().unwrap() {
        assert_eq!(
            generate_id(&fixture.output.identity()),
            fixture.output.id(),
            "{}",
            fixture.label
        );
    }
}

#[test]
fn test_fixture_json_matches_extraction() {
    for fixture in room_fixtures().unwrap() {
        let room = extract_room_info(&normalize(&fixture.input)).unwrap();
        let reparsed = RoomInfo::from_json(&room.to_json().unwrap()).unwrap();
        assert_eq!(reparsed, fixture.output, "{}", fixture.label);
    }
}

#[test]
fn test_fixtures_split_into_chunks_are_not_rooms() {
    // Extraction works on one chunk; half a block carries only one marker
    for fixture in room_fixtures().unwrap() {
        let text = normalize(&fixture.input);
        let exits_at = text.find("[Obvious Exits").unwrap();
        assert!(extract_room_info(&text[..exits_at]).is_none(), "{}", fixture.label);
    }
}

#[test]
fn test_chatter_is_not_a_room() {
    let chatter = [
        "",
        "Gandalf says, 'The +- sign is a plus and a minus.'",
        "You see the Obvious Exits sign, but no map.",
        "+-------+\n|  X  |\n+-------+\n",
    ];

    for text in chatter {
        assert!(extract_room_info(text).is_none(), "{text:?}");
    }
}

#[test]
fn test_room_without_name_is_rejected() {
    let text = "+-----+\n| X |\n+-----+\n[Obvious Exits: n]\n";
    assert!(extract_room_info(text).is_none());
}

#[test]
fn test_room_without_exit_tokens_is_rejected() {
    let text = "Hall\n+-----+\n| X |\n+-----+\n[Obvious Exits: ]\n";
    assert!(extract_room_info(text).is_none());
}
