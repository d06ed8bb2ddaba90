//! Walking through captured rooms with mapping switched on and off

use mudmap_room::{extract_room_info, normalize, RoomInfo};
use mudmap_state::{Mapper, RoomEntry, SessionState, StateSnapshot};
use mudmap_test_utils::room_fixtures;
use pretty_assertions::assert_eq;

fn fixture_rooms() -> Vec<RoomInfo> {
    room_fixtures()
        .unwrap()
        .iter()
        .map(|fixture| extract_room_info(&normalize(&fixture.input)).unwrap())
        .collect()
}

#[test]
fn test_walk_with_mapping_toggled_midway() {
    let rooms = fixture_rooms();
    assert!(rooms.len() >= 3);

    let mut state = SessionState::new();
    let mut mapper = Mapper::new(&mut state);

    assert_eq!(mapper.on_enter_room(&rooms[0]), RoomEntry::NotMapped);
    mapper.toggle_mapping();
    assert_eq!(mapper.on_enter_room(&rooms[1]), RoomEntry::Recorded);
    assert_eq!(mapper.on_enter_room(&rooms[2]), RoomEntry::Recorded);
    assert_eq!(mapper.on_enter_room(&rooms[1]), RoomEntry::AlreadyKnown);

    assert_eq!(state.room_count(), 2);
    assert!(state.room(rooms[0].id()).is_none());
    assert_eq!(state.current_room_id(), Some(rooms[1].id()));
    assert_eq!(state.previous_room_id(), Some(rooms[2].id()));
}

#[test]
fn test_snapshot_lists_rooms_sorted_by_id() {
    let rooms = fixture_rooms();

    let mut state = SessionState::new();
    let mut mapper = Mapper::new(&mut state);
    mapper.toggle_mapping();
    for room in &rooms {
        mapper.on_enter_room(room);
    }

    let snapshot = state.snapshot();
    let ids: Vec<&str> = snapshot.rooms.iter().map(|(id, _)| id.as_str()).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
    assert_eq!(snapshot.rooms.len(), rooms.len());

    for (id, room) in &snapshot.rooms {
        assert_eq!(id, room.id());
    }

    let last = rooms.last().unwrap();
    assert_eq!(snapshot.current_room.as_ref(), Some(last));

    let decoded = StateSnapshot::from_json(&snapshot.to_json_pretty().unwrap()).unwrap();
    assert_eq!(decoded, snapshot);
}

#[test]
fn test_current_room_visible_while_not_mapping() {
    let rooms = fixture_rooms();

    let mut state = SessionState::new();
    Mapper::new(&mut state).on_enter_room(&rooms[0]);

    let snapshot = state.snapshot();
    assert!(snapshot.rooms.is_empty());
    assert_eq!(snapshot.current_room.as_ref(), Some(&rooms[0]));
}

#[test]
fn test_reset_returns_to_defaults() {
    let rooms = fixture_rooms();

    let mut state = SessionState::new();
    let mut mapper = Mapper::new(&mut state);
    mapper.toggle_mapping();
    for room in &rooms {
        mapper.on_enter_room(room);
    }

    state.reset();
    assert_eq!(state, SessionState::default());
    state.reset();
    assert_eq!(state.snapshot(), StateSnapshot::default());
}
