//! Renderer messages and outbound commands through the coordinator

use mudmap_session::{SessionCoordinator, SessionError};
use mudmap_test_utils::fixtures::data;
use mudmap_test_utils::{RecordingRenderer, RecordingTerminal};
use pretty_assertions::assert_eq;

fn attached() -> (SessionCoordinator, RecordingRenderer, RecordingTerminal) {
    let renderer = RecordingRenderer::new();
    let terminal = RecordingTerminal::new();
    let mut coordinator = SessionCoordinator::new(Box::new(renderer.clone()));
    coordinator.attach_terminal(Box::new(terminal.clone()));
    (coordinator, renderer, terminal)
}

#[test]
fn test_exit_tag_sends_command() {
    let (mut coordinator, renderer, terminal) = attached();

    coordinator
        .handle_message(r#"{"command":"terminal","action":"sendCommand","text":"n"}"#)
        .unwrap();

    assert_eq!(terminal.sent(), vec!["n\n".to_string()]);
    assert_eq!(coordinator.state().last_command(), "n");
    assert_eq!(renderer.last_snapshot().unwrap().last_command, "n");
}

#[test]
fn test_map_controls() {
    let (mut coordinator, renderer, _terminal) = attached();

    coordinator
        .handle_message(r#"{"command":"mapper","action":"toggleMapping"}"#)
        .unwrap();
    coordinator.on_terminal_data(&data::room_block("Den", "Cosy.", "e"));
    assert_eq!(coordinator.state().room_count(), 1);

    coordinator
        .handle_message(r#"{"command":"mapControl","action":"reset"}"#)
        .unwrap();

    let snapshot = renderer.last_snapshot().unwrap();
    assert!(!snapshot.mapping_enabled);
    assert!(snapshot.rooms.is_empty());
    assert!(snapshot.current_room_id.is_none());
    assert_eq!(renderer.update_count(), 3);
}

#[test]
fn test_unknown_message_surfaces_diagnostic() {
    let (mut coordinator, renderer, terminal) = attached();

    let result = coordinator.handle_message(r#"{"command":"mapper","action":"zoom"}"#);
    assert!(matches!(result, Err(SessionError::UnknownMessage(_))));

    assert_eq!(renderer.errors().len(), 1);
    assert_eq!(renderer.update_count(), 0);
    assert!(terminal.sent().is_empty());
}

#[test]
fn test_detached_terminal() {
    let (mut coordinator, _renderer, terminal) = attached();
    coordinator.detach_terminal();

    assert!(!coordinator.send_command("look"));
    assert_eq!(coordinator.state().last_command(), "look");
    assert!(terminal.sent().is_empty());
}

#[test]
fn test_broken_terminal_is_not_retried() {
    let renderer = RecordingRenderer::new();
    let mut coordinator = SessionCoordinator::new(Box::new(renderer));
    coordinator.attach_terminal(Box::new(RecordingTerminal::broken()));

    assert!(!coordinator.send_command("south"));
    assert!(matches!(
        coordinator.try_send_command("south"),
        Err(SessionError::Io(_))
    ));
}

#[test]
fn test_dispose_then_drop() {
    let (mut coordinator, renderer, terminal) = attached();
    coordinator.toggle_mapping();
    coordinator.dispose();

    assert!(!coordinator.is_attached());
    assert!(!coordinator.send_command("look"));
    coordinator.on_terminal_data(&data::room_block("Den", "Cosy.", "e"));

    assert_eq!(renderer.update_count(), 1);
    assert!(terminal.sent().is_empty());

    // Attaching after disposal is ignored
    coordinator.attach_terminal(Box::new(terminal.clone()));
    assert!(!coordinator.is_attached());
    drop(coordinator);
}
