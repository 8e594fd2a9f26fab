//! Integration-style app tests that exercise event and save flows.

use super::*;
use crate::backend::{BackendHandle, CoreCmd, CoreEvent};
use crossbeam_channel::{unbounded, Receiver};
use draftpad_core::models::post::UpdatePostRequest;
use draftpad_core::store::{ActionDispatcher, StateReader};
use std::time::Duration;

struct TestHarness {
    app: DraftpadApp,
    cmd_rx: Receiver<CoreCmd>,
}

fn make_app() -> TestHarness {
    let (cmd_tx, cmd_rx) = unbounded();
    let (_evt_tx, evt_rx) = unbounded();

    let config = Config {
        port: 0,
        post_id: "welcome-page".to_string(),
    };
    let state = AppState::new(config, ContentRegistry::seeded());
    let server = EmbeddedServer::start(state, false).expect("server");
    let server_addr = server.addr();

    let mut post = Post::new("Welcome".to_string(), "page".to_string());
    post.id = "welcome-page".to_string();

    let app = DraftpadApp {
        backend: BackendHandle::from_test_channels(cmd_tx, evt_rx),
        store: EditorStore::new(post),
        page_attributes: PageAttributesPanel::new(),
        title_draft: "Welcome".to_string(),
        content_draft: String::new(),
        status: None,
        save_in_flight: false,
        _server: server,
        server_addr,
    };
    TestHarness { app, cmd_rx }
}

fn recv_cmd(rx: &Receiver<CoreCmd>) -> CoreCmd {
    rx.recv_timeout(Duration::from_secs(2))
        .expect("expected backend command")
}

fn recv_capability_fetch(rx: &Receiver<CoreCmd>) -> (String, crate::backend::FetchTicket) {
    match recv_cmd(rx) {
        CoreCmd::FetchTypeSupports { slug, request } => (slug, request),
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn capability_reply_resolves_the_mounted_panel() {
    let mut harness = make_app();
    harness.app.mount_page_attributes();

    let (slug, request) = recv_capability_fetch(&harness.cmd_rx);
    assert_eq!(slug, "page");
    assert!(!harness.app.page_attributes.supports_page_attributes());

    harness.app.apply_event(CoreEvent::TypeSupportsLoaded {
        slug,
        request_id: request.id(),
        supports_page_attributes: true,
    });
    assert!(harness.app.page_attributes.supports_page_attributes());
}

#[test]
fn late_capability_reply_after_unmount_is_ignored() {
    let mut harness = make_app();
    harness.app.mount_page_attributes();
    let (slug, request) = recv_capability_fetch(&harness.cmd_rx);

    harness.app.page_attributes.unmount();
    harness.app.apply_event(CoreEvent::TypeSupportsLoaded {
        slug,
        request_id: request.id(),
        supports_page_attributes: true,
    });
    assert!(!harness.app.page_attributes.supports_page_attributes());
}

#[test]
fn post_load_with_changed_type_remounts_the_panel() {
    let mut harness = make_app();
    harness.app.mount_page_attributes();
    let (_, first) = recv_capability_fetch(&harness.cmd_rx);

    let mut loaded = Post::new("Note".to_string(), "post".to_string());
    loaded.id = "welcome-page".to_string();
    loaded.menu_order = 2;
    harness.app.apply_event(CoreEvent::PostLoaded { post: loaded });

    assert!(first.is_cancelled());
    let (slug, _) = recv_capability_fetch(&harness.cmd_rx);
    assert_eq!(slug, "post");
    assert_eq!(harness.app.store.current_post_type(), "post");
    assert_eq!(harness.app.title_draft, "Note");
    assert_eq!(harness.app.store.menu_order(), Some(2));
}

#[test]
fn post_load_with_same_type_does_not_refetch() {
    let mut harness = make_app();
    harness.app.mount_page_attributes();
    let (_, first) = recv_capability_fetch(&harness.cmd_rx);

    let mut loaded = Post::new("Welcome".to_string(), "page".to_string());
    loaded.id = "welcome-page".to_string();
    harness.app.apply_event(CoreEvent::PostLoaded { post: loaded });

    assert!(!first.is_cancelled());
    assert!(harness.cmd_rx.try_recv().is_err());
    assert!(!harness.app.store.is_dirty());
}

#[test]
fn save_flow_sends_one_update_and_acknowledges() {
    let mut harness = make_app();
    harness.app.store.edit_post(UpdatePostRequest {
        menu_order: Some(5),
        ..Default::default()
    });
    assert!(harness.app.store.is_dirty());

    harness.app.save_now();
    match recv_cmd(&harness.cmd_rx) {
        CoreCmd::SavePost { id, update } => {
            assert_eq!(id, "welcome-page");
            assert_eq!(update.menu_order, Some(5));
            assert_eq!(update.title.as_deref(), Some("Welcome"));
        }
        other => panic!("unexpected command: {:?}", other),
    }
    assert!(harness.app.save_in_flight);

    // Re-issuing while in flight is a no-op.
    harness.app.save_now();
    assert!(harness.cmd_rx.try_recv().is_err());

    let saved = harness.app.store.post().clone();
    harness.app.apply_event(CoreEvent::PostSaved { post: saved });
    assert!(!harness.app.save_in_flight);
    assert!(!harness.app.store.is_dirty());
    assert!(harness.app.status.is_some());
}

#[test]
fn save_ack_for_older_snapshot_keeps_store_dirty() {
    let mut harness = make_app();
    harness.app.store.edit_post(UpdatePostRequest {
        menu_order: Some(5),
        ..Default::default()
    });
    harness.app.save_now();
    let acked = harness.app.store.post().clone();

    harness.app.store.edit_post(UpdatePostRequest {
        menu_order: Some(9),
        ..Default::default()
    });
    harness.app.apply_event(CoreEvent::PostSaved { post: acked });

    assert!(!harness.app.save_in_flight);
    assert!(harness.app.store.is_dirty());
    assert_eq!(harness.app.store.menu_order(), Some(9));
}

#[test]
fn post_missing_clears_save_flight_and_reports_status() {
    let mut harness = make_app();
    harness.app.store.edit_post(UpdatePostRequest {
        title: Some("Changed".to_string()),
        ..Default::default()
    });
    harness.app.save_now();
    assert!(harness.app.save_in_flight);

    harness.app.apply_event(CoreEvent::PostMissing {
        id: "welcome-page".to_string(),
    });
    assert!(!harness.app.save_in_flight);
    assert!(harness.app.status.is_some());
}
