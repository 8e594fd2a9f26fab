//! Collapsible "Page Attributes" section for the settings sidebar.
//!
//! The section only exists for post types that declare support for it, which
//! is discovered through a capability probe issued on mount and aborted on
//! unmount. Until (and unless) the probe confirms support, the panel renders
//! nothing at all.

use crate::backend::{CoreCmd, FetchTicket};
use crossbeam_channel::Sender;
use draftpad_core::constants::PANEL_PAGE_ATTRIBUTES;
use draftpad_core::models::post::UpdatePostRequest;
use draftpad_core::store::{ActionDispatcher, StateReader};
use eframe::egui;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

const ORDER_INPUT_WIDTH: f32 = 48.0;

/// Commit or reject an edited order value.
///
/// An emptied field commits 0, matching the input's 0 fallback display.
/// Negative or non-numeric text is dropped silently and the field snaps back
/// to the committed value; no validation message is ever shown.
fn apply_order_input(draft: &mut String, committed: u32, dispatcher: &mut dyn ActionDispatcher) {
    let trimmed = draft.trim();
    let parsed = if trimmed.is_empty() {
        Some(0)
    } else {
        trimmed.parse::<u32>().ok()
    };
    match parsed {
        Some(menu_order) => dispatcher.edit_post(UpdatePostRequest {
            menu_order: Some(menu_order),
            ..Default::default()
        }),
        None => {
            *draft = committed.to_string();
        }
    }
}

/// Sidebar section exposing the document's manual sort order.
pub(crate) struct PageAttributesPanel {
    instance_id: u64,
    /// Post type this panel mounted against; `None` while unmounted.
    slug: Option<String>,
    /// In-flight capability probe; cleared once a matching reply lands.
    fetch: Option<FetchTicket>,
    supports_page_attributes: bool,
    order_draft: String,
    /// Committed value mirrored into the draft on the previous frame.
    last_committed: Option<u32>,
}

impl PageAttributesPanel {
    pub(crate) fn new() -> Self {
        Self {
            instance_id: NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed),
            slug: None,
            fetch: None,
            supports_page_attributes: false,
            order_draft: String::new(),
            last_committed: None,
        }
    }

    /// Mount the panel for a post type and issue its capability probe.
    ///
    /// Any previous probe is aborted first, so exactly one request is in
    /// flight per panel instance.
    pub(crate) fn mount(&mut self, slug: &str, cmd_tx: &Sender<CoreCmd>) {
        self.abort_fetch();
        self.slug = Some(slug.to_string());
        self.supports_page_attributes = false;
        self.last_committed = None;

        let request = FetchTicket::new();
        let command = CoreCmd::FetchTypeSupports {
            slug: slug.to_string(),
            request: request.clone(),
        };
        if cmd_tx.send(command).is_ok() {
            self.fetch = Some(request);
        } else {
            // Same outcome as a failed probe: the panel stays hidden.
            debug!("backend unavailable; page attributes stay hidden");
        }
    }

    /// Unmount the panel, aborting any in-flight probe.
    ///
    /// No state transition is permitted afterwards; late probe replies are
    /// dropped by [`apply_capability`](Self::apply_capability).
    pub(crate) fn unmount(&mut self) {
        self.abort_fetch();
        self.slug = None;
        self.supports_page_attributes = false;
    }

    /// Apply a capability probe reply.
    ///
    /// Replies are only honored while their originating request is still the
    /// panel's live probe; anything stale or aborted is ignored.
    pub(crate) fn apply_capability(&mut self, request_id: u64, supports: bool) {
        match &self.fetch {
            Some(request) if request.id() == request_id && !request.is_cancelled() => {
                self.supports_page_attributes = supports;
                self.fetch = None;
            }
            _ => {}
        }
    }

    /// Whether the capability probe confirmed support for this mount.
    #[cfg(test)]
    pub(crate) fn supports_page_attributes(&self) -> bool {
        self.supports_page_attributes
    }

    /// Post type the panel is currently mounted for.
    pub(crate) fn mounted_slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    /// Render the section.
    ///
    /// # Returns
    /// `false` when the post type does not support page attributes, in which
    /// case nothing was added to the UI.
    pub(crate) fn show<S>(&mut self, ui: &mut egui::Ui, store: &mut S) -> bool
    where
        S: StateReader + ActionDispatcher,
    {
        if !self.supports_page_attributes {
            return false;
        }

        let committed = store.menu_order().unwrap_or(0);
        if self.last_committed != Some(committed) {
            self.order_draft = committed.to_string();
            self.last_committed = Some(committed);
        }

        let opened = store.is_panel_open(PANEL_PAGE_ATTRIBUTES);
        let order_input_id = self.order_input_id();
        let header = egui::CollapsingHeader::new("Page Attributes")
            .id_salt((PANEL_PAGE_ATTRIBUTES, self.instance_id))
            .open(Some(opened))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Order");
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.order_draft)
                            .id_salt(order_input_id)
                            .desired_width(ORDER_INPUT_WIDTH),
                    );
                    if response.changed() {
                        apply_order_input(&mut self.order_draft, committed, &mut *store);
                    }
                });
            });

        if header.header_response.clicked() {
            self.on_toggle(store);
        }
        true
    }

    fn on_toggle(&self, dispatcher: &mut dyn ActionDispatcher) {
        dispatcher.toggle_sidebar_panel(PANEL_PAGE_ATTRIBUTES);
    }

    fn order_input_id(&self) -> String {
        format!("page-attributes-order-{}", self.instance_id)
    }

    fn abort_fetch(&mut self) {
        if let Some(request) = self.fetch.take() {
            request.abort();
        }
    }
}

impl Drop for PageAttributesPanel {
    fn drop(&mut self) {
        self.abort_fetch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::{unbounded, Receiver};

    #[derive(Default)]
    struct FakeStore {
        post_type: String,
        order: Option<u32>,
        opened: bool,
        toggles: Vec<String>,
        edits: Vec<UpdatePostRequest>,
    }

    impl StateReader for FakeStore {
        fn current_post_type(&self) -> &str {
            &self.post_type
        }

        fn menu_order(&self) -> Option<u32> {
            self.order
        }

        fn is_panel_open(&self, _panel: &str) -> bool {
            self.opened
        }
    }

    impl ActionDispatcher for FakeStore {
        fn toggle_sidebar_panel(&mut self, panel: &str) {
            self.toggles.push(panel.to_string());
        }

        fn edit_post(&mut self, update: UpdatePostRequest) {
            self.edits.push(update);
        }
    }

    fn show_once(panel: &mut PageAttributesPanel, store: &mut FakeStore) -> bool {
        let mut rendered = false;
        egui::__run_test_ctx(|ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                rendered = panel.show(ui, store);
            });
        });
        rendered
    }

    fn mounted_panel(slug: &str) -> (PageAttributesPanel, Receiver<CoreCmd>, FetchTicket) {
        let (cmd_tx, cmd_rx) = unbounded();
        let mut panel = PageAttributesPanel::new();
        panel.mount(slug, &cmd_tx);
        let request = match cmd_rx.try_recv().expect("mount issues a fetch") {
            CoreCmd::FetchTypeSupports { request, .. } => request,
            other => panic!("unexpected command: {:?}", other),
        };
        (panel, cmd_rx, request)
    }

    #[test]
    fn unsupported_panel_renders_nothing() {
        let mut panel = PageAttributesPanel::new();
        let mut store = FakeStore {
            post_type: "page".to_string(),
            order: Some(7),
            opened: true,
            ..Default::default()
        };

        assert!(!show_once(&mut panel, &mut store));
        assert!(store.toggles.is_empty());
        assert!(store.edits.is_empty());
    }

    #[test]
    fn order_display_falls_back_to_zero() {
        let (mut panel, _cmd_rx, request) = mounted_panel("page");
        panel.apply_capability(request.id(), true);

        let mut store = FakeStore {
            post_type: "page".to_string(),
            order: None,
            ..Default::default()
        };
        assert!(show_once(&mut panel, &mut store));
        assert_eq!(panel.order_draft, "0");
    }

    #[test]
    fn order_display_reflects_committed_value() {
        let (mut panel, _cmd_rx, request) = mounted_panel("page");
        panel.apply_capability(request.id(), true);

        let mut store = FakeStore {
            post_type: "page".to_string(),
            order: Some(7),
            ..Default::default()
        };
        assert!(show_once(&mut panel, &mut store));
        assert_eq!(panel.order_draft, "7");
    }

    #[test]
    fn valid_order_input_dispatches_update() {
        let mut store = FakeStore::default();
        let mut draft = "5".to_string();

        apply_order_input(&mut draft, 0, &mut store);

        assert_eq!(
            store.edits,
            vec![UpdatePostRequest {
                menu_order: Some(5),
                ..Default::default()
            }]
        );
        assert_eq!(draft, "5");
    }

    #[test]
    fn emptied_order_input_commits_zero() {
        let mut store = FakeStore::default();
        let mut draft = String::new();

        apply_order_input(&mut draft, 3, &mut store);

        assert_eq!(store.edits.len(), 1);
        assert_eq!(store.edits[0].menu_order, Some(0));
    }

    #[test]
    fn invalid_order_input_is_dropped_and_reverted() {
        for input in ["-1", "abc", "1.5"] {
            let mut store = FakeStore::default();
            let mut draft = input.to_string();

            apply_order_input(&mut draft, 7, &mut store);

            assert!(store.edits.is_empty(), "input: {}", input);
            assert_eq!(draft, "7", "input: {}", input);
        }
    }

    #[test]
    fn toggle_dispatches_exactly_one_action_regardless_of_state() {
        let panel = PageAttributesPanel::new();

        for opened in [false, true] {
            let mut store = FakeStore {
                opened,
                ..Default::default()
            };
            panel.on_toggle(&mut store);
            assert_eq!(store.toggles, vec![PANEL_PAGE_ATTRIBUTES.to_string()]);
        }
    }

    #[test]
    fn mount_issues_exactly_one_capability_fetch() {
        let (panel, cmd_rx, request) = mounted_panel("page");
        assert!(cmd_rx.try_recv().is_err());
        assert!(!request.is_cancelled());
        assert_eq!(panel.mounted_slug(), Some("page"));
        assert!(!panel.supports_page_attributes());
    }

    #[test]
    fn unmount_aborts_fetch_and_freezes_state() {
        let (mut panel, _cmd_rx, request) = mounted_panel("page");

        panel.unmount();
        assert!(request.is_cancelled());
        assert_eq!(panel.mounted_slug(), None);

        // A reply that raced the unmount must not flip the panel on.
        panel.apply_capability(request.id(), true);
        assert!(!panel.supports_page_attributes());
    }

    #[test]
    fn stale_request_ids_are_ignored() {
        let (mut panel, _cmd_rx, request) = mounted_panel("page");

        panel.apply_capability(request.id() + 1, true);
        assert!(!panel.supports_page_attributes());

        panel.apply_capability(request.id(), true);
        assert!(panel.supports_page_attributes());
    }

    #[test]
    fn remount_invalidates_previous_probe() {
        let (mut panel, _cmd_rx, first) = mounted_panel("page");

        let (new_tx, new_rx) = unbounded();
        panel.mount("post", &new_tx);
        assert!(first.is_cancelled());

        let second = match new_rx.try_recv().expect("remount issues a fetch") {
            CoreCmd::FetchTypeSupports { slug, request } => {
                assert_eq!(slug, "post");
                request
            }
            other => panic!("unexpected command: {:?}", other),
        };

        // The old reply is dead; only the new probe may resolve the panel.
        panel.apply_capability(first.id(), true);
        assert!(!panel.supports_page_attributes());
        panel.apply_capability(second.id(), true);
        assert!(panel.supports_page_attributes());
    }

    #[test]
    fn panel_instances_get_unique_input_ids() {
        let first = PageAttributesPanel::new();
        let second = PageAttributesPanel::new();
        assert_ne!(first.order_input_id(), second.order_input_id());
    }
}
