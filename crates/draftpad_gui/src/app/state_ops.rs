//! State transitions for backend events, loading, and the save flow.

use super::{DraftpadApp, StatusMessage, STATUS_TTL};
use crate::backend::{CoreCmd, CoreEvent};
use draftpad_core::models::post::UpdatePostRequest;
use std::time::Instant;
use tracing::warn;

impl DraftpadApp {
    pub(super) fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            expires_at: Instant::now() + STATUS_TTL,
        });
    }

    /// Ask the worker for the configured post.
    pub(super) fn request_post_load(&mut self) {
        let id = self.store.post().id.clone();
        if self.backend.cmd_tx.send(CoreCmd::LoadPost { id }).is_err() {
            warn!("backend unavailable; post load skipped");
            self.set_status("Load failed: backend unavailable.");
        }
    }

    /// Mount the page attributes panel for the store's current post type.
    pub(super) fn mount_page_attributes(&mut self) {
        let slug = self.store.post().post_type.clone();
        self.page_attributes.mount(&slug, &self.backend.cmd_tx);
    }

    /// Persist the edited fields through the API.
    ///
    /// A no-op while a save is already in flight or nothing is dirty.
    pub(super) fn save_now(&mut self) {
        if self.save_in_flight || !self.store.is_dirty() {
            return;
        }
        let post = self.store.post();
        let command = CoreCmd::SavePost {
            id: post.id.clone(),
            update: UpdatePostRequest {
                title: Some(post.title.clone()),
                content: Some(post.content.clone()),
                menu_order: Some(post.menu_order),
            },
        };
        if self.backend.cmd_tx.send(command).is_ok() {
            self.save_in_flight = true;
        } else {
            self.set_status("Save failed: backend unavailable.");
        }
    }

    pub(super) fn apply_event(&mut self, event: CoreEvent) {
        match event {
            CoreEvent::TypeSupportsLoaded {
                request_id,
                supports_page_attributes,
                ..
            } => {
                self.page_attributes
                    .apply_capability(request_id, supports_page_attributes);
            }
            CoreEvent::PostLoaded { post } => {
                let type_changed =
                    self.page_attributes.mounted_slug() != Some(post.post_type.as_str());
                self.title_draft = post.title.clone();
                self.content_draft = post.content.clone();
                self.store.replace_post(post);
                if type_changed {
                    // The panel's capability probe is only valid for the type
                    // it mounted with.
                    self.page_attributes.unmount();
                    self.mount_page_attributes();
                }
            }
            CoreEvent::PostSaved { post } => {
                self.save_in_flight = false;
                let current = self.store.post();
                let has_newer_local_edits = current.title != post.title
                    || current.content != post.content
                    || current.menu_order != post.menu_order;
                if !has_newer_local_edits {
                    self.store.mark_saved();
                }
                self.set_status("Saved.");
            }
            CoreEvent::PostMissing { id } => {
                self.save_in_flight = false;
                self.set_status(format!("Post '{}' does not exist.", id));
            }
            CoreEvent::Error { message } => {
                self.save_in_flight = false;
                self.set_status(message);
            }
        }
    }
}
