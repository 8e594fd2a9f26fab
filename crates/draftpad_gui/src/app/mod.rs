//! egui application shell for the Draftpad editor.

mod state_ops;
mod ui;

use crate::backend::{spawn_backend, BackendHandle};
use draftpad_core::config::env_flag_enabled;
use draftpad_core::models::post::Post;
use draftpad_core::{Config, ContentRegistry, EditorStore};
use draftpad_server::{AppState, EmbeddedServer};
use eframe::egui;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use ui::PageAttributesPanel;

/// Default initial window size for native startup.
pub(crate) const DEFAULT_WINDOW_SIZE: [f32; 2] = [980.0, 640.0];

const STATUS_TTL: Duration = Duration::from_secs(5);
const IDLE_REPAINT_INTERVAL: Duration = Duration::from_millis(200);

struct StatusMessage {
    text: String,
    expires_at: Instant,
}

/// Native egui application shell.
///
/// Owns the editor store and the sidebar panels, and communicates with the
/// background worker via channels so the `update` loop never blocks on
/// network I/O.
pub(crate) struct DraftpadApp {
    backend: BackendHandle,
    store: EditorStore,
    page_attributes: PageAttributesPanel,
    title_draft: String,
    content_draft: String,
    status: Option<StatusMessage>,
    save_in_flight: bool,
    _server: EmbeddedServer,
    server_addr: SocketAddr,
}

impl DraftpadApp {
    /// Construct a new app instance from the current environment config.
    ///
    /// Starts the embedded API server, spawns the backend worker, kicks off
    /// the initial post load, and mounts the page attributes panel for the
    /// configured post's type.
    ///
    /// # Errors
    /// Returns an error if the embedded server cannot start.
    pub(crate) fn new() -> Result<Self, draftpad_core::AppError> {
        let config = Config::from_env();
        let post_id = config.post_id.clone();

        let allow_public = env_flag_enabled("ALLOW_PUBLIC_ACCESS");
        if allow_public {
            warn!("Public access enabled - server will accept requests from any origin");
        }
        let state = AppState::new(config, ContentRegistry::seeded());
        let server = EmbeddedServer::start(state, allow_public)?;
        let server_addr = server.addr();
        info!("editor attached to API at http://{}", server_addr);

        let backend = spawn_backend(format!("http://{}", server_addr));

        // Placeholder post until the initial load completes; the panel mounts
        // against the default type and re-mounts if the load disagrees.
        let mut post = Post::new(String::new(), draftpad_core::constants::DEFAULT_POST_TYPE.into());
        post.id = post_id;

        let mut app = Self {
            backend,
            store: EditorStore::new(post),
            page_attributes: PageAttributesPanel::new(),
            title_draft: String::new(),
            content_draft: String::new(),
            status: None,
            save_in_flight: false,
            _server: server,
            server_addr,
        };
        app.request_post_load();
        app.mount_page_attributes();
        Ok(app)
    }
}

impl eframe::App for DraftpadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(status) = &self.status {
            if Instant::now() >= status.expires_at {
                self.status = None;
            }
        }

        while let Ok(event) = self.backend.evt_rx.try_recv() {
            self.apply_event(event);
        }

        self.render_top_bar(ctx);
        self.render_sidebar(ctx);
        self.render_status_bar(ctx);
        self.render_editor_panel(ctx);

        // Worker events arrive outside egui's input stream, so poll for them.
        ctx.request_repaint_after(IDLE_REPAINT_INTERVAL);
    }
}

impl Drop for DraftpadApp {
    fn drop(&mut self) {
        self.page_attributes.unmount();
    }
}

#[cfg(test)]
mod tests;
