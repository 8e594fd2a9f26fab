//! Editor state container: state, actions, and selector traits.
//!
//! The store owns everything the sidebar reads (current post, panel
//! visibility) and is the only writer of that state. UI components never
//! touch [`EditorState`] directly; they read through [`StateReader`] and
//! write through [`ActionDispatcher`], both injected at render time.

use crate::models::post::{Post, UpdatePostRequest};
use std::collections::BTreeMap;

/// Actions accepted by the editor store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Flip the open/closed flag of a named sidebar panel.
    ToggleSidebarPanel { panel: String },
    /// Merge a partial update into the edited post.
    EditPost(UpdatePostRequest),
}

/// State owned by the editor store.
#[derive(Debug, Clone)]
pub struct EditorState {
    /// The document currently being edited, including unsaved edits.
    pub post: Post,
    /// Open/closed flags keyed by panel name; missing keys read as closed.
    pub open_panels: BTreeMap<String, bool>,
}

/// Read access to store state, as consumed by sidebar panels.
pub trait StateReader {
    /// Slug of the edited post's type.
    fn current_post_type(&self) -> &str;
    /// The edited `menu_order` value, when one has been committed.
    fn menu_order(&self) -> Option<u32>;
    /// Whether the named sidebar panel is open.
    fn is_panel_open(&self, panel: &str) -> bool;
}

/// Write access to store state, as exercised by sidebar panels.
pub trait ActionDispatcher {
    /// Dispatch a panel visibility toggle.
    fn toggle_sidebar_panel(&mut self, panel: &str);
    /// Dispatch a partial post update.
    fn edit_post(&mut self, update: UpdatePostRequest);
}

/// The editor's global state container.
#[derive(Debug, Clone)]
pub struct EditorStore {
    state: EditorState,
    dirty: bool,
}

impl EditorStore {
    /// Create a store around the given post with all panels closed.
    pub fn new(post: Post) -> Self {
        Self {
            state: EditorState {
                post,
                open_panels: BTreeMap::new(),
            },
            dirty: false,
        }
    }

    /// Apply an action to the state.
    ///
    /// Dispatch is synchronous and re-entrant-safe; each call is a complete
    /// hand-off with no queuing.
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::ToggleSidebarPanel { panel } => {
                let entry = self.state.open_panels.entry(panel).or_insert(false);
                *entry = !*entry;
            }
            Action::EditPost(update) => {
                if self.state.post.apply_update(&update) {
                    self.dirty = true;
                }
            }
        }
    }

    /// The edited post, including unsaved changes.
    pub fn post(&self) -> &Post {
        &self.state.post
    }

    /// Replace the edited post wholesale (e.g. after a load from the API)
    /// and clear the dirty flag.
    pub fn replace_post(&mut self, post: Post) {
        self.state.post = post;
        self.dirty = false;
    }

    /// Whether the store holds edits not yet persisted.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the current contents as persisted.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }
}

impl StateReader for EditorStore {
    fn current_post_type(&self) -> &str {
        &self.state.post.post_type
    }

    fn menu_order(&self) -> Option<u32> {
        Some(self.state.post.menu_order)
    }

    fn is_panel_open(&self, panel: &str) -> bool {
        self.state.open_panels.get(panel).copied().unwrap_or(false)
    }
}

impl ActionDispatcher for EditorStore {
    fn toggle_sidebar_panel(&mut self, panel: &str) {
        self.dispatch(Action::ToggleSidebarPanel {
            panel: panel.to_string(),
        });
    }

    fn edit_post(&mut self, update: UpdatePostRequest) {
        self.dispatch(Action::EditPost(update));
    }
}
