//! Post data models and partial-update semantics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single editable document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Slug of the post type this document belongs to.
    pub post_type: String,
    /// Manual sort order among sibling documents.
    #[serde(default)]
    pub menu_order: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for updating a post. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub menu_order: Option<u32>,
}

impl Post {
    /// Create a new post of the given type with a fresh id.
    ///
    /// # Returns
    /// A new [`Post`] with empty content and `menu_order` 0.
    pub fn new(title: String, post_type: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            content: String::new(),
            post_type,
            menu_order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge an update into this post, bumping `updated_at` when anything
    /// changed.
    ///
    /// # Returns
    /// `true` when at least one field was modified.
    pub fn apply_update(&mut self, update: &UpdatePostRequest) -> bool {
        let mut changed = false;
        if let Some(title) = &update.title {
            if &self.title != title {
                self.title = title.clone();
                changed = true;
            }
        }
        if let Some(content) = &update.content {
            if &self.content != content {
                self.content = content.clone();
                changed = true;
            }
        }
        if let Some(menu_order) = update.menu_order {
            if self.menu_order != menu_order {
                self.menu_order = menu_order;
                changed = true;
            }
        }
        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }
}

impl UpdatePostRequest {
    /// Whether the request carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.menu_order.is_none()
    }
}
