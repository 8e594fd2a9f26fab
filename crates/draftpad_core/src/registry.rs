//! In-memory content registry backing the HTTP API.

use crate::constants::{DEFAULT_POST_ID, FEATURE_PAGE_ATTRIBUTES};
use crate::error::AppError;
use crate::models::post::{Post, UpdatePostRequest};
use crate::models::post_type::PostType;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Registry of post types and posts shared between the API handlers.
///
/// Nothing here persists across runs; the registry is the process-local
/// source of truth the editor reads from and writes back to.
#[derive(Debug, Default)]
pub struct ContentRegistry {
    types: RwLock<BTreeMap<String, PostType>>,
    posts: RwLock<BTreeMap<String, Post>>,
}

fn poisoned(what: &str) -> AppError {
    AppError::Registry(format!("{} lock poisoned", what))
}

impl ContentRegistry {
    /// Build a registry seeded with the default content set: a "page" type
    /// that supports page attributes, a "post" type that does not, and one
    /// editable page.
    pub fn seeded() -> Self {
        let registry = Self::default();

        let mut page_supports = BTreeMap::new();
        page_supports.insert("title".to_string(), true);
        page_supports.insert("editor".to_string(), true);
        page_supports.insert(FEATURE_PAGE_ATTRIBUTES.to_string(), true);
        registry.insert_type(PostType::new("page", "Page", page_supports));

        let mut post_supports = BTreeMap::new();
        post_supports.insert("title".to_string(), true);
        post_supports.insert("editor".to_string(), true);
        registry.insert_type(PostType::new("post", "Post", post_supports));

        let mut welcome = Post::new("Welcome".to_string(), "page".to_string());
        welcome.id = DEFAULT_POST_ID.to_string();
        welcome.content = "Start writing.".to_string();
        registry.insert_post(welcome);

        registry
    }

    /// Register or replace a post type.
    pub fn insert_type(&self, post_type: PostType) {
        if let Ok(mut types) = self.types.write() {
            types.insert(post_type.slug.clone(), post_type);
        }
    }

    /// Register or replace a post.
    pub fn insert_post(&self, post: Post) {
        if let Ok(mut posts) = self.posts.write() {
            posts.insert(post.id.clone(), post);
        }
    }

    /// Look up a post type by slug.
    ///
    /// # Errors
    /// Returns [`AppError::Registry`] when the lock is poisoned.
    pub fn post_type(&self, slug: &str) -> Result<Option<PostType>, AppError> {
        let types = self.types.read().map_err(|_| poisoned("types"))?;
        Ok(types.get(slug).cloned())
    }

    /// List all registered post types in slug order.
    pub fn list_types(&self) -> Result<Vec<PostType>, AppError> {
        let types = self.types.read().map_err(|_| poisoned("types"))?;
        Ok(types.values().cloned().collect())
    }

    /// Look up a post by id.
    pub fn post(&self, id: &str) -> Result<Option<Post>, AppError> {
        let posts = self.posts.read().map_err(|_| poisoned("posts"))?;
        Ok(posts.get(id).cloned())
    }

    /// Apply a partial update to a post.
    ///
    /// # Returns
    /// The merged post, or `None` when no post has the given id.
    pub fn update_post(
        &self,
        id: &str,
        update: &UpdatePostRequest,
    ) -> Result<Option<Post>, AppError> {
        let mut posts = self.posts.write().map_err(|_| poisoned("posts"))?;
        match posts.get_mut(id) {
            Some(post) => {
                post.apply_update(update);
                Ok(Some(post.clone()))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_registry_declares_page_attributes_for_pages_only() {
        let registry = ContentRegistry::seeded();

        let page = registry.post_type("page").unwrap().unwrap();
        assert!(page.supports_page_attributes());

        let post = registry.post_type("post").unwrap().unwrap();
        assert!(!post.supports_page_attributes());

        assert!(registry.post_type("attachment").unwrap().is_none());
    }

    #[test]
    fn update_post_merges_and_returns_none_for_unknown_id() {
        let registry = ContentRegistry::seeded();
        let update = UpdatePostRequest {
            menu_order: Some(3),
            ..Default::default()
        };

        let merged = registry
            .update_post(DEFAULT_POST_ID, &update)
            .unwrap()
            .unwrap();
        assert_eq!(merged.menu_order, 3);
        assert_eq!(merged.title, "Welcome");

        assert!(registry.update_post("missing", &update).unwrap().is_none());
    }
}
