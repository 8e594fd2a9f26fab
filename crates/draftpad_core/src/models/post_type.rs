//! Post-type descriptors and their capability maps.

use crate::constants::FEATURE_PAGE_ATTRIBUTES;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A post type as stored in the registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostType {
    pub slug: String,
    pub name: String,
    /// Feature-name to enabled-flag capability map.
    #[serde(default)]
    pub supports: BTreeMap<String, bool>,
}

/// Serialization context requested by API consumers.
///
/// The capability map is only exposed in the `edit` context, so editing
/// surfaces must ask for it explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeContext {
    #[default]
    View,
    Edit,
}

/// Query parameters accepted by the post-type endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct TypeQuery {
    pub context: Option<TypeContext>,
}

/// Wire representation of a post type, shaped by the requested context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostTypeResponse {
    pub slug: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supports: Option<BTreeMap<String, bool>>,
}

impl PostType {
    /// Create a post type with the given capability map.
    pub fn new(slug: &str, name: &str, supports: BTreeMap<String, bool>) -> Self {
        Self {
            slug: slug.to_string(),
            name: name.to_string(),
            supports,
        }
    }

    /// Whether the named feature is enabled. Missing keys read as disabled.
    pub fn feature_enabled(&self, feature: &str) -> bool {
        self.supports.get(feature).copied().unwrap_or(false)
    }

    /// Whether this type supports the page attributes panel.
    pub fn supports_page_attributes(&self) -> bool {
        self.feature_enabled(FEATURE_PAGE_ATTRIBUTES)
    }

    /// Build the wire representation for the requested context.
    ///
    /// # Returns
    /// A [`PostTypeResponse`] carrying the capability map only for
    /// [`TypeContext::Edit`].
    pub fn in_context(&self, context: TypeContext) -> PostTypeResponse {
        PostTypeResponse {
            slug: self.slug.clone(),
            name: self.name.clone(),
            supports: match context {
                TypeContext::Edit => Some(self.supports.clone()),
                TypeContext::View => None,
            },
        }
    }
}

impl PostTypeResponse {
    /// Read a capability flag from the wire representation.
    ///
    /// Both an absent map (view context) and an absent key read as disabled.
    pub fn feature_enabled(&self, feature: &str) -> bool {
        self.supports
            .as_ref()
            .and_then(|supports| supports.get(feature).copied())
            .unwrap_or(false)
    }
}
