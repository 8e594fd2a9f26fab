//! HTTP request handlers.

/// Post endpoints.
pub mod post;
/// Post-type endpoints.
pub mod post_type;
