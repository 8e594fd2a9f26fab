//! Core domain library for Draftpad (config, content registry, models, store).

/// Configuration loading and defaults.
pub mod config;
/// Shared constants used across Draftpad crates.
pub mod constants;
/// Application error types.
pub mod error;
/// Data models for posts and post types.
pub mod models;
/// In-memory content registry backing the API.
pub mod registry;
/// Editor state container, actions, and selectors.
pub mod store;

pub use config::Config;
pub use constants::DEFAULT_PORT;
pub use error::AppError;
pub use registry::ContentRegistry;
pub use store::{ActionDispatcher, EditorStore, StateReader};
