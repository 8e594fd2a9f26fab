//! Shared constants used across Draftpad crates.

/// Default API port for Draftpad.
pub const DEFAULT_PORT: u16 = 38422;

/// Sidebar panel name for the page attributes section.
pub const PANEL_PAGE_ATTRIBUTES: &str = "page-attributes";

/// Post-type capability key consumed by the page attributes panel.
pub const FEATURE_PAGE_ATTRIBUTES: &str = "page-attributes";

/// Post opened by the editor when no override is configured.
pub const DEFAULT_POST_ID: &str = "welcome-page";

/// Post type assumed for the editor shell before the first load completes.
pub const DEFAULT_POST_TYPE: &str = "page";
