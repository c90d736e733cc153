// Modules for server components
pub mod web_ui;

// Re-export public APIs
pub use web_ui::{AppState, WebUiConfig, WebUiServer};
