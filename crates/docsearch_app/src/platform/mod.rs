//! Desktop and terminal integrations plus the two command flows.
pub mod app;
pub mod browser;
pub mod clipboard;
pub mod effects;
pub mod headless;
pub mod notify;
pub mod terminal;
