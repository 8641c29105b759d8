pub mod app;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod event;
pub mod ui;
pub mod vim;
