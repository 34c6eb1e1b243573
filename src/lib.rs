//! Editing-session core for per-item image editing
//!
//! Exposes the snapshot history, the control DSL engine and the session
//! coordinator that binds them to the selected item.

pub mod action;
pub mod app;
pub mod config;
pub mod keybindings;
pub mod model;
pub mod services;
pub mod settings;

pub use app::Session;
