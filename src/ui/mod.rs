//! Terminal User Interface module.
//!
//! This module provides the TUI for the news reader, including:
//! - Main event loop (`run`)
//! - Input handling for the article list and the category sidebar
//! - Rendering for the article list, full-panel states and sidebar
//! - Background load task spawning and event processing
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `events` - Background task event processing
//! - `helpers` - Load task spawning and panic capture
//! - `render` - View rendering dispatch
//! - `articles` - Article card list widget
//! - `panels` - Loading, error and empty panels
//! - `sidebar` - Category sidebar widget
//! - `status` - Header and status bar widgets

mod articles;
mod events;
mod helpers;
mod input;
mod loop_runner;
mod panels;
mod render;
mod sidebar;
mod status;

// Re-export the public API
pub use loop_runner::{run, Action};
