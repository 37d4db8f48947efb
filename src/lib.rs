//! Terminal news reader for the GNews search API.

pub mod app;
pub mod categories;
pub mod config;
pub mod news;
pub mod state;
pub mod ui;
pub mod util;
pub mod view;
