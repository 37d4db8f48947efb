//! Terminal-safe text helpers and link validation.
//!
//! Everything rendered from the news API is untrusted: titles and
//! descriptions go through [`strip_control_chars`] before display and article
//! links through [`validate_url_for_open`] before reaching the system browser.

mod text;
mod url_validator;

pub use text::{display_width, strip_control_chars, truncate_to_width};
pub use url_validator::{validate_image_url, validate_url_for_open, UrlValidationError};
