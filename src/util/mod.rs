//! Text and URL helpers shared by the renderer and the browser opener.

mod text;
mod url_validator;

pub use text::{display_width, html_to_text, strip_control_chars, truncate_to_width};
pub use url_validator::{validate_url_for_open, UrlValidationError};
