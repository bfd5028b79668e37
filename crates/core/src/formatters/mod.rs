pub mod html;
pub mod json;
pub mod text;

pub use html::{HtmlConfig, HtmlFormatter, convert_to_html, escape_html};
pub use json::{JsonConfig, JsonFormatter, convert_to_json};
pub use text::{TextConfig, TextFormatter, convert_to_text};
