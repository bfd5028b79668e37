//! Shipping label composition with AI-assisted address auto-fill.
//!
//! A [`LabelEditor`] holds the sender, receiver, weight and label size.
//! Addresses are typed in field by field or filled from free text by an
//! [`AddressParser`] such as [`GeminiParser`]. [`LabelEditor::preview`]
//! freezes the current state, and the [`formatters`] render it as a text
//! label, a printable HTML page or JSON.

pub mod address;
pub mod config;
pub mod dimension;
pub mod editor;
pub mod error;
pub mod formatters;
pub mod gemini;
pub mod normalize;
pub mod postal;
pub mod preview;

pub use address::{Address, AddressField, DEFAULT_COUNTRY, Side};
pub use config::Settings;
pub use dimension::{Axis, CUSTOM_ID, LabelDimension, label_sizes};
pub use editor::{AutoFill, DEFAULT_WEIGHT, LabelEditor, SkipReason};
pub use error::{LabelError, Result};
pub use formatters::{HtmlConfig, HtmlFormatter, JsonConfig, JsonFormatter, TextConfig, TextFormatter};
pub use formatters::{convert_to_html, convert_to_json, convert_to_text};
#[cfg(feature = "gemini")]
pub use gemini::GeminiParser;
pub use gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL, GeminiConfig, ReplayParser, decode_generate_content};
pub use normalize::{AddressParser, address_from_response, build_prompt, response_schema};
#[doc(hidden)]
pub use postal::{postal_codes, strip_postal_codes};
pub use preview::{LabelPreview, PartyBlock, RenderOptions};
