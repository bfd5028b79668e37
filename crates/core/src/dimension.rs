//! Physical label sizes.
//!
//! The selectable set is fixed at three entries. Two are presets; the
//! `custom` entry starts out at 4" x 6" and its width and height can be
//! overwritten while it is selected.

use std::fmt;

use serde::Serialize;

/// Id of the only user-editable size.
pub const CUSTOM_ID: &str = "custom";

/// A named label size in inches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelDimension {
    /// Stable identifier, unique within the set.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Width in inches.
    pub width: f64,
    /// Height in inches.
    pub height: f64,
}

impl LabelDimension {
    /// Whether this is the user-editable entry.
    pub fn is_custom(&self) -> bool {
        self.id == CUSTOM_ID
    }

    /// CSS `size` value for the print `@page` rule, e.g. `4in 6in`.
    pub fn css_size(&self) -> String {
        format!("{}in {}in", format_inches(self.width), format_inches(self.height))
    }
}

impl fmt::Display for LabelDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}in x {}in)",
            self.name,
            format_inches(self.width),
            format_inches(self.height)
        )
    }
}

/// One side of a label, for custom size edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

/// The three selectable sizes, in display order. The first is the default.
pub fn label_sizes() -> [LabelDimension; 3] {
    [
        LabelDimension { id: "4x6", name: "Standard 4\" x 6\"", width: 4.0, height: 6.0 },
        LabelDimension { id: "4x4", name: "Square 4\" x 4\"", width: 4.0, height: 4.0 },
        LabelDimension { id: CUSTOM_ID, name: "Custom Size", width: 4.0, height: 6.0 },
    ]
}

/// Formats inches without a trailing `.0`.
fn format_inches(value: f64) -> String {
    if value.fract() == 0.0 { format!("{}", value as i64) } else { format!("{}", value) }
}
