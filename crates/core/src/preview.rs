//! Read-only label snapshot and the pieces every renderer shares.
//!
//! [`LabelPreview`] is what [`crate::LabelEditor::preview`] hands out: both
//! addresses, the weight and the label size at one moment. Renderers in
//! [`crate::formatters`] turn it into text, HTML or JSON.

use serde::Serialize;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::address::Address;
use crate::dimension::LabelDimension;

/// Tracking number printed on every label. There is no carrier integration.
pub const MOCK_TRACKING_NUMBER: &str = "1Z 999 AA1 01 2345 6784";

/// Origin code printed in the footer.
pub const DEFAULT_ORIGIN_CODE: &str = "PK";

/// Everything a label shows, frozen at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelPreview {
    pub sender: Address,
    pub receiver: Address,
    /// Weight in pounds, verbatim.
    pub weight: String,
    pub size: LabelDimension,
}

/// One address laid out for the label, with placeholders for blank lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyBlock {
    pub heading: &'static str,
    pub name: String,
    pub street: String,
    /// `City, State`.
    pub locality: String,
    pub phone: String,
    /// Only the receiver block shows a country.
    pub country: Option<String>,
}

impl LabelPreview {
    /// The small "From" block.
    pub fn from_block(&self) -> PartyBlock {
        let s = &self.sender;
        PartyBlock {
            heading: "FROM:",
            name: or_placeholder(&s.name, "SENDER NAME"),
            street: or_placeholder(&s.street1, "123 SENDER ST"),
            locality: format!("{}, {}", or_placeholder(&s.city, "CITY"), or_placeholder(&s.state, "ST")),
            phone: s.phone_number.clone(),
            country: None,
        }
    }

    /// The large "Ship To" block.
    pub fn to_block(&self) -> PartyBlock {
        let r = &self.receiver;
        PartyBlock {
            heading: "SHIP TO:",
            name: or_placeholder(&r.name, "RECEIVER NAME"),
            street: or_placeholder(&r.street1, "456 RECEIVER RD"),
            locality: format!("{}, {}", or_placeholder(&r.city, "DESTINATION"), or_placeholder(&r.state, "ST")),
            phone: r.phone_number.clone(),
            country: Some(r.country.clone()),
        }
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() { placeholder.to_string() } else { value.to_string() }
}

/// Per-render details that are not part of the form.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Date printed in the footer.
    pub date: Date,
    pub tracking_number: String,
    pub origin_code: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            date: OffsetDateTime::now_utc().date(),
            tracking_number: MOCK_TRACKING_NUMBER.to_string(),
            origin_code: DEFAULT_ORIGIN_CODE.to_string(),
        }
    }
}

impl RenderOptions {
    /// Footer date, e.g. `Oct 18, 2026`.
    pub fn date_label(&self) -> String {
        let format = format_description!("[month repr:short] [day padding:none], [year]");
        self.date.format(&format).unwrap_or_else(|_| self.date.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::DEFAULT_COUNTRY;
    use crate::dimension::label_sizes;
    use time::macros::date;

    fn preview(sender: Address, receiver: Address) -> LabelPreview {
        LabelPreview { sender, receiver, weight: "1".to_string(), size: label_sizes()[0].clone() }
    }

    #[test]
    fn test_blank_blocks_use_placeholders() {
        let p = preview(Address::default(), Address::default());

        let from = p.from_block();
        assert_eq!(from.name, "SENDER NAME");
        assert_eq!(from.street, "123 SENDER ST");
        assert_eq!(from.locality, "CITY, ST");
        assert_eq!(from.country, None);

        let to = p.to_block();
        assert_eq!(to.name, "RECEIVER NAME");
        assert_eq!(to.locality, "DESTINATION, ST");
        assert_eq!(to.country.as_deref(), Some(DEFAULT_COUNTRY));
    }

    #[test]
    fn test_filled_blocks() {
        let receiver = Address {
            name: "Ali Khan".to_string(),
            street1: "House 123, Street 4".to_string(),
            city: "Islamabad".to_string(),
            state: "ICT".to_string(),
            country: "Pakistan".to_string(),
            phone_number: "0300-1234567".to_string(),
        };
        let to = preview(Address::default(), receiver).to_block();

        assert_eq!(to.name, "Ali Khan");
        assert_eq!(to.street, "House 123, Street 4");
        assert_eq!(to.locality, "Islamabad, ICT");
        assert_eq!(to.phone, "0300-1234567");
    }

    #[test]
    fn test_date_label() {
        let options = RenderOptions { date: date!(2026 - 10 - 08), ..Default::default() };
        assert_eq!(options.date_label(), "Oct 8, 2026");
    }

    #[test]
    fn test_render_options_default() {
        let options = RenderOptions::default();
        assert_eq!(options.tracking_number, MOCK_TRACKING_NUMBER);
        assert_eq!(options.origin_code, "PK");
    }
}
