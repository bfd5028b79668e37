use crate::Result;
use crate::address::Address;
use crate::preview::{LabelPreview, RenderOptions};
use serde::Serialize;

/// Complete JSON output structure
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonOutput<'a> {
    pub sender: &'a Address,
    pub receiver: &'a Address,
    pub weight: &'a str,
    pub size: JsonSize<'a>,
    pub tracking_number: &'a str,
    pub date: String,
}

/// Label size as it appears in JSON output
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonSize<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub width: f64,
    pub height: f64,
    /// CSS `@page` size value
    pub css: String,
}

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Pretty print JSON output
    pub pretty: bool,
}

/// Convert a preview to JSON format
pub fn convert_to_json(preview: &LabelPreview, options: &RenderOptions, config: &JsonConfig) -> Result<String> {
    let output = JsonOutput {
        sender: &preview.sender,
        receiver: &preview.receiver,
        weight: &preview.weight,
        size: JsonSize {
            id: preview.size.id,
            name: preview.size.name,
            width: preview.size.width,
            height: preview.size.height,
            css: preview.size.css_size(),
        },
        tracking_number: &options.tracking_number,
        date: options.date.to_string(),
    };

    if config.pretty { Ok(serde_json::to_string_pretty(&output)?) } else { Ok(serde_json::to_string(&output)?) }
}

/// JSON formatter with configurable options
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, preview: &LabelPreview, options: &RenderOptions) -> Result<String> {
        convert_to_json(preview, options, &self.config)
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new(JsonConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::label_sizes;
    use time::macros::date;

    fn preview() -> LabelPreview {
        LabelPreview {
            sender: Address::default(),
            receiver: Address { name: "Ali Khan".to_string(), ..Address::default() },
            weight: "1.5".to_string(),
            size: label_sizes()[0].clone(),
        }
    }

    fn options() -> RenderOptions {
        RenderOptions { date: date!(2026 - 10 - 18), ..Default::default() }
    }

    #[test]
    fn test_convert_to_json() {
        let json = convert_to_json(&preview(), &options(), &JsonConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["receiver"]["name"], "Ali Khan");
        assert_eq!(value["receiver"]["phoneNumber"], "");
        assert_eq!(value["sender"]["country"], "Pakistan");
        assert_eq!(value["weight"], "1.5");
        assert_eq!(value["size"]["id"], "4x6");
        assert_eq!(value["size"]["css"], "4in 6in");
        assert_eq!(value["trackingNumber"], "1Z 999 AA1 01 2345 6784");
        assert_eq!(value["date"], "2026-10-18");
    }

    #[test]
    fn test_json_pretty() {
        let formatter = JsonFormatter::new(JsonConfig { pretty: true });
        let json = formatter.convert(&preview(), &options()).unwrap();
        assert!(json.contains('\n'));
        assert!(json.contains("  \"sender\""));
    }

    #[test]
    fn test_json_compact() {
        let json = JsonFormatter::default().convert(&preview(), &options()).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.starts_with('{'));
    }
}
