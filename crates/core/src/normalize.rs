//! Free text to structured address.
//!
//! An [`AddressParser`] takes whatever the user pasted ("Ali Khan, House 123,
//! Street 4, Islamabad, Pakistan, 0300-1234567") and returns a fully
//! populated [`Address`]. The extraction rules live here so every parser
//! backend asks for, and reads back, exactly the same thing:
//!
//! - `name` is the person or business.
//! - Apartment, suite, unit and sector designators are folded into `street1`.
//! - `country` is the full country name, or the fallback when unclear.
//! - Zip and postal codes are never extracted.
//! - `phoneNumber` is a human-readable contact number.
//!
//! A field the service leaves out (or leaves blank) is defaulted on its own
//! rather than failing the parse.

use async_trait::async_trait;
use serde_json::{Map, Value, json};

use crate::address::{Address, AddressField, fallback_country};
use crate::postal::strip_postal_codes;
use crate::{LabelError, Result};

/// Converts unstructured address text into an [`Address`].
///
/// Implementations make a single attempt per call and never retry.
#[async_trait]
pub trait AddressParser: Send + Sync {
    /// Parses `input` into an address.
    ///
    /// Fails with [`LabelError::EmptyInput`] for blank input, and with one of
    /// the service failures ([`LabelError::is_service_failure`]) when no usable
    /// answer comes back. Never returns a partially filled address.
    async fn parse_address(&self, input: &str) -> Result<Address>;

    /// Short backend name for logs and timing output.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Rejects blank input before anything goes out over the wire.
pub fn ensure_input(input: &str) -> Result<&str> {
    let trimmed = input.trim();
    if trimmed.is_empty() { Err(LabelError::EmptyInput) } else { Ok(trimmed) }
}

/// Instruction text sent along with the user's input.
pub fn build_prompt(input: &str, default_country: &str) -> String {
    let default_country = fallback_country(default_country);
    format!(
        "Parse the following unstructured address text into a structured JSON object.\n\
         Extract the name, street address, city, state, country, and phone number.\n\
         Do NOT extract a zip code or postal code.\n\
         If there is an apartment, suite, unit, or sector, include it in the street address (street1).\n\
         If the country is unclear, use {default_country}.\n\
         \n\
         Input text: \"{input}\""
    )
}

/// Schema for the object the service must return. All six fields are required.
pub fn response_schema(default_country: &str) -> Value {
    let default_country = fallback_country(default_country);
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING", "description": "Full name of the person or business" },
            "street1": { "type": "STRING", "description": "Street address line 1 (including apt/suite/sector)" },
            "city": { "type": "STRING" },
            "state": { "type": "STRING" },
            "country": {
                "type": "STRING",
                "description": format!("Full country name, default to {default_country} if unclear")
            },
            "phoneNumber": { "type": "STRING", "description": "Contact phone number formatted nicely" }
        },
        "required": AddressField::ALL.map(AddressField::key),
    })
}

/// Builds an [`Address`] from the JSON object text the service produced.
///
/// `input` is the original free text; postal codes found in it are removed
/// from the result. Missing, null or blank fields fall back to `""` (or
/// `default_country`). Anything other than a JSON object is a
/// [`LabelError::MalformedResponse`].
pub fn address_from_response(text: &str, input: &str, default_country: &str) -> Result<Address> {
    let default_country = fallback_country(default_country);
    let value: Value = serde_json::from_str(strip_code_fence(text))?;
    let Value::Object(object) = value else {
        return Err(LabelError::MalformedResponse(format!(
            "expected a JSON object, got {}",
            kind_of(&value)
        )));
    };

    let mut address = Address::empty(default_country);
    for field in AddressField::ALL {
        if let Some(found) = field_value(&object, field) {
            address.set(field, found);
        }
    }

    strip_postal_codes(&mut address, input);
    if address.country.is_empty() {
        address.country = default_country.to_string();
    }
    Ok(address)
}

fn field_value(object: &Map<String, Value>, field: AddressField) -> Option<String> {
    let raw = object.get(field.key()).or_else(|| match field {
        AddressField::PhoneNumber => object.get("phone_number"),
        _ => None,
    })?;

    let text = match raw {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if text.is_empty() { None } else { Some(text) }
}

/// Some models wrap JSON in a Markdown fence even when asked not to.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::DEFAULT_COUNTRY;

    const INPUT: &str = "Ali Khan, House 123, Street 4, Islamabad, Pakistan, 0300-1234567";

    #[test]
    fn test_ensure_input() {
        assert!(matches!(ensure_input(""), Err(LabelError::EmptyInput)));
        assert!(matches!(ensure_input(" \n\t"), Err(LabelError::EmptyInput)));
        assert_eq!(ensure_input("  Ali Khan ").unwrap(), "Ali Khan");
    }

    #[test]
    fn test_prompt_carries_policy_and_input() {
        let prompt = build_prompt(INPUT, DEFAULT_COUNTRY);
        assert!(prompt.contains("Do NOT extract a zip code or postal code"));
        assert!(prompt.contains("apartment, suite, unit, or sector"));
        assert!(prompt.contains("use Pakistan"));
        assert!(prompt.ends_with(&format!("\"{}\"", INPUT)));
    }

    #[test]
    fn test_schema_requires_all_fields() {
        let schema = response_schema("Canada");
        let required: Vec<&str> = schema["required"].as_array().unwrap().iter().map(|v| v.as_str().unwrap()).collect();
        assert_eq!(required, vec!["name", "street1", "city", "state", "country", "phoneNumber"]);
        assert!(schema["properties"]["country"]["description"].as_str().unwrap().contains("Canada"));
        assert!(schema["properties"].get("zip").is_none());
    }

    #[test]
    fn test_full_response() {
        let text = r#"{"name":"Ali Khan","street1":"House 123, Street 4","city":"Islamabad","state":"","country":"Pakistan","phoneNumber":"0300-1234567"}"#;
        let address = address_from_response(text, INPUT, DEFAULT_COUNTRY).unwrap();

        assert_eq!(address.name, "Ali Khan");
        assert_eq!(address.street1, "House 123, Street 4");
        assert_eq!(address.city, "Islamabad");
        assert_eq!(address.state, "");
        assert_eq!(address.country, "Pakistan");
        assert_eq!(address.phone_number, "0300-1234567");
    }

    #[test]
    fn test_missing_fields_default_individually() {
        let address = address_from_response(r#"{"name":"Ali Khan"}"#, INPUT, "Canada").unwrap();
        assert_eq!(address.name, "Ali Khan");
        assert_eq!(address.street1, "");
        assert_eq!(address.phone_number, "");
        assert_eq!(address.country, "Canada");
    }

    #[test]
    fn test_blank_and_null_country_fall_back() {
        let blank = address_from_response(r#"{"country":"  "}"#, INPUT, DEFAULT_COUNTRY).unwrap();
        assert_eq!(blank.country, DEFAULT_COUNTRY);

        let null = address_from_response(r#"{"country":null}"#, INPUT, DEFAULT_COUNTRY).unwrap();
        assert_eq!(null.country, DEFAULT_COUNTRY);
    }

    #[test]
    fn test_numeric_phone_is_kept() {
        let address = address_from_response(r#"{"phoneNumber":3001234567}"#, INPUT, DEFAULT_COUNTRY).unwrap();
        assert_eq!(address.phone_number, "3001234567");
    }

    #[test]
    fn test_snake_case_phone_accepted() {
        let address = address_from_response(r#"{"phone_number":"0300-1234567"}"#, INPUT, DEFAULT_COUNTRY).unwrap();
        assert_eq!(address.phone_number, "0300-1234567");
    }

    #[test]
    fn test_leaked_postal_code_removed() {
        let input = "Ali Khan, House 123, Street 4, Islamabad 44000, Pakistan";
        let text = r#"{"name":"Ali Khan","street1":"House 123, Street 4","city":"Islamabad 44000","state":"44000","country":"Pakistan","phoneNumber":""}"#;
        let address = address_from_response(text, input, DEFAULT_COUNTRY).unwrap();

        assert_eq!(address.city, "Islamabad");
        assert_eq!(address.state, "");
        for field in AddressField::ALL {
            assert!(!address.get(field).contains("44000"));
        }
    }

    #[test]
    fn test_postal_code_in_phone_removed() {
        let input = "Ali Khan, House 123, Street 4, Islamabad 44000, Pakistan";
        let text = r#"{"name":"Ali Khan","street1":"House 123, Street 4","city":"Islamabad","state":"","country":"Pakistan","phoneNumber":"44000"}"#;
        let address = address_from_response(text, input, DEFAULT_COUNTRY).unwrap();

        assert_eq!(address.phone_number, "");
        for field in AddressField::ALL {
            assert!(!address.get(field).contains("44000"), "{}: {:?}", field, address.get(field));
        }
    }

    #[test]
    fn test_suite_number_kept_in_street() {
        let input = "Jane Doe, 500 Main St, Ste 10001, Springfield, IL";
        let text = r#"{"name":"Jane Doe","street1":"500 Main St, Ste 10001","city":"Springfield","state":"IL","country":"United States","phoneNumber":""}"#;
        let address = address_from_response(text, input, DEFAULT_COUNTRY).unwrap();

        assert_eq!(address.street1, "500 Main St, Ste 10001");
    }

    #[test]
    fn test_blank_fallback_country_uses_default() {
        let address = address_from_response(r#"{"name":"Ali Khan"}"#, INPUT, "  ").unwrap();
        assert_eq!(address.country, DEFAULT_COUNTRY);
        assert!(build_prompt(INPUT, "").contains("use Pakistan"));
    }

    #[test]
    fn test_code_fence_tolerated() {
        let text = "```json\n{\"name\":\"Ali Khan\"}\n```";
        assert_eq!(address_from_response(text, INPUT, DEFAULT_COUNTRY).unwrap().name, "Ali Khan");
    }

    #[test]
    fn test_non_object_is_malformed() {
        assert!(matches!(
            address_from_response(r#"["Ali Khan"]"#, INPUT, DEFAULT_COUNTRY),
            Err(LabelError::MalformedResponse(_))
        ));
        assert!(matches!(
            address_from_response("Ali Khan lives in Islamabad", INPUT, DEFAULT_COUNTRY),
            Err(LabelError::MalformedResponse(_))
        ));
    }
}
