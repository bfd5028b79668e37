//! Structured shipping addresses.
//!
//! An [`Address`] always carries all six fields. Unknown values are empty
//! strings, except `country`, which falls back to a configured default
//! (see [`DEFAULT_COUNTRY`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{LabelError, Result};

/// Country used when none is given or none can be determined.
pub const DEFAULT_COUNTRY: &str = "Pakistan";

/// `configured`, trimmed, or [`DEFAULT_COUNTRY`] when it is blank.
pub fn fallback_country(configured: &str) -> &str {
    let trimmed = configured.trim();
    if trimmed.is_empty() { DEFAULT_COUNTRY } else { trimmed }
}

/// One party on a shipping label.
///
/// Serializes with camelCase keys (`phoneNumber`) so the JSON shape matches
/// the object the parsing service is asked to return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Person or business name.
    pub name: String,
    /// Street line, including any apartment, suite, unit or sector.
    pub street1: String,
    pub city: String,
    /// State, province or region.
    pub state: String,
    /// Full country name.
    pub country: String,
    /// Contact number, formatted for humans.
    pub phone_number: String,
}

impl Address {
    /// An empty address with the given fallback country.
    ///
    /// A blank fallback means [`DEFAULT_COUNTRY`]; `country` is never empty.
    pub fn empty(default_country: &str) -> Self {
        Self {
            name: String::new(),
            street1: String::new(),
            city: String::new(),
            state: String::new(),
            country: fallback_country(default_country).to_string(),
            phone_number: String::new(),
        }
    }

    /// Reads one field.
    pub fn get(&self, field: AddressField) -> &str {
        match field {
            AddressField::Name => &self.name,
            AddressField::Street1 => &self.street1,
            AddressField::City => &self.city,
            AddressField::State => &self.state,
            AddressField::Country => &self.country,
            AddressField::PhoneNumber => &self.phone_number,
        }
    }

    /// Replaces one field, leaving the others as they are.
    pub fn set(&mut self, field: AddressField, value: impl Into<String>) {
        let slot = match field {
            AddressField::Name => &mut self.name,
            AddressField::Street1 => &mut self.street1,
            AddressField::City => &mut self.city,
            AddressField::State => &mut self.state,
            AddressField::Country => &mut self.country,
            AddressField::PhoneNumber => &mut self.phone_number,
        };
        *slot = value.into();
    }

    /// Resets every field to empty and `country` to the fallback.
    pub fn clear(&mut self, default_country: &str) {
        *self = Self::empty(default_country);
    }

    /// Whether nothing but the country has been filled in.
    pub fn is_blank(&self) -> bool {
        AddressField::ALL
            .iter()
            .filter(|f| **f != AddressField::Country)
            .all(|f| self.get(*f).is_empty())
    }
}

impl Default for Address {
    fn default() -> Self {
        Self::empty(DEFAULT_COUNTRY)
    }
}

/// Names one of the six address fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressField {
    Name,
    Street1,
    City,
    State,
    Country,
    PhoneNumber,
}

impl AddressField {
    /// Every field, in label order.
    pub const ALL: [AddressField; 6] = [
        AddressField::Name,
        AddressField::Street1,
        AddressField::City,
        AddressField::State,
        AddressField::Country,
        AddressField::PhoneNumber,
    ];

    /// The key used for this field in JSON.
    pub fn key(self) -> &'static str {
        match self {
            AddressField::Name => "name",
            AddressField::Street1 => "street1",
            AddressField::City => "city",
            AddressField::State => "state",
            AddressField::Country => "country",
            AddressField::PhoneNumber => "phoneNumber",
        }
    }
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AddressField {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "name" => Ok(Self::Name),
            "street1" | "street" => Ok(Self::Street1),
            "city" => Ok(Self::City),
            "state" | "province" => Ok(Self::State),
            "country" => Ok(Self::Country),
            "phone" | "phonenumber" => Ok(Self::PhoneNumber),
            _ => Err(LabelError::UnknownField(s.to_string())),
        }
    }
}

/// Which party of the label an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Sender,
    Receiver,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Sender => f.write_str("sender"),
            Side::Receiver => f.write_str("receiver"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_address_keeps_country() {
        let address = Address::empty("Canada");
        assert_eq!(address.country, "Canada");
        assert!(address.name.is_empty());
        assert!(address.phone_number.is_empty());
        assert!(address.is_blank());
    }

    #[test]
    fn test_blank_fallback_uses_default_country() {
        assert_eq!(fallback_country(""), DEFAULT_COUNTRY);
        assert_eq!(fallback_country("  \t"), DEFAULT_COUNTRY);
        assert_eq!(fallback_country(" Canada "), "Canada");
        assert_eq!(Address::empty("").country, DEFAULT_COUNTRY);

        let mut address = Address::empty("Canada");
        address.clear(" ");
        assert_eq!(address.country, DEFAULT_COUNTRY);
    }

    #[test]
    fn test_default_uses_default_country() {
        assert_eq!(Address::default().country, DEFAULT_COUNTRY);
    }

    #[test]
    fn test_set_touches_one_field() {
        let mut address = Address::default();
        address.set(AddressField::City, "Lahore");

        assert_eq!(address.city, "Lahore");
        for field in AddressField::ALL.into_iter().filter(|f| *f != AddressField::City) {
            assert_eq!(address.get(field), Address::default().get(field));
        }
    }

    #[test]
    fn test_clear_resets_country() {
        let mut address = Address::default();
        address.set(AddressField::Name, "Ali Khan");
        address.set(AddressField::Country, "India");
        address.clear(DEFAULT_COUNTRY);

        assert_eq!(address, Address::default());
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("name".parse::<AddressField>().unwrap(), AddressField::Name);
        assert_eq!("street".parse::<AddressField>().unwrap(), AddressField::Street1);
        assert_eq!("Province".parse::<AddressField>().unwrap(), AddressField::State);
        assert_eq!("phone_number".parse::<AddressField>().unwrap(), AddressField::PhoneNumber);
        assert_eq!("phoneNumber".parse::<AddressField>().unwrap(), AddressField::PhoneNumber);
        assert!(matches!("zip".parse::<AddressField>(), Err(LabelError::UnknownField(_))));
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let json = serde_json::to_string(&Address::default()).unwrap();
        assert!(json.contains(r#""phoneNumber":"""#));
        assert!(json.contains(r#""country":"Pakistan""#));
    }
}
