//! Postal code guard.
//!
//! Labels carry no zip or postal code. The parsing service is told not to
//! extract one, and this module removes any that slip through anyway: tokens
//! in the input that look like postal codes are stripped from every output
//! field. The phone number keeps a code only when, in the input, that code
//! never stands apart from a longer phone-shaped number.

use std::sync::LazyLock;

use regex::Regex;

use crate::address::{Address, AddressField};

/// 5-digit and ZIP+4, 6-digit, UK-style and Canadian-style codes.
static POSTAL_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:\d{5}(?:-\d{4})?|\d{6}|[A-Z]{1,2}\d[A-Z\d]?\s?\d[A-Z]{2}|[A-Z]\d[A-Z]\s?\d[A-Z]\d)\b").unwrap()
});

static SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());

/// Runs of digits with the usual phone separators, optionally starting with `+`.
static PHONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\+?\(?\d[\d\s().-]{5,}\d").unwrap());

/// Words that make a following number part of the street line.
const DESIGNATORS: &[&str] = &[
    "house", "h", "no", "plot", "street", "st", "road", "rd", "lane", "ln", "gali", "apt", "apartment", "suite",
    "ste", "unit", "flat", "room", "rm", "sector", "block", "blk", "phase", "floor", "fl", "building", "bldg",
    "lot", "box",
];

/// Finds postal-code-shaped tokens in free text.
///
/// Numbers directly preceded by a designator ("House 12345", "Suite #10001")
/// are street numbers and are not reported.
pub fn postal_codes(input: &str) -> Vec<String> {
    POSTAL_CODE
        .find_iter(input)
        .filter(|m| !follows_designator(&input[..m.start()]))
        .map(|m| m.as_str().to_string())
        .collect()
}

fn follows_designator(before: &str) -> bool {
    let before = before.trim_end();
    if before.ends_with('#') {
        return true;
    }
    let word = before
        .rsplit(|c: char| c.is_whitespace() || c == ',')
        .next()
        .unwrap_or_default()
        .trim_end_matches('.')
        .to_lowercase();
    DESIGNATORS.contains(&word.as_str())
}

/// Removes the postal codes found in `input` from the address fields.
/// Returns whether anything changed.
///
/// In `street1`, a code at the very start or right after a designator
/// ("Ste 10001") is kept since that is where house and unit numbers go.
/// In the phone number, a code is kept only if every occurrence of it in
/// `input` is part of a longer phone-shaped number.
pub fn strip_postal_codes(address: &mut Address, input: &str) -> bool {
    let codes = postal_codes(input);
    if codes.is_empty() {
        return false;
    }

    let mut changed = false;
    for field in AddressField::ALL {
        let original = address.get(field);
        let mut value = original.to_string();
        for code in &codes {
            value = match field {
                AddressField::Street1 => remove_token(&value, code, true),
                AddressField::PhoneNumber if only_in_phone_numbers(input, code) => value,
                _ => remove_token(&value, code, false),
            };
        }
        if value != original {
            tracing::warn!(field = %field, "removed postal code from parsed address");
            address.set(field, value);
            changed = true;
        }
    }
    changed
}

/// Whether every occurrence of `code` in `input` sits inside a phone-shaped
/// number with more digits than the code itself.
fn only_in_phone_numbers(input: &str, code: &str) -> bool {
    let Ok(pattern) = Regex::new(&format!(r"\b{}\b", regex::escape(code))) else {
        return false;
    };
    let code_digits = digit_count(code);
    pattern.find_iter(input).all(|occurrence| {
        PHONE.find_iter(input).any(|phone| {
            phone.start() <= occurrence.start()
                && occurrence.end() <= phone.end()
                && digit_count(phone.as_str()) > code_digits
        })
    })
}

fn digit_count(text: &str) -> usize {
    text.chars().filter(char::is_ascii_digit).count()
}

fn remove_token(value: &str, token: &str, street: bool) -> String {
    let Ok(pattern) = Regex::new(&format!(r"\b{}\b", regex::escape(token))) else {
        return value.to_string();
    };
    let leading = value.len() - value.trim_start().len();

    let mut out = String::with_capacity(value.len());
    let mut last = 0;
    let mut removed = false;
    for m in pattern.find_iter(value) {
        if street && (m.start() == leading || follows_designator(&value[..m.start()])) {
            continue;
        }
        out.push_str(&value[last..m.start()]);
        last = m.end();
        removed = true;
    }
    if !removed {
        return value.to_string();
    }
    out.push_str(&value[last..]);
    tidy(&out)
}

/// Drops the empty segments and doubled spaces a removal leaves behind.
fn tidy(value: &str) -> String {
    let joined = value
        .split(',')
        .map(|part| part.trim().trim_matches('-').trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    SPACES.replace_all(&joined, " ").into_owned()
}
