//! Primitive shape predicates over JSON values.
//!
//! Every predicate has the same signature, `fn(&Value) -> bool`, so any of
//! them can be handed to the field combinators in [`super::fields`].

use serde_json::Value;

use crate::address::is_valid_address;
use crate::config::LEDGER_ENTRY_ID_LENGTH;

pub use crate::amount::{
    is_amount, is_clawback_amount, is_currency, is_issued_currency, is_issued_currency_amount,
    is_mpt_amount, is_xrpl_number,
};

/// A shape check usable with the field combinators.
pub type Predicate = fn(&Value) -> bool;

pub fn is_string(value: &Value) -> bool {
    value.is_string()
}

pub fn is_number(value: &Value) -> bool {
    value.is_number()
}

/// A JSON object (arrays and `null` excluded).
pub fn is_record(value: &Value) -> bool {
    value.is_object()
}

pub fn is_array(value: &Value) -> bool {
    value.is_array()
}

/// A non-empty array whose every element is an object.
pub fn is_non_empty_record_array(value: &Value) -> bool {
    value
        .as_array()
        .map_or(false, |items| !items.is_empty() && items.iter().all(Value::is_object))
}

/// Returns `true` if `text` is non-empty and made only of hex digits.
pub fn is_hex(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_hexdigit())
}

/// A non-empty hex string.
pub fn is_hex_string(value: &Value) -> bool {
    value.as_str().map_or(false, is_hex)
}

/// A classic address or X-address.
pub fn is_account(value: &Value) -> bool {
    value.as_str().map_or(false, is_valid_address)
}

/// A 256-bit ledger object id: exactly 64 hex characters.
pub fn is_ledger_entry_id(value: &Value) -> bool {
    value
        .as_str()
        .map_or(false, |text| text.len() == LEDGER_ENTRY_ID_LENGTH && is_hex(text))
}

/// A JSON number, or a string of decimal digits.
pub fn is_number_or_numeric_string(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(text) => !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()),
        _ => false,
    }
}

/// Exactly the number 0 or 1.
pub fn is_zero_or_one(value: &Value) -> bool {
    matches!(value.as_u64(), Some(0) | Some(1))
}

/// A non-empty hex string of at most `max_length` characters.
pub fn is_hex_metadata(value: &Value, max_length: usize) -> bool {
    value
        .as_str()
        .map_or(false, |text| text.len() <= max_length && is_hex(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hex_requires_content() {
        assert!(is_hex_string(&json!("DEADbeef")));
        assert!(!is_hex_string(&json!("")));
        assert!(!is_hex_string(&json!("0xAB")));
        assert!(!is_hex_string(&json!(12)));
    }

    #[test]
    fn ledger_entry_id_is_exactly_64_hex() {
        let id = "A".repeat(64);
        assert!(is_ledger_entry_id(&json!(id)));
        assert!(!is_ledger_entry_id(&json!("A".repeat(63))));
        assert!(!is_ledger_entry_id(&json!("G".repeat(64))));
    }

    #[test]
    fn numeric_strings() {
        assert!(is_number_or_numeric_string(&json!(7)));
        assert!(is_number_or_numeric_string(&json!("42")));
        assert!(!is_number_or_numeric_string(&json!("4.2")));
        assert!(!is_number_or_numeric_string(&json!("")));
    }

    #[test]
    fn record_arrays() {
        assert!(is_non_empty_record_array(&json!([{"a": 1}])));
        assert!(!is_non_empty_record_array(&json!([])));
        assert!(!is_non_empty_record_array(&json!([1])));
    }

    #[test]
    fn hex_metadata_respects_length() {
        assert!(is_hex_metadata(&json!("ABCD"), 4));
        assert!(!is_hex_metadata(&json!("ABCDEF"), 4));
        assert!(!is_hex_metadata(&json!(""), 4));
    }

    #[test]
    fn accounts() {
        assert!(is_account(&json!("rfmDuhDyLGgx94qiwf3YF8BUV5j6KSvE8")));
        assert!(!is_account(&json!("rfmDuhDyLGgx94qiwf3YF8BUV5j6KSvE9")));
        assert!(!is_account(&json!(null)));
    }

    #[test]
    fn zero_or_one() {
        assert!(is_zero_or_one(&json!(0)));
        assert!(is_zero_or_one(&json!(1)));
        assert!(!is_zero_or_one(&json!(2)));
        assert!(!is_zero_or_one(&json!("1")));
    }
}
