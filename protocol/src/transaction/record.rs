//! A typed view over a loosely-typed transaction record.

use serde_json::{Map, Value};

use super::types::TransactionType;
use crate::flags::is_flag_enabled;

/// A transaction record whose type tag is known and whose `Flags` have been
/// canonicalized to a bitmask.
///
/// The record itself stays a JSON object: every transaction type carries a
/// different field set, and validators report problems in terms of the
/// caller's own field names.
#[derive(Debug, Clone, Copy)]
pub struct TxRecord<'a> {
    tx_type: TransactionType,
    fields: &'a Map<String, Value>,
    flags: u32,
}

impl<'a> TxRecord<'a> {
    /// Wraps `fields` as a record of type `tx_type` with canonical `flags`.
    pub fn new(tx_type: TransactionType, fields: &'a Map<String, Value>, flags: u32) -> Self {
        Self {
            tx_type,
            fields,
            flags,
        }
    }

    /// The record's type.
    pub fn tx_type(&self) -> TransactionType {
        self.tx_type
    }

    /// The record's type tag, used as the prefix of every error message.
    pub fn name(&self) -> &'static str {
        self.tx_type.as_str()
    }

    /// The raw JSON object.
    pub fn fields(&self) -> &'a Map<String, Value> {
        self.fields
    }

    /// The raw value of `field`, `null` included.
    pub fn raw(&self, field: &str) -> Option<&'a Value> {
        self.fields.get(field)
    }

    /// The value of `field`, treating `null` as absent.
    pub fn get(&self, field: &str) -> Option<&'a Value> {
        self.fields.get(field).filter(|value| !value.is_null())
    }

    /// Returns `true` if `field` is present and not `null`.
    pub fn has(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// The value of `field` if it is a string.
    pub fn str(&self, field: &str) -> Option<&'a str> {
        self.get(field).and_then(Value::as_str)
    }

    /// The value of `field` as a float, if it is a JSON number.
    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(Value::as_f64)
    }

    /// The sending account, if present as a string.
    pub fn account(&self) -> Option<&'a str> {
        self.str("Account")
    }

    /// The canonical flag bitmask.
    pub fn flags(&self) -> u32 {
        self.flags
    }

    /// Returns `true` if every bit of `flag` is set.
    pub fn has_flag(&self, flag: u32) -> bool {
        is_flag_enabled(self.flags, flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_fields_read_as_absent() {
        let value = json!({"Account": "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh", "Memos": null});
        let map = value.as_object().unwrap();
        let tx = TxRecord::new(TransactionType::Payment, map, 0);

        assert!(tx.has("Account"));
        assert!(!tx.has("Memos"));
        assert!(tx.raw("Memos").is_some());
        assert_eq!(tx.account(), Some("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh"));
    }

    #[test]
    fn flag_checks_use_the_canonical_mask() {
        let value = json!({});
        let tx = TxRecord::new(TransactionType::Payment, value.as_object().unwrap(), 0x0002_0000);
        assert!(tx.has_flag(0x0002_0000));
        assert!(!tx.has_flag(0x0001_0000));
        assert_eq!(tx.name(), "Payment");
    }
}
