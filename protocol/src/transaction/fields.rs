//! Field combinators.
//!
//! `required_field` and `optional_field` look a field up on a record, run a
//! predicate, and produce the canonical message on failure. The `_or`
//! variants swap in a custom message for a present but invalid field.
//! `validate_required_field` and `validate_optional_field` work on any JSON
//! object and take a [`FieldSpec`] for nested objects and indexed array
//! elements, where the prefix or the reported name differ from the defaults.
//!
//! `null` counts as absent everywhere.

use std::fmt::Display;

use serde_json::{Map, Value};

use super::predicates::Predicate;
use super::record::TxRecord;
use crate::error::ValidationError;

/// How a failing field is reported.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec<'n> {
    /// Message prefix, usually the transaction type.
    pub tx_type: &'n str,
    /// Field name as shown to the caller.
    pub name: &'n str,
    /// Optional description appended as `, expected <description>`.
    pub expected: Option<&'static str>,
}

impl<'n> FieldSpec<'n> {
    pub fn new(tx_type: &'n str, name: &'n str) -> Self {
        Self {
            tx_type,
            name,
            expected: None,
        }
    }

    pub fn expecting(mut self, description: &'static str) -> Self {
        self.expected = Some(description);
        self
    }

    fn missing(&self) -> ValidationError {
        ValidationError::missing(self.tx_type, self.name)
    }

    fn invalid(&self) -> ValidationError {
        ValidationError::InvalidField {
            tx_type: self.tx_type.to_string(),
            field: self.name.to_string(),
            expected: self.expected,
        }
    }
}

fn lookup<'a>(object: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    object.get(field).filter(|value| !value.is_null())
}

/// Requires `field` in `object` and checks it against `check`.
pub fn validate_required_field<'a>(
    object: &'a Map<String, Value>,
    field: &str,
    check: Predicate,
    spec: FieldSpec<'_>,
) -> Result<&'a Value, ValidationError> {
    let value = lookup(object, field).ok_or_else(|| spec.missing())?;
    if check(value) {
        Ok(value)
    } else {
        Err(spec.invalid())
    }
}

/// Checks `field` in `object` against `check` when it is present.
pub fn validate_optional_field<'a>(
    object: &'a Map<String, Value>,
    field: &str,
    check: Predicate,
    spec: FieldSpec<'_>,
) -> Result<Option<&'a Value>, ValidationError> {
    match lookup(object, field) {
        Some(value) if check(value) => Ok(Some(value)),
        Some(_) => Err(spec.invalid()),
        None => Ok(None),
    }
}

/// Requires a top-level field of `tx`.
pub fn required_field<'a>(
    tx: &TxRecord<'a>,
    field: &str,
    check: Predicate,
) -> Result<&'a Value, ValidationError> {
    validate_required_field(tx.fields(), field, check, FieldSpec::new(tx.name(), field))
}

/// Checks a top-level field of `tx` when present.
pub fn optional_field<'a>(
    tx: &TxRecord<'a>,
    field: &str,
    check: Predicate,
) -> Result<Option<&'a Value>, ValidationError> {
    validate_optional_field(tx.fields(), field, check, FieldSpec::new(tx.name(), field))
}

/// Requires a top-level field, failing with a custom invalid message.
pub fn required_field_or<'a>(
    tx: &TxRecord<'a>,
    field: &str,
    check: Predicate,
    invalid: impl Display,
) -> Result<&'a Value, ValidationError> {
    let value = tx
        .get(field)
        .ok_or_else(|| ValidationError::missing(tx.name(), field))?;
    if check(value) {
        Ok(value)
    } else {
        reject(tx, invalid)
    }
}

/// Checks a top-level field when present, failing with a custom message.
pub fn optional_field_or<'a>(
    tx: &TxRecord<'a>,
    field: &str,
    check: Predicate,
    invalid: impl Display,
) -> Result<Option<&'a Value>, ValidationError> {
    match tx.get(field) {
        Some(value) if check(value) => Ok(Some(value)),
        Some(_) => reject(tx, invalid),
        None => Ok(None),
    }
}

/// Fails with `"<Type>: <message>"`.
pub fn reject<T>(tx: &TxRecord<'_>, message: impl Display) -> Result<T, ValidationError> {
    Err(ValidationError::rule(format!("{}: {}", tx.name(), message)))
}
