//! Verifiable credentials: issue, accept, revoke.

use crate::config::MAX_CREDENTIAL_URI_LENGTH;
use crate::error::ValidationError;
use crate::transaction::base::validate_base_transaction;
use crate::transaction::fields::{optional_field, reject, required_field};
use crate::transaction::nested::validate_credential_type;
use crate::transaction::predicates::{is_account, is_hex, is_number};
use crate::transaction::record::TxRecord;

pub fn validate_credential_accept(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field(tx, "Issuer", is_account)?;
    validate_credential_type(tx)
}

pub fn validate_credential_create(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field(tx, "Subject", is_account)?;
    validate_credential_type(tx)?;
    optional_field(tx, "Expiration", is_number)?;

    let Some(uri) = tx.get("URI") else {
        return Ok(());
    };
    let Some(uri) = uri.as_str() else {
        return reject(tx, "URI must be a string");
    };
    if uri.is_empty() {
        return reject(tx, "URI cannot be an empty string");
    }
    if uri.len() > MAX_CREDENTIAL_URI_LENGTH {
        return reject(
            tx,
            format!("URI length must be <= {}", MAX_CREDENTIAL_URI_LENGTH),
        );
    }
    if !is_hex(uri) {
        return reject(tx, "URI must be encoded in hex");
    }
    Ok(())
}

pub fn validate_credential_delete(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    let subject = optional_field(tx, "Subject", is_account)?;
    let issuer = optional_field(tx, "Issuer", is_account)?;
    if subject.is_none() && issuer.is_none() {
        return reject(tx, "either `Issuer` or `Subject` must be provided");
    }
    validate_credential_type(tx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TransactionType;
    use serde_json::{json, Value};

    const ISSUER: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
    const SUBJECT: &str = "rfmDuhDyLGgx94qiwf3YF8BUV5j6KSvE8";

    fn create(value: Value) -> Result<(), ValidationError> {
        let map = value.as_object().cloned().unwrap_or_default();
        validate_credential_create(&TxRecord::new(TransactionType::CredentialCreate, &map, 0))
    }

    fn fixture() -> Value {
        json!({"Account": ISSUER, "Subject": SUBJECT, "CredentialType": "4B5943"})
    }

    #[test]
    fn uri_rules() {
        assert!(create(fixture()).is_ok());

        let mut empty = fixture();
        empty["URI"] = json!("");
        assert_eq!(
            create(empty).unwrap_err().to_string(),
            "CredentialCreate: URI cannot be an empty string"
        );

        let mut long = fixture();
        long["URI"] = json!("A".repeat(258));
        assert_eq!(
            create(long).unwrap_err().to_string(),
            "CredentialCreate: URI length must be <= 256"
        );

        let mut text = fixture();
        text["URI"] = json!("https://example.com");
        assert_eq!(
            create(text).unwrap_err().to_string(),
            "CredentialCreate: URI must be encoded in hex"
        );
    }

    #[test]
    fn delete_needs_a_party() {
        let value = json!({"Account": ISSUER, "CredentialType": "4B5943"});
        let map = value.as_object().cloned().unwrap_or_default();
        let err = validate_credential_delete(&TxRecord::new(TransactionType::CredentialDelete, &map, 0))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "CredentialDelete: either `Issuer` or `Subject` must be provided"
        );
    }
}
