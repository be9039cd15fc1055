//! Decentralized identifiers.

use crate::error::ValidationError;
use crate::transaction::base::validate_base_transaction;
use crate::transaction::fields::{optional_field, reject};
use crate::transaction::predicates::is_string;
use crate::transaction::record::TxRecord;

pub fn validate_did_delete(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;
    Ok(())
}

pub fn validate_did_set(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    let mut present = 0;
    for field in ["Data", "DIDDocument", "URI"] {
        if optional_field(tx, field, is_string)?.is_some() {
            present += 1;
        }
    }
    if present == 0 {
        return reject(tx, "Must have at least one of `Data`, `DIDDocument`, and `URI`");
    }
    Ok(())
}
