//! Order book offers.

use crate::error::ValidationError;
use crate::flags::TF_HYBRID;
use crate::transaction::base::validate_base_transaction;
use crate::transaction::fields::{
    optional_field, optional_field_or, reject, required_field, required_field_or,
};
use crate::transaction::predicates::{is_amount, is_ledger_entry_id, is_number};
use crate::transaction::record::TxRecord;

pub fn validate_offer_cancel(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field(tx, "OfferSequence", is_number)?;
    Ok(())
}

pub fn validate_offer_create(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    // Both sides are reported missing before either is shape-checked.
    for field in ["TakerGets", "TakerPays"] {
        if !tx.has(field) {
            return Err(ValidationError::missing(tx.name(), field));
        }
    }
    required_field_or(tx, "TakerGets", is_amount, "invalid TakerGets")?;
    required_field_or(tx, "TakerPays", is_amount, "invalid TakerPays")?;
    optional_field_or(tx, "Expiration", is_number, "invalid Expiration")?;
    optional_field_or(tx, "OfferSequence", is_number, "invalid OfferSequence")?;

    let domain = optional_field(tx, "DomainID", is_ledger_entry_id)?;
    if tx.has_flag(TF_HYBRID) && domain.is_none() {
        return reject(tx, "tfHybrid flag cannot be set if DomainID is not present");
    }
    Ok(())
}
