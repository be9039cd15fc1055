//! Escrows: time- or condition-locked XRP and tokens.

use crate::config::MAX_AUTHORIZED_CREDENTIALS;
use crate::error::ValidationError;
use crate::transaction::base::validate_base_transaction;
use crate::transaction::fields::{optional_field, reject, required_field};
use crate::transaction::nested::{validate_credentials_list, CredentialList};
use crate::transaction::predicates::{
    is_account, is_amount, is_number, is_number_or_numeric_string, is_string,
};
use crate::transaction::record::TxRecord;

pub fn validate_escrow_cancel(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field(tx, "Owner", is_account)?;
    required_field(tx, "OfferSequence", is_number_or_numeric_string)?;
    Ok(())
}

pub fn validate_escrow_create(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field(tx, "Amount", is_amount)?;
    required_field(tx, "Destination", is_account)?;
    optional_field(tx, "DestinationTag", is_number)?;
    let cancel_after = optional_field(tx, "CancelAfter", is_number)?;
    let finish_after = optional_field(tx, "FinishAfter", is_number)?;
    let condition = optional_field(tx, "Condition", is_string)?;

    if cancel_after.is_none() && finish_after.is_none() {
        return reject(tx, "Either CancelAfter or FinishAfter must be specified");
    }
    if condition.is_none() && finish_after.is_none() {
        return reject(tx, "Either Condition or FinishAfter must be specified");
    }
    Ok(())
}

pub fn validate_escrow_finish(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field(tx, "Owner", is_account)?;
    required_field(tx, "OfferSequence", is_number_or_numeric_string)?;
    optional_field(tx, "Condition", is_string)?;
    optional_field(tx, "Fulfillment", is_string)?;
    validate_credentials_list(
        tx.get("CredentialIDs"),
        tx.name(),
        CredentialList::Ids,
        MAX_AUTHORIZED_CREDENTIALS,
    )
}
