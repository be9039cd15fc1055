//! Checks: deferred payments the destination may cash later.

use crate::error::ValidationError;
use crate::transaction::base::validate_base_transaction;
use crate::transaction::fields::{optional_field, reject, required_field};
use crate::transaction::predicates::{is_account, is_amount, is_number, is_string};
use crate::transaction::record::TxRecord;

pub fn validate_check_cancel(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field(tx, "CheckID", is_string)?;
    Ok(())
}

pub fn validate_check_cash(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field(tx, "CheckID", is_string)?;

    match (tx.has("Amount"), tx.has("DeliverMin")) {
        (false, false) => return reject(tx, "must have either Amount or DeliverMin"),
        (true, true) => return reject(tx, "cannot have both Amount and DeliverMin"),
        _ => {}
    }
    optional_field(tx, "Amount", is_amount)?;
    optional_field(tx, "DeliverMin", is_amount)?;
    Ok(())
}

pub fn validate_check_create(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field(tx, "Destination", is_account)?;
    required_field(tx, "SendMax", is_amount)?;
    optional_field(tx, "DestinationTag", is_number)?;
    optional_field(tx, "Expiration", is_number)?;
    optional_field(tx, "InvoiceID", is_string)?;
    Ok(())
}
