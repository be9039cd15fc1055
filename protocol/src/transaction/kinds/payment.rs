//! Direct and cross-currency payments.

use crate::amount::amounts_equal;
use crate::config::MAX_AUTHORIZED_CREDENTIALS;
use crate::error::ValidationError;
use crate::flags::TF_PARTIAL_PAYMENT;
use crate::transaction::base::validate_base_transaction;
use crate::transaction::fields::{optional_field, optional_field_or, required_field, required_field_or};
use crate::transaction::nested::{is_paths, validate_credentials_list, CredentialList};
use crate::transaction::predicates::{
    is_account, is_amount, is_ledger_entry_id, is_number, is_string,
};
use crate::transaction::record::TxRecord;

/// Payment errors read "PaymentTransaction: ..." rather than "Payment: ...".
const PAYMENT_PREFIX: &str = "PaymentTransaction";

fn fail<T>(message: &str) -> Result<T, ValidationError> {
    Err(ValidationError::rule(format!("{}: {}", PAYMENT_PREFIX, message)))
}

pub fn validate_payment(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    let Some(amount) = tx.get("Amount") else {
        return Err(ValidationError::missing(PAYMENT_PREFIX, "Amount"));
    };
    if !is_amount(amount) {
        return fail("invalid Amount");
    }

    required_field(tx, "Destination", is_account)?;
    optional_field(tx, "DestinationTag", is_number)?;
    validate_credentials_list(
        tx.get("CredentialIDs"),
        tx.name(),
        CredentialList::Ids,
        MAX_AUTHORIZED_CREDENTIALS,
    )?;

    if tx.get("InvoiceID").map_or(false, |id| !is_string(id)) {
        return fail("InvoiceID must be a string");
    }
    if tx.get("Paths").map_or(false, |paths| !is_paths(paths)) {
        return fail("invalid Paths");
    }
    if tx.get("SendMax").map_or(false, |send_max| !is_amount(send_max)) {
        return fail("invalid SendMax");
    }

    if let Some(deliver_max) = tx.get("DeliverMax") {
        if !is_amount(deliver_max) {
            return fail("invalid DeliverMax");
        }
        if !amounts_equal(amount, deliver_max) {
            return fail("Amount and DeliverMax fields must be identical when both are provided");
        }
    }

    if let Some(deliver_min) = tx.get("DeliverMin") {
        if !tx.has_flag(TF_PARTIAL_PAYMENT) {
            return fail("tfPartialPayment flag required with DeliverMin");
        }
        if !is_amount(deliver_min) {
            return fail("invalid DeliverMin");
        }
    }

    optional_field(tx, "DomainID", is_ledger_entry_id)?;
    Ok(())
}

pub fn validate_payment_channel_claim(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field_or(tx, "Channel", is_string, "Channel must be a string")?;
    for field in ["Balance", "Amount", "Signature", "PublicKey"] {
        optional_field_or(tx, field, is_string, format!("{} must be a string", field))?;
    }
    validate_credentials_list(
        tx.get("CredentialIDs"),
        tx.name(),
        CredentialList::Ids,
        MAX_AUTHORIZED_CREDENTIALS,
    )
}

pub fn validate_payment_channel_create(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field_or(tx, "Amount", is_string, "Amount must be a string")?;
    required_field_or(tx, "Destination", is_string, "Destination must be a string")?;
    required_field(tx, "Destination", is_account)?;
    required_field_or(tx, "SettleDelay", is_number, "SettleDelay must be a number")?;
    required_field_or(tx, "PublicKey", is_string, "PublicKey must be a string")?;
    optional_field_or(tx, "CancelAfter", is_number, "CancelAfter must be a number")?;
    optional_field_or(tx, "DestinationTag", is_number, "DestinationTag must be a number")?;
    Ok(())
}

pub fn validate_payment_channel_fund(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field_or(tx, "Channel", is_string, "Channel must be a string")?;
    required_field_or(tx, "Amount", is_string, "Amount must be a string")?;
    optional_field_or(tx, "Expiration", is_number, "Expiration must be a number")?;
    Ok(())
}
