//! Multi-purpose tokens: issuance lifecycle and holder authorization.

use crate::config::{MAX_MPT_AMOUNT, MAX_TRANSFER_FEE};
use crate::error::ValidationError;
use crate::flags::{TF_MPT_CAN_TRANSFER, TF_MPT_LOCK, TF_MPT_UNLOCK};
use crate::metadata::report_mpt_metadata;
use crate::transaction::base::validate_base_transaction;
use crate::transaction::fields::{optional_field, reject, required_field};
use crate::transaction::predicates::{is_account, is_hex, is_number, is_string};
use crate::transaction::record::TxRecord;

pub fn validate_mptoken_authorize(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field(tx, "MPTokenIssuanceID", is_string)?;
    optional_field(tx, "Holder", is_account)?;
    Ok(())
}

/// Issuance creation. Metadata that does not follow XLS-89 is accepted;
/// the findings are logged and appended to `advisories`.
pub fn validate_mptoken_issuance_create(
    tx: &TxRecord<'_>,
    advisories: &mut Vec<String>,
) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    let maximum = optional_field(tx, "MaximumAmount", is_string)?;
    let metadata = optional_field(tx, "MPTokenMetadata", is_string)?;
    let transfer_fee = optional_field(tx, "TransferFee", is_number)?;
    optional_field(tx, "AssetScale", is_number)?;

    let metadata = metadata.and_then(|value| value.as_str());
    if metadata == Some("") {
        return reject(tx, "MPTokenMetadata must not be empty string");
    }
    if metadata.map_or(false, |hex| !is_hex(hex)) {
        return reject(tx, "MPTokenMetadata must be in hex format");
    }

    if let Some(maximum) = maximum.and_then(|value| value.as_str()) {
        if maximum.is_empty() || !maximum.bytes().all(|b| b.is_ascii_digit()) {
            return reject(tx, "Invalid MaximumAmount");
        }
        // All digits, so a failed parse can only mean overflow.
        let in_range = maximum
            .parse::<u64>()
            .map_or(false, |amount| amount <= MAX_MPT_AMOUNT);
        if !in_range {
            return reject(tx, "MaximumAmount out of range");
        }
    }

    if let Some(fee) = transfer_fee.and_then(|value| value.as_f64()) {
        if !(0.0..=MAX_TRANSFER_FEE as f64).contains(&fee) {
            return reject(
                tx,
                format!("TransferFee must be between 0 and {}", MAX_TRANSFER_FEE),
            );
        }
        if fee != 0.0 && !tx.has_flag(TF_MPT_CAN_TRANSFER) {
            return reject(
                tx,
                "TransferFee cannot be provided without enabling tfMPTCanTransfer flag",
            );
        }
    }

    if let Some(metadata) = metadata {
        report_mpt_metadata(tx.name(), metadata, advisories);
    }
    Ok(())
}

pub fn validate_mptoken_issuance_destroy(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field(tx, "MPTokenIssuanceID", is_string)?;
    Ok(())
}

pub fn validate_mptoken_issuance_set(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field(tx, "MPTokenIssuanceID", is_string)?;
    optional_field(tx, "Holder", is_account)?;
    if tx.has_flag(TF_MPT_LOCK) && tx.has_flag(TF_MPT_UNLOCK) {
        return reject(tx, "flag conflict");
    }
    Ok(())
}
