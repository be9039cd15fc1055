//! Single-asset vaults.

use crate::config::{MAX_MPT_META_BYTE_LENGTH, VAULT_DATA_MAX_BYTE_LENGTH};
use crate::error::ValidationError;
use crate::flags::TF_VAULT_PRIVATE;
use crate::metadata::report_mpt_metadata;
use crate::transaction::base::validate_base_transaction;
use crate::transaction::fields::{optional_field, reject, required_field};
use crate::transaction::predicates::{
    is_account, is_amount, is_clawback_amount, is_currency, is_hex, is_ledger_entry_id, is_number,
    is_string, is_xrpl_number,
};
use crate::transaction::record::TxRecord;

/// Hex length in bytes. Odd lengths give a fractional count, reported as is.
fn byte_length(hex: &str) -> f64 {
    hex.len() as f64 / 2.0
}

fn validate_data(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    let Some(data) = optional_field(tx, "Data", is_string)?.and_then(|value| value.as_str()) else {
        return Ok(());
    };
    if !is_hex(data) {
        return reject(tx, "Data must be a valid hex string");
    }
    let bytes = byte_length(data);
    if bytes > VAULT_DATA_MAX_BYTE_LENGTH as f64 {
        return reject(
            tx,
            format!(
                "Data exceeds {} bytes (actual: {})",
                VAULT_DATA_MAX_BYTE_LENGTH, bytes
            ),
        );
    }
    Ok(())
}

pub fn validate_vault_clawback(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field(tx, "VaultID", is_ledger_entry_id)?;
    required_field(tx, "Holder", is_account)?;
    optional_field(tx, "Amount", is_clawback_amount)?;
    Ok(())
}

/// Vault creation. `MPTokenMetadata` describes the vault's share token and
/// is linted like an issuance's metadata; findings go to `advisories`.
pub fn validate_vault_create(
    tx: &TxRecord<'_>,
    advisories: &mut Vec<String>,
) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field(tx, "Asset", is_currency)?;
    optional_field(tx, "Data", is_string)?;
    optional_field(tx, "AssetsMaximum", is_xrpl_number)?;
    let metadata = optional_field(tx, "MPTokenMetadata", is_string)?.and_then(|value| value.as_str());
    optional_field(tx, "WithdrawalPolicy", is_number)?;
    let domain = optional_field(tx, "DomainID", is_string)?;

    validate_data(tx)?;

    if let Some(metadata) = metadata {
        if !is_hex(metadata) {
            return reject(tx, "MPTokenMetadata must be a valid non-empty hex string");
        }
        let bytes = byte_length(metadata);
        if bytes > MAX_MPT_META_BYTE_LENGTH as f64 {
            return reject(
                tx,
                format!(
                    "MPTokenMetadata exceeds {} bytes (actual: {})",
                    MAX_MPT_META_BYTE_LENGTH, bytes
                ),
            );
        }
    }

    if domain.is_some() && !tx.has_flag(TF_VAULT_PRIVATE) {
        return reject(tx, "Cannot set DomainID unless tfVaultPrivate flag is set.");
    }

    if let Some(metadata) = metadata {
        report_mpt_metadata(tx.name(), metadata, advisories);
    }
    Ok(())
}

pub fn validate_vault_delete(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field(tx, "VaultID", is_ledger_entry_id)?;
    Ok(())
}

pub fn validate_vault_deposit(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field(tx, "VaultID", is_ledger_entry_id)?;
    required_field(tx, "Amount", is_amount)?;
    Ok(())
}

pub fn validate_vault_set(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field(tx, "VaultID", is_ledger_entry_id)?;
    validate_data(tx)?;
    optional_field(tx, "AssetsMaximum", is_xrpl_number)?;
    optional_field(tx, "DomainID", is_ledger_entry_id)?;
    Ok(())
}

pub fn validate_vault_withdraw(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field(tx, "VaultID", is_ledger_entry_id)?;
    required_field(tx, "Amount", is_amount)?;
    optional_field(tx, "Destination", is_account)?;
    optional_field(tx, "DestinationTag", is_number)?;
    Ok(())
}
