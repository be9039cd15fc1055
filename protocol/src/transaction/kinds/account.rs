//! Account management: settings, keys, signer lists, tickets, deletion,
//! deposit preauthorization and ledger repair.

use serde_json::Value;

use crate::config::{is_valid_tick_size, is_valid_ticket_count, MAX_AUTHORIZED_CREDENTIALS};
use crate::error::ValidationError;
use crate::flags::is_account_set_asf;
use crate::transaction::base::validate_base_transaction;
use crate::transaction::fields::{optional_field, optional_field_or, reject, required_field};
use crate::transaction::nested::{
    validate_credentials_list, validate_signer_entries, CredentialList,
};
use crate::transaction::predicates::{is_account, is_number, is_string};
use crate::transaction::record::TxRecord;

pub fn validate_account_delete(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field(tx, "Destination", is_account)?;
    optional_field(tx, "DestinationTag", is_number)?;
    validate_credentials_list(
        tx.get("CredentialIDs"),
        tx.name(),
        CredentialList::Ids,
        MAX_AUTHORIZED_CREDENTIALS,
    )
}

fn is_asf_flag(value: &Value) -> bool {
    value.as_u64().map_or(false, is_account_set_asf)
}

fn is_tick_size(value: &Value) -> bool {
    value.as_u64().map_or(false, is_valid_tick_size)
}

pub fn validate_account_set(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    optional_field_or(tx, "NFTokenMinter", is_account, "invalid NFTokenMinter")?;
    optional_field_or(tx, "ClearFlag", is_asf_flag, "invalid ClearFlag")?;
    optional_field_or(tx, "Domain", is_string, "invalid Domain")?;
    optional_field_or(tx, "EmailHash", is_string, "invalid EmailHash")?;
    optional_field_or(tx, "MessageKey", is_string, "invalid MessageKey")?;
    optional_field_or(tx, "SetFlag", is_asf_flag, "invalid SetFlag")?;
    optional_field_or(tx, "TransferRate", is_number, "invalid TransferRate")?;
    optional_field_or(tx, "TickSize", is_tick_size, "invalid TickSize")?;
    Ok(())
}

pub fn validate_set_regular_key(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    optional_field(tx, "RegularKey", is_account)?;
    Ok(())
}

pub fn validate_signer_list_set(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    let quorum = required_field(tx, "SignerQuorum", is_number)?;

    // A zero quorum deletes the list.
    if quorum.as_f64() == Some(0.0) {
        if tx.has("SignerEntries") {
            return reject(
                tx,
                "SignerEntries must be empty when SignerQuorum is 0 to delete a signer list",
            );
        }
        return Ok(());
    }

    let entries = tx
        .get("SignerEntries")
        .ok_or_else(|| ValidationError::missing(tx.name(), "SignerEntries"))?;
    validate_signer_entries(tx, entries)
}

pub fn validate_ticket_create(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    let count = required_field(tx, "TicketCount", is_number)?;
    if !count.as_u64().map_or(false, is_valid_ticket_count) {
        return reject(tx, "TicketCount must be an integer from 1 to 250");
    }
    Ok(())
}

pub fn validate_deposit_preauth(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    let base = validate_base_transaction(tx)?;

    let present = ["Authorize", "Unauthorize", "AuthorizeCredentials", "UnauthorizeCredentials"]
        .iter()
        .filter(|field| tx.has(field))
        .count();
    if present != 1 {
        return reject(
            tx,
            "Requires exactly one field of the following: Authorize, Unauthorize, AuthorizeCredentials, UnauthorizeCredentials.",
        );
    }

    if let Some(authorize) = optional_field(tx, "Authorize", is_account)? {
        if authorize.as_str() == Some(base.account) {
            return reject(tx, "Account can't preauthorize its own address");
        }
    }
    if let Some(unauthorize) = optional_field(tx, "Unauthorize", is_account)? {
        if unauthorize.as_str() == Some(base.account) {
            return reject(tx, "Account can't unauthorize its own address");
        }
    }

    for field in ["AuthorizeCredentials", "UnauthorizeCredentials"] {
        validate_credentials_list(
            tx.get(field),
            tx.name(),
            CredentialList::Authorizations,
            MAX_AUTHORIZED_CREDENTIALS,
        )?;
    }
    Ok(())
}

pub fn validate_ledger_state_fix(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field(tx, "LedgerFixType", is_number)?;
    optional_field(tx, "Owner", is_account)?;
    Ok(())
}
