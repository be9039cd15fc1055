//! Permissioned domains.

use crate::config::MAX_ACCEPTED_CREDENTIALS;
use crate::error::ValidationError;
use crate::transaction::base::validate_base_transaction;
use crate::transaction::fields::{optional_field, required_field};
use crate::transaction::nested::{validate_credentials_list, CredentialList};
use crate::transaction::predicates::{is_array, is_ledger_entry_id};
use crate::transaction::record::TxRecord;

pub fn validate_permissioned_domain_delete(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field(tx, "DomainID", is_ledger_entry_id)?;
    Ok(())
}

pub fn validate_permissioned_domain_set(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    optional_field(tx, "DomainID", is_ledger_entry_id)?;
    let accepted = required_field(tx, "AcceptedCredentials", is_array)?;
    validate_credentials_list(
        Some(accepted),
        tx.name(),
        CredentialList::Authorizations,
        MAX_ACCEPTED_CREDENTIALS,
    )
}
