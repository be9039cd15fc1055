//! Permission delegation.

use crate::error::ValidationError;
use crate::transaction::base::validate_base_transaction;
use crate::transaction::fields::{reject, required_field};
use crate::transaction::nested::validate_permissions;
use crate::transaction::predicates::{is_account, is_array};
use crate::transaction::record::TxRecord;

pub fn validate_delegate_set(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    let base = validate_base_transaction(tx)?;

    let authorize = required_field(tx, "Authorize", is_account)?;
    if authorize.as_str() == Some(base.account) {
        return reject(tx, "Authorize and Account must be different.");
    }

    let permissions = required_field(tx, "Permissions", is_array)?;
    validate_permissions(tx, permissions)
}
