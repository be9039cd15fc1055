//! Hook installation.

use crate::error::ValidationError;
use crate::transaction::base::validate_base_transaction;
use crate::transaction::nested::validate_hooks;
use crate::transaction::record::TxRecord;

pub fn validate_set_hook(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    let hooks = tx
        .get("Hooks")
        .ok_or_else(|| ValidationError::missing(tx.name(), "Hooks"))?;
    validate_hooks(tx, hooks)
}
