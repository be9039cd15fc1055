//! Batch transactions.
//!
//! The checks here are structural only. Each inner transaction is a complete
//! transaction in its own right and is validated by the dispatcher, which
//! re-enters itself once per entry after this validator succeeds.

use serde_json::Value;

use crate::error::ValidationError;
use crate::flags::{convert_tx_flags_to_number, is_flag_enabled, TF_INNER_BATCH_TXN};
use crate::transaction::base::validate_base_transaction;
use crate::transaction::fields::{
    optional_field, reject, required_field, validate_optional_field, validate_required_field,
    FieldSpec,
};
use crate::transaction::predicates::{is_array, is_record, is_string};
use crate::transaction::record::TxRecord;
use crate::transaction::TransactionType;

pub fn validate_batch(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    let raw_transactions = required_field(tx, "RawTransactions", is_array)?;
    for (index, entry) in raw_transactions.as_array().into_iter().flatten().enumerate() {
        let Some(entry) = entry.as_object() else {
            return reject(tx, format!("RawTransactions[{}] is not object", index));
        };

        let name = format!("RawTransactions[{}].RawTransaction", index);
        let spec = FieldSpec::new(tx.name(), &name);
        let inner = validate_required_field(entry, "RawTransaction", is_record, spec)?;

        let inner_type = inner.get("TransactionType").and_then(Value::as_str);
        if inner_type == Some(TransactionType::Batch.as_str()) {
            return reject(
                tx,
                format!(
                    "RawTransactions[{}] is a Batch transaction. Cannot nest Batch transactions.",
                    index
                ),
            );
        }

        let inner_flags = convert_tx_flags_to_number(inner)?;
        if !is_flag_enabled(inner_flags, TF_INNER_BATCH_TXN) {
            return reject(
                tx,
                format!("RawTransactions[{}] must contain the `tfInnerBatchTxn` flag.", index),
            );
        }
    }

    let Some(signers) = optional_field(tx, "BatchSigners", is_array)? else {
        return Ok(());
    };
    for (index, entry) in signers.as_array().into_iter().flatten().enumerate() {
        let Some(entry) = entry.as_object() else {
            return reject(tx, format!("BatchSigners[{}] is not object.", index));
        };

        let name = format!("BatchSigners[{}].BatchSigner", index);
        let spec = FieldSpec::new(tx.name(), &name);
        let Some(signer) = validate_required_field(entry, "BatchSigner", is_record, spec)?.as_object()
        else {
            return Err(ValidationError::invalid(tx.name(), name));
        };

        let account = format!("BatchSigners[{}].Account", index);
        validate_required_field(signer, "Account", is_string, FieldSpec::new(tx.name(), &account))?;
        for field in ["SigningPubKey", "TxnSignature"] {
            let name = format!("BatchSigners[{}].{}", index, field);
            validate_optional_field(signer, field, is_string, FieldSpec::new(tx.name(), &name))?;
        }
    }
    Ok(())
}

/// The inner transaction records of a structurally valid batch.
pub fn inner_transactions<'a>(tx: &TxRecord<'a>) -> impl Iterator<Item = &'a Value> {
    tx.get("RawTransactions")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|entry| entry.get("RawTransaction"))
}
