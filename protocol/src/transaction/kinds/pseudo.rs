//! Pseudo-transactions.
//!
//! These are produced by validators during consensus rather than signed by
//! an account. They still arrive through the same dispatcher (ledger
//! history, streams) so they get the same structural checks.

use crate::error::ValidationError;
use crate::transaction::base::validate_base_transaction;
use crate::transaction::fields::{reject, required_field};
use crate::transaction::predicates::{
    is_hex_string, is_ledger_entry_id, is_number, is_string, is_zero_or_one, Predicate,
};
use crate::transaction::record::TxRecord;

/// Fee fields before the XRPFees amendment.
const LEGACY_FEE_FIELDS: [(&str, Predicate); 4] = [
    ("BaseFee", is_string),
    ("ReferenceFeeUnits", is_number),
    ("ReserveBase", is_number),
    ("ReserveIncrement", is_number),
];

/// Fee fields after the XRPFees amendment, all in drops.
const DROPS_FEE_FIELDS: [&str; 3] = ["BaseFeeDrops", "ReserveBaseDrops", "ReserveIncrementDrops"];

pub fn validate_enable_amendment(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field(tx, "Amendment", is_ledger_entry_id)?;
    required_field(tx, "LedgerSequence", is_number)?;
    Ok(())
}

pub fn validate_set_fee(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    if DROPS_FEE_FIELDS.iter().any(|field| tx.has(field)) {
        for field in DROPS_FEE_FIELDS {
            required_field(tx, field, is_string)?;
        }
        return Ok(());
    }
    if LEGACY_FEE_FIELDS.iter().any(|(field, _)| tx.has(field)) {
        for (field, check) in LEGACY_FEE_FIELDS {
            required_field(tx, field, check)?;
        }
        return Ok(());
    }
    reject(tx, "must carry either the legacy fee fields or the drops fee fields")
}

pub fn validate_unl_modify(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field(tx, "LedgerSequence", is_number)?;
    required_field(tx, "UNLModifyDisabling", is_zero_or_one)?;
    required_field(tx, "UNLModifyValidator", is_hex_string)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TransactionType;
    use serde_json::{json, Value};

    const ZERO_ACCOUNT: &str = "rrrrrrrrrrrrrrrrrrrrrhoLvTp";

    fn set_fee(value: Value) -> Result<(), ValidationError> {
        let map = value.as_object().cloned().unwrap_or_default();
        validate_set_fee(&TxRecord::new(TransactionType::SetFee, &map, 0))
    }

    #[test]
    fn fee_field_sets() {
        let drops = json!({
            "Account": ZERO_ACCOUNT,
            "BaseFeeDrops": "10",
            "ReserveBaseDrops": "1000000",
            "ReserveIncrementDrops": "200000",
        });
        assert!(set_fee(drops).is_ok());

        let legacy = json!({
            "Account": ZERO_ACCOUNT,
            "BaseFee": "000000000000000A",
            "ReferenceFeeUnits": 10,
            "ReserveBase": 20000000,
            "ReserveIncrement": 5000000,
        });
        assert!(set_fee(legacy).is_ok());

        let partial = json!({"Account": ZERO_ACCOUNT, "BaseFeeDrops": "10"});
        assert_eq!(
            set_fee(partial).unwrap_err().to_string(),
            "SetFee: missing field ReserveBaseDrops"
        );

        assert_eq!(
            set_fee(json!({"Account": ZERO_ACCOUNT})).unwrap_err().to_string(),
            "SetFee: must carry either the legacy fee fields or the drops fee fields"
        );
    }
}
