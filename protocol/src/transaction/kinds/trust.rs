//! Trust lines and token clawback.

use crate::amount::Amount;
use crate::error::ValidationError;
use crate::transaction::base::validate_base_transaction;
use crate::transaction::fields::{optional_field, optional_field_or, reject, required_field_or};
use crate::transaction::predicates::{is_account, is_amount, is_clawback_amount, is_number};
use crate::transaction::record::TxRecord;

/// Clawback of an issued currency or an MPT balance.
///
/// The holder is named differently for the two token kinds: an MPT clawback
/// carries an explicit `Holder`, while an issued-currency clawback puts the
/// holder in `Amount.issuer` and must not carry `Holder` at all.
pub fn validate_clawback(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    let base = validate_base_transaction(tx)?;

    let amount = required_field_or(tx, "Amount", is_clawback_amount, "invalid Amount")?;
    let holder = optional_field(tx, "Holder", is_account)?.and_then(|holder| holder.as_str());

    match Amount::from_value(amount) {
        Some(Amount::Mpt { .. }) => match holder {
            None => reject(tx, "missing Holder"),
            Some(holder) if holder == base.account => reject(tx, "invalid holder Account"),
            Some(_) => Ok(()),
        },
        Some(Amount::Issued { issuer, .. }) => {
            if holder.is_some() {
                return reject(tx, "cannot have Holder for currency");
            }
            if issuer == base.account {
                return reject(tx, "invalid holder Account");
            }
            Ok(())
        }
        _ => reject(tx, "invalid Amount"),
    }
}

pub fn validate_trust_set(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field_or(tx, "LimitAmount", is_amount, "invalid LimitAmount")?;
    optional_field_or(tx, "QualityIn", is_number, "QualityIn must be a number")?;
    optional_field_or(tx, "QualityOut", is_number, "QualityOut must be a number")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TransactionType;
    use serde_json::{json, Value};

    const ISSUER: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
    const HOLDER: &str = "rfmDuhDyLGgx94qiwf3YF8BUV5j6KSvE8";
    const MPT_ID: &str = "000004C463C52827307480341125DA0577DEFC38405B0E3E";

    fn clawback(value: Value) -> Result<(), ValidationError> {
        let map = value.as_object().cloned().unwrap_or_default();
        validate_clawback(&TxRecord::new(TransactionType::Clawback, &map, 0))
    }

    #[test]
    fn issued_clawback_names_holder_in_amount() {
        let ok = json!({"Account": ISSUER, "Amount": {"currency": "USD", "issuer": HOLDER, "value": "10"}});
        assert!(clawback(ok).is_ok());

        let self_claw = json!({"Account": ISSUER, "Amount": {"currency": "USD", "issuer": ISSUER, "value": "10"}});
        assert_eq!(clawback(self_claw).unwrap_err().to_string(), "Clawback: invalid holder Account");

        let with_holder = json!({
            "Account": ISSUER,
            "Holder": HOLDER,
            "Amount": {"currency": "USD", "issuer": HOLDER, "value": "10"}
        });
        assert_eq!(
            clawback(with_holder).unwrap_err().to_string(),
            "Clawback: cannot have Holder for currency"
        );
    }

    #[test]
    fn mpt_clawback_requires_distinct_holder() {
        let amount = json!({"mpt_issuance_id": MPT_ID, "value": "10"});
        let missing = json!({"Account": ISSUER, "Amount": amount});
        assert_eq!(clawback(missing).unwrap_err().to_string(), "Clawback: missing Holder");

        let own = json!({"Account": ISSUER, "Holder": ISSUER, "Amount": amount});
        assert_eq!(clawback(own).unwrap_err().to_string(), "Clawback: invalid holder Account");

        let ok = json!({"Account": ISSUER, "Holder": HOLDER, "Amount": amount});
        assert!(clawback(ok).is_ok());
    }

    #[test]
    fn drops_cannot_be_clawed_back() {
        let drops = json!({"Account": ISSUER, "Amount": "100"});
        assert_eq!(clawback(drops).unwrap_err().to_string(), "Clawback: invalid Amount");
    }
}
