//! Fee and reserve sponsorship.

use crate::error::ValidationError;
use crate::flags::TF_DELETE_OBJECT;
use crate::transaction::base::validate_base_transaction;
use crate::transaction::fields::{optional_field, reject};
use crate::transaction::predicates::{is_account, is_number, is_string};
use crate::transaction::record::TxRecord;

pub fn validate_sponsorship_set(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    match (tx.has("Sponsor"), tx.has("Sponsee")) {
        (true, true) => return reject(tx, "cannot specify both Sponsor and Sponsee"),
        (false, false) => return reject(tx, "must specify either Sponsor or Sponsee"),
        _ => {}
    }
    optional_field(tx, "Sponsor", is_account)?;
    optional_field(tx, "Sponsee", is_account)?;
    optional_field(tx, "FeeAmount", is_string)?;
    optional_field(tx, "MaxFee", is_string)?;
    optional_field(tx, "ReserveCount", is_number)?;

    if tx.has_flag(TF_DELETE_OBJECT) {
        for field in ["FeeAmount", "MaxFee", "ReserveCount"] {
            if tx.has(field) {
                return reject(tx, format!("{} cannot be specified with tfDeleteObject", field));
            }
        }
    }
    Ok(())
}
