//! Price oracles.

use crate::error::ValidationError;
use crate::transaction::base::validate_base_transaction;
use crate::transaction::fields::{optional_field, required_field};
use crate::transaction::nested::validate_price_data_series;
use crate::transaction::predicates::{is_number, is_string};
use crate::transaction::record::TxRecord;

pub fn validate_oracle_delete(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field(tx, "OracleDocumentID", is_number)?;
    Ok(())
}

pub fn validate_oracle_set(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field(tx, "OracleDocumentID", is_number)?;
    required_field(tx, "LastUpdateTime", is_number)?;
    if let Some(series) = tx.get("PriceDataSeries") {
        validate_price_data_series(tx, series)?;
    }
    for field in ["Provider", "URI", "AssetClass"] {
        optional_field(tx, field, is_string)?;
    }
    Ok(())
}
