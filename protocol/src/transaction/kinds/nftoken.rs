//! Non-fungible tokens: minting, offers, burning and modification.

use serde_json::Value;

use crate::amount::parse_amount_value;
use crate::config::MAX_TRANSFER_FEE;
use crate::error::ValidationError;
use crate::flags::{TF_SELL_NFTOKEN, TF_TRANSFERABLE};
use crate::transaction::base::validate_base_transaction;
use crate::transaction::fields::{optional_field, reject, required_field, required_field_or};
use crate::transaction::predicates::{is_account, is_amount, is_array, is_hex, is_number, is_string};
use crate::transaction::record::TxRecord;

/// A URI must be non-empty hex when it is a string. Other shapes are left
/// to the field check that follows.
fn validate_uri(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    match tx.str("URI") {
        Some("") => reject(tx, "URI must not be empty string"),
        Some(uri) if !is_hex(uri) => reject(tx, "URI must be in hex format"),
        _ => Ok(()),
    }
}

pub fn validate_nftoken_accept_offer(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    if let Some(fee) = tx.get("NFTokenBrokerFee") {
        let value = parse_amount_value(fee);
        if value.is_nan() {
            return reject(tx, "invalid NFTokenBrokerFee");
        }
        if value <= 0.0 {
            return reject(
                tx,
                "NFTokenBrokerFee must be greater than 0; omit if there is no fee",
            );
        }
        if !tx.has("NFTokenSellOffer") || !tx.has("NFTokenBuyOffer") {
            return reject(
                tx,
                "both NFTokenSellOffer and NFTokenBuyOffer must be set if using brokered mode",
            );
        }
    }

    if !tx.has("NFTokenSellOffer") && !tx.has("NFTokenBuyOffer") {
        return reject(tx, "must set either NFTokenSellOffer or NFTokenBuyOffer");
    }
    optional_field(tx, "NFTokenSellOffer", is_string)?;
    optional_field(tx, "NFTokenBuyOffer", is_string)?;
    Ok(())
}

pub fn validate_nftoken_burn(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field(tx, "NFTokenID", is_string)?;
    optional_field(tx, "Owner", is_account)?;
    Ok(())
}

pub fn validate_nftoken_cancel_offer(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    let offers = required_field(tx, "NFTokenOffers", is_array)?;
    if offers.as_array().map_or(true, Vec::is_empty) {
        return reject(tx, "empty field NFTokenOffers");
    }
    Ok(())
}

pub fn validate_nftoken_create_offer(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    let base = validate_base_transaction(tx)?;

    if tx.str("Owner") == Some(base.account) {
        return reject(tx, "Owner and Account must not be equal");
    }
    if tx.str("Destination") == Some(base.account) {
        return reject(tx, "Destination and Account must not be equal");
    }
    optional_field(tx, "Destination", is_account)?;
    let owner = optional_field(tx, "Owner", is_account)?;
    required_field(tx, "NFTokenID", is_string)?;
    let amount = required_field_or(tx, "Amount", is_amount, "invalid Amount")?;
    optional_field(tx, "Expiration", is_number)?;

    if tx.has_flag(TF_SELL_NFTOKEN) {
        if owner.is_some() {
            return reject(tx, "Owner must not be present for sell offers");
        }
        return Ok(());
    }

    if owner.is_none() {
        return reject(tx, "Owner must be present for buy offers");
    }
    let value = parse_amount_value(amount);
    if value.is_nan() || value <= 0.0 {
        return reject(tx, "Amount must be greater than 0 for buy offers");
    }
    Ok(())
}

pub fn validate_nftoken_mint(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    let base = validate_base_transaction(tx)?;

    if tx.str("Issuer") == Some(base.account) {
        return reject(tx, "Issuer must not be equal to Account");
    }
    optional_field(tx, "Issuer", is_account)?;
    validate_uri(tx)?;
    optional_field(tx, "URI", is_string)?;
    required_field(tx, "NFTokenTaxon", is_number)?;

    if !tx.has("Amount") && (tx.has("Expiration") || tx.has("Destination")) {
        return reject(
            tx,
            "Amount is required when Expiration or Destination is present",
        );
    }
    optional_field(tx, "Amount", is_amount)?;
    optional_field(tx, "Expiration", is_number)?;
    optional_field(tx, "Destination", is_account)?;

    let Some(fee) = optional_field(tx, "TransferFee", is_number)?.and_then(Value::as_f64) else {
        return Ok(());
    };
    if !(0.0..=MAX_TRANSFER_FEE as f64).contains(&fee) {
        return reject(
            tx,
            format!("TransferFee must be between 0 and {}", MAX_TRANSFER_FEE),
        );
    }
    if !tx.has_flag(TF_TRANSFERABLE) {
        return reject(
            tx,
            "TransferFee cannot be provided without enabling tfTransferable flag",
        );
    }
    Ok(())
}

pub fn validate_nftoken_modify(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    let base = validate_base_transaction(tx)?;

    required_field(tx, "NFTokenID", is_string)?;
    if tx.str("Owner") == Some(base.account) {
        return reject(tx, "Owner and Account must not be equal");
    }
    optional_field(tx, "Owner", is_account)?;
    validate_uri(tx)?;
    optional_field(tx, "URI", is_string)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TransactionType;
    use serde_json::json;

    const ACCOUNT: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
    const OTHER: &str = "rfmDuhDyLGgx94qiwf3YF8BUV5j6KSvE8";
    const NFT: &str = "00090032B5F762798A53D543A014CAF8B297CFF8F2F937E844B17C9E00000003";

    fn run(
        tx_type: TransactionType,
        value: Value,
        flags: u32,
        validator: fn(&TxRecord<'_>) -> Result<(), ValidationError>,
    ) -> Result<(), ValidationError> {
        let map = value.as_object().cloned().unwrap_or_default();
        validator(&TxRecord::new(tx_type, &map, flags))
    }

    fn message(result: Result<(), ValidationError>) -> String {
        result.unwrap_err().to_string()
    }

    #[test]
    fn broker_fee_rules() {
        let zero = json!({
            "Account": ACCOUNT,
            "NFTokenSellOffer": NFT,
            "NFTokenBuyOffer": NFT,
            "NFTokenBrokerFee": "0",
        });
        assert_eq!(
            message(run(TransactionType::NFTokenAcceptOffer, zero, 0, validate_nftoken_accept_offer)),
            "NFTokenAcceptOffer: NFTokenBrokerFee must be greater than 0; omit if there is no fee"
        );

        for spelled in ["inf", "NaN", "infinity"] {
            let fee = json!({
                "Account": ACCOUNT,
                "NFTokenSellOffer": NFT,
                "NFTokenBuyOffer": NFT,
                "NFTokenBrokerFee": spelled,
            });
            assert_eq!(
                message(run(TransactionType::NFTokenAcceptOffer, fee, 0, validate_nftoken_accept_offer)),
                "NFTokenAcceptOffer: invalid NFTokenBrokerFee"
            );
        }

        let one_sided = json!({"Account": ACCOUNT, "NFTokenSellOffer": NFT, "NFTokenBrokerFee": "10"});
        assert_eq!(
            message(run(TransactionType::NFTokenAcceptOffer, one_sided, 0, validate_nftoken_accept_offer)),
            "NFTokenAcceptOffer: both NFTokenSellOffer and NFTokenBuyOffer must be set if using brokered mode"
        );

        let neither = json!({"Account": ACCOUNT});
        assert_eq!(
            message(run(TransactionType::NFTokenAcceptOffer, neither, 0, validate_nftoken_accept_offer)),
            "NFTokenAcceptOffer: must set either NFTokenSellOffer or NFTokenBuyOffer"
        );
    }

    #[test]
    fn buy_offer_needs_owner_and_positive_amount() {
        let tx = json!({"Account": ACCOUNT, "NFTokenID": NFT, "Amount": "1000"});
        assert_eq!(
            message(run(TransactionType::NFTokenCreateOffer, tx.clone(), 0, validate_nftoken_create_offer)),
            "NFTokenCreateOffer: Owner must be present for buy offers"
        );
        assert!(run(TransactionType::NFTokenCreateOffer, tx, TF_SELL_NFTOKEN, validate_nftoken_create_offer).is_ok());

        let free = json!({"Account": ACCOUNT, "Owner": OTHER, "NFTokenID": NFT, "Amount": "0"});
        assert_eq!(
            message(run(TransactionType::NFTokenCreateOffer, free, 0, validate_nftoken_create_offer)),
            "NFTokenCreateOffer: Amount must be greater than 0 for buy offers"
        );
    }

    #[test]
    fn mint_rules() {
        let own_issuer = json!({"Account": ACCOUNT, "Issuer": ACCOUNT, "NFTokenTaxon": 0});
        assert_eq!(
            message(run(TransactionType::NFTokenMint, own_issuer, 0, validate_nftoken_mint)),
            "NFTokenMint: Issuer must not be equal to Account"
        );

        let bad_uri = json!({"Account": ACCOUNT, "URI": "http://x", "NFTokenTaxon": 0});
        assert_eq!(
            message(run(TransactionType::NFTokenMint, bad_uri, 0, validate_nftoken_mint)),
            "NFTokenMint: URI must be in hex format"
        );

        let no_amount = json!({"Account": ACCOUNT, "NFTokenTaxon": 0, "Destination": OTHER});
        assert_eq!(
            message(run(TransactionType::NFTokenMint, no_amount, 0, validate_nftoken_mint)),
            "NFTokenMint: Amount is required when Expiration or Destination is present"
        );

        let fee = json!({"Account": ACCOUNT, "NFTokenTaxon": 0, "TransferFee": 500});
        assert_eq!(
            message(run(TransactionType::NFTokenMint, fee.clone(), 0, validate_nftoken_mint)),
            "NFTokenMint: TransferFee cannot be provided without enabling tfTransferable flag"
        );
        assert!(run(TransactionType::NFTokenMint, fee, TF_TRANSFERABLE, validate_nftoken_mint).is_ok());
    }

    #[test]
    fn cancel_offer_needs_entries() {
        let tx = json!({"Account": ACCOUNT, "NFTokenOffers": []});
        assert_eq!(
            message(run(TransactionType::NFTokenCancelOffer, tx, 0, validate_nftoken_cancel_offer)),
            "NFTokenCancelOffer: empty field NFTokenOffers"
        );
    }
}
