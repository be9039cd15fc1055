//! Automated market maker transactions.
//!
//! Every AMM transaction names its pool by the two assets it trades. Trading
//! fees are in units of 1/100,000, capped at 1%.

use crate::amount::{Amount, Issue};
use crate::config::AMM_MAX_TRADING_FEE;
use crate::error::ValidationError;
use crate::transaction::base::validate_base_transaction;
use crate::transaction::fields::{optional_field_or, reject, required_field, required_field_or};
use crate::transaction::nested::validate_auth_accounts;
use crate::transaction::predicates::{
    is_account, is_amount, is_clawback_amount, is_currency, is_issued_currency_amount, is_number,
};
use crate::transaction::record::TxRecord;

/// `Asset` and `Asset2`, each reported as "must be a `noun`" when malformed.
fn validate_pool_assets(tx: &TxRecord<'_>, noun: &str) -> Result<(), ValidationError> {
    for field in ["Asset", "Asset2"] {
        required_field_or(tx, field, is_currency, format!("{} must be a {}", field, noun))?;
    }
    Ok(())
}

fn validate_trading_fee(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    let fee = required_field_or(tx, "TradingFee", is_number, "TradingFee must be a number")?;
    let fee = fee.as_f64().unwrap_or(f64::NAN);
    if !(0.0..=AMM_MAX_TRADING_FEE as f64).contains(&fee) {
        return reject(
            tx,
            format!("TradingFee must be between 0 and {}", AMM_MAX_TRADING_FEE),
        );
    }
    Ok(())
}

/// The pairing rules shared by deposits and withdrawals.
fn validate_amount_pairing(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    if tx.has("Amount2") && !tx.has("Amount") {
        return reject(tx, "must set Amount with Amount2");
    }
    if tx.has("EPrice") && !tx.has("Amount") {
        return reject(tx, "must set Amount with EPrice");
    }
    Ok(())
}

fn validate_optional_amounts(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    for field in ["Amount", "Amount2", "EPrice"] {
        optional_field_or(tx, field, is_amount, format!("{} must be an Amount", field))?;
    }
    Ok(())
}

pub fn validate_amm_bid(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    let base = validate_base_transaction(tx)?;

    validate_pool_assets(tx, "Currency")?;
    for field in ["BidMin", "BidMax"] {
        optional_field_or(tx, field, is_amount, format!("{} must be an Amount", field))?;
    }
    if let Some(auth_accounts) = tx.get("AuthAccounts") {
        validate_auth_accounts(tx, base.account, auth_accounts)?;
    }
    Ok(())
}

pub fn validate_amm_clawback(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    let base = validate_base_transaction(tx)?;

    let holder = required_field(tx, "Holder", is_account)?;
    let asset = required_field(tx, "Asset", is_currency)?;
    let asset = Issue::from_value(asset);

    if let Some(Issue::Issued { issuer, .. }) = asset {
        if holder.as_str() == Some(issuer) {
            return reject(tx, "Holder and Asset.issuer must be distinct");
        }
        if base.account != issuer {
            return reject(tx, "Account must be the same as Asset.issuer");
        }
    }

    required_field(tx, "Asset2", is_currency)?;

    let Some(amount) = tx.get("Amount") else {
        return Ok(());
    };
    if !is_clawback_amount(amount) {
        return Err(ValidationError::invalid(tx.name(), "Amount"));
    }

    match (Amount::from_value(amount), asset) {
        (
            Some(Amount::Issued {
                currency, issuer, ..
            }),
            Some(Issue::Issued {
                currency: asset_currency,
                issuer: asset_issuer,
            }),
        ) => {
            if currency != asset_currency {
                return reject(tx, "Amount.currency must match Asset.currency");
            }
            if issuer != asset_issuer {
                return reject(tx, "Amount.issuer must match Asset.issuer");
            }
        }
        (
            Some(Amount::Mpt {
                mpt_issuance_id, ..
            }),
            Some(Issue::Mpt {
                mpt_issuance_id: asset_id,
            }),
        ) if mpt_issuance_id != asset_id => {
            return reject(tx, "Amount.mpt_issuance_id must match Asset.mpt_issuance_id");
        }
        _ => {}
    }
    Ok(())
}

pub fn validate_amm_create(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    for field in ["Amount", "Amount2"] {
        required_field_or(tx, field, is_amount, format!("{} must be an Amount", field))?;
    }
    validate_trading_fee(tx)
}

pub fn validate_amm_delete(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    validate_pool_assets(tx, "Currency")
}

pub fn validate_amm_deposit(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    validate_pool_assets(tx, "Issue")?;
    validate_amount_pairing(tx)?;
    if !tx.has("LPTokenOut") && !tx.has("Amount") {
        return reject(tx, "must set at least LPTokenOut or Amount");
    }
    optional_field_or(
        tx,
        "LPTokenOut",
        is_issued_currency_amount,
        "LPTokenOut must be an IssuedCurrencyAmount",
    )?;
    validate_optional_amounts(tx)
}

pub fn validate_amm_vote(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    validate_pool_assets(tx, "Currency")?;
    validate_trading_fee(tx)
}

pub fn validate_amm_withdraw(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    validate_pool_assets(tx, "Issue")?;
    validate_amount_pairing(tx)?;
    optional_field_or(
        tx,
        "LPTokenIn",
        is_issued_currency_amount,
        "LPTokenIn must be an IssuedCurrencyAmount",
    )?;
    validate_optional_amounts(tx)
}
