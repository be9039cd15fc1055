//! Lending: loan brokers, their first-loss cover, and the loans themselves.
//!
//! Rates are in units of 1/10 basis point (100,000 is 100%), except the
//! broker management fee, which is capped at 10%.

use serde_json::Value;

use crate::amount::{Amount, DecimalValue};
use crate::config::{
    MAX_COVER_RATE, MAX_LOAN_DATA_LENGTH, MAX_LOAN_RATE, MAX_MANAGEMENT_FEE_RATE,
    MIN_PAYMENT_INTERVAL,
};
use crate::error::ValidationError;
use crate::flags::{
    TF_LOAN_FULL_PAYMENT, TF_LOAN_IMPAIR, TF_LOAN_LATE_PAYMENT, TF_LOAN_OVERPAYMENT,
    TF_LOAN_UNIMPAIR,
};
use crate::transaction::base::validate_base_transaction;
use crate::transaction::fields::{optional_field, reject, required_field};
use crate::transaction::predicates::{
    is_account, is_amount, is_clawback_amount, is_hex_metadata, is_ledger_entry_id, is_number,
    is_record, is_string, is_xrpl_number,
};
use crate::transaction::record::TxRecord;

/// Loan ledger ids are 64 hex characters.
fn validate_ledger_id(
    tx: &TxRecord<'_>,
    field: &str,
    value: Option<&Value>,
) -> Result<(), ValidationError> {
    match value {
        Some(value) if !is_ledger_entry_id(value) => reject(
            tx,
            format!("{} must be 64 characters hexadecimal string", field),
        ),
        _ => Ok(()),
    }
}

fn require_ledger_id(tx: &TxRecord<'_>, field: &str) -> Result<(), ValidationError> {
    let value = required_field(tx, field, is_string)?;
    validate_ledger_id(tx, field, Some(value))
}

fn validate_data(tx: &TxRecord<'_>, data: Option<&Value>) -> Result<(), ValidationError> {
    match data {
        Some(data) if !is_hex_metadata(data, MAX_LOAN_DATA_LENGTH) => reject(
            tx,
            format!(
                "Data must be a valid non-empty hex string up to {} characters",
                MAX_LOAN_DATA_LENGTH
            ),
        ),
        _ => Ok(()),
    }
}

fn validate_rate(tx: &TxRecord<'_>, field: &str, max: u64) -> Result<(), ValidationError> {
    let Some(rate) = tx.number(field) else {
        return Ok(());
    };
    if !(0.0..=max as f64).contains(&rate) {
        return reject(tx, format!("{} must be between 0 and {} inclusive", field, max));
    }
    Ok(())
}

pub fn validate_loan_broker_cover_clawback(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    let broker = optional_field(tx, "LoanBrokerID", is_string)?;
    validate_ledger_id(tx, "LoanBrokerID", broker)?;
    let amount = optional_field(tx, "Amount", is_clawback_amount)?;

    if broker.is_none() && amount.is_none() {
        return reject(tx, "Either LoanBrokerID or Amount is required");
    }
    let negative = amount
        .and_then(Amount::from_value)
        .and_then(|amount| amount.decimal())
        .map_or(false, |value| value.is_negative());
    if negative {
        return reject(tx, "Amount must be >= 0");
    }
    Ok(())
}

pub fn validate_loan_broker_cover_deposit(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    require_ledger_id(tx, "LoanBrokerID")?;
    required_field(tx, "Amount", is_amount)?;
    Ok(())
}

pub fn validate_loan_broker_cover_withdraw(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    require_ledger_id(tx, "LoanBrokerID")?;
    required_field(tx, "Amount", is_amount)?;
    optional_field(tx, "Destination", is_account)?;
    optional_field(tx, "DestinationTag", is_number)?;
    Ok(())
}

pub fn validate_loan_broker_delete(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    require_ledger_id(tx, "LoanBrokerID")
}

pub fn validate_loan_broker_set(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    let vault = required_field(tx, "VaultID", is_string)?;
    let broker = optional_field(tx, "LoanBrokerID", is_string)?;
    let data = optional_field(tx, "Data", is_string)?;
    optional_field(tx, "ManagementFeeRate", is_number)?;
    let debt_maximum = optional_field(tx, "DebtMaximum", is_xrpl_number)?;
    optional_field(tx, "CoverRateMinimum", is_number)?;
    optional_field(tx, "CoverRateLiquidation", is_number)?;

    validate_ledger_id(tx, "VaultID", Some(vault))?;
    validate_ledger_id(tx, "LoanBrokerID", broker)?;
    validate_data(tx, data)?;
    validate_rate(tx, "ManagementFeeRate", MAX_MANAGEMENT_FEE_RATE)?;

    let negative_debt = debt_maximum
        .and_then(Value::as_str)
        .and_then(DecimalValue::parse)
        .map_or(false, |value| value.is_negative());
    if negative_debt {
        return reject(tx, "DebtMaximum must be a non-negative value");
    }

    validate_rate(tx, "CoverRateMinimum", MAX_COVER_RATE)?;
    validate_rate(tx, "CoverRateLiquidation", MAX_COVER_RATE)?;

    // Absent counts as zero; the two are either both set or both unset.
    let minimum_set = tx.number("CoverRateMinimum").map_or(false, |rate| rate != 0.0);
    let liquidation_set = tx
        .number("CoverRateLiquidation")
        .map_or(false, |rate| rate != 0.0);
    if minimum_set != liquidation_set {
        return reject(
            tx,
            "CoverRateMinimum and CoverRateLiquidation must both be zero or both be non-zero",
        );
    }
    Ok(())
}

pub fn validate_loan_delete(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    require_ledger_id(tx, "LoanID")
}

pub fn validate_loan_manage(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    require_ledger_id(tx, "LoanID")?;
    if tx.has_flag(TF_LOAN_IMPAIR) && tx.has_flag(TF_LOAN_UNIMPAIR) {
        return reject(tx, "tfLoanImpair and tfLoanUnimpair cannot both be present");
    }
    Ok(())
}

pub fn validate_loan_pay(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    require_ledger_id(tx, "LoanID")?;
    required_field(tx, "Amount", is_amount)?;

    let modes = [TF_LOAN_OVERPAYMENT, TF_LOAN_FULL_PAYMENT, TF_LOAN_LATE_PAYMENT]
        .iter()
        .filter(|flag| tx.has_flag(**flag))
        .count();
    if modes > 1 {
        return reject(
            tx,
            "at most one of tfLoanOverpayment, tfLoanFullPayment and tfLoanLatePayment may be set",
        );
    }
    Ok(())
}

const LOAN_FEES: [&str; 4] = [
    "LoanOriginationFee",
    "LoanServiceFee",
    "LatePaymentFee",
    "ClosePaymentFee",
];

const LOAN_RATES: [&str; 5] = [
    "OverpaymentFee",
    "InterestRate",
    "LateInterestRate",
    "CloseInterestRate",
    "OverpaymentInterestRate",
];

pub fn validate_loan_set(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    let broker = required_field(tx, "LoanBrokerID", is_string)?;
    required_field(tx, "PrincipalRequested", is_xrpl_number)?;
    optional_field(tx, "CounterpartySignature", is_record)?;
    let data = optional_field(tx, "Data", is_string)?;
    optional_field(tx, "Counterparty", is_account)?;
    for field in LOAN_FEES {
        optional_field(tx, field, is_xrpl_number)?;
    }
    for field in LOAN_RATES {
        optional_field(tx, field, is_number)?;
    }
    optional_field(tx, "PaymentTotal", is_number)?;
    optional_field(tx, "PaymentInterval", is_number)?;
    optional_field(tx, "GracePeriod", is_number)?;

    validate_ledger_id(tx, "LoanBrokerID", Some(broker))?;
    validate_data(tx, data)?;
    for field in LOAN_RATES {
        validate_rate(tx, field, MAX_LOAN_RATE)?;
    }

    let interval = tx.number("PaymentInterval");
    if let Some(interval) = interval {
        if interval < MIN_PAYMENT_INTERVAL as f64 {
            return reject(
                tx,
                format!(
                    "PaymentInterval must be greater than or equal to {}",
                    MIN_PAYMENT_INTERVAL
                ),
            );
        }
    }
    if let (Some(interval), Some(grace)) = (interval, tx.number("GracePeriod")) {
        if grace > interval {
            return reject(tx, "GracePeriod must not be greater than PaymentInterval");
        }
    }
    Ok(())
}
