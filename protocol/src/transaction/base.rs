//! The fields every transaction type shares.

use serde_json::Value;

use super::fields::{optional_field, required_field};
use super::nested::{is_memo, is_signer};
use super::predicates::{is_account, is_number, is_string};
use super::record::TxRecord;
use crate::error::ValidationError;

/// Borrowed view of the common fields, produced by
/// [`validate_base_transaction`] once their shapes are known to be right.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseTransaction<'a> {
    pub account: &'a str,
    pub fee: Option<&'a str>,
    pub sequence: Option<u64>,
    pub account_txn_id: Option<&'a str>,
    pub last_ledger_sequence: Option<u64>,
    pub memos: Option<&'a [Value]>,
    pub signers: Option<&'a [Value]>,
    pub source_tag: Option<u64>,
    pub signing_pub_key: Option<&'a str>,
    pub ticket_sequence: Option<u64>,
    pub txn_signature: Option<&'a str>,
    pub network_id: Option<u64>,
    pub delegate: Option<&'a str>,
    pub flags: u32,
}

fn opt_str<'a>(value: Option<&'a Value>) -> Option<&'a str> {
    value.and_then(Value::as_str)
}

fn opt_u64(value: Option<&Value>) -> Option<u64> {
    value.and_then(Value::as_u64)
}

fn array_of<'a>(
    tx: &TxRecord<'a>,
    field: &str,
    element: fn(&Value) -> bool,
    allow_empty: bool,
) -> Result<Option<&'a [Value]>, ValidationError> {
    let Some(value) = tx.get(field) else {
        return Ok(None);
    };
    match value.as_array() {
        Some(items) if (allow_empty || !items.is_empty()) && items.iter().all(element) => {
            Ok(Some(items.as_slice()))
        }
        _ => Err(ValidationError::rule(format!("BaseTransaction: invalid {}", field))),
    }
}

/// Checks the shared fields and returns a typed view of them.
///
/// Runs before every per-type validator. Check order is fixed so the first
/// reported problem is stable.
pub fn validate_base_transaction<'a>(tx: &TxRecord<'a>) -> Result<BaseTransaction<'a>, ValidationError> {
    let account = required_field(tx, "Account", is_string)?;
    let fee = optional_field(tx, "Fee", is_string)?;
    let sequence = optional_field(tx, "Sequence", is_number)?;
    let account_txn_id = optional_field(tx, "AccountTxnID", is_string)?;
    let last_ledger_sequence = optional_field(tx, "LastLedgerSequence", is_number)?;
    let memos = array_of(tx, "Memos", is_memo, true)?;
    let signers = array_of(tx, "Signers", is_signer, false)?;
    let source_tag = optional_field(tx, "SourceTag", is_number)?;
    let signing_pub_key = optional_field(tx, "SigningPubKey", is_string)?;
    let ticket_sequence = optional_field(tx, "TicketSequence", is_number)?;
    let txn_signature = optional_field(tx, "TxnSignature", is_string)?;
    let network_id = optional_field(tx, "NetworkID", is_number)?;
    let delegate = optional_field(tx, "Delegate", is_account)?;

    let account = account.as_str().unwrap_or_default();
    let delegate = opt_str(delegate);
    if delegate == Some(account) {
        return Err(ValidationError::rule(
            "BaseTransaction: Account and Delegate addresses cannot be the same",
        ));
    }

    Ok(BaseTransaction {
        account,
        fee: opt_str(fee),
        sequence: opt_u64(sequence),
        account_txn_id: opt_str(account_txn_id),
        last_ledger_sequence: opt_u64(last_ledger_sequence),
        memos,
        signers,
        source_tag: opt_u64(source_tag),
        signing_pub_key: opt_str(signing_pub_key),
        ticket_sequence: opt_u64(ticket_sequence),
        txn_signature: opt_str(txn_signature),
        network_id: opt_u64(network_id),
        delegate,
        flags: tx.flags(),
    })
}
