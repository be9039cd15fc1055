//! # Transaction Validation
//!
//! The single entry point for checking a loosely-typed transaction record.
//!
//! [`validate`] (and [`validate_with_advisories`]) run, in order:
//!
//! 1. **Boundary**: the input is an object with a known string
//!    `TransactionType`.
//! 2. **Memos**: every memo carries its payload in a `Memo` field, hex only.
//! 3. **Disguised XRP**: no issued currency may spell its code as `XRP`.
//! 4. **Flags**: `Flags` is canonicalized to a bitmask exactly once.
//! 5. **Dispatch**: the per-type validator for the tag runs against the
//!    canonical record.
//!
//! Batch inner transactions are validated by re-entering step 1 for each
//! entry, one level deep.

use serde_json::{Map, Value};
use tracing::debug;

use super::kinds::{
    account, amm, batch, check, confidential, credential, delegate, did, domain, escrow, hook,
    loan, mptoken, nftoken, offer, oracle, payment, pseudo, sponsorship, trust, vault, xchain,
};
use super::predicates::is_hex;
use super::record::TxRecord;
use super::types::TransactionType;
use crate::config::{NATIVE_CURRENCY, STANDARD_CURRENCY_CODE_LEN};
use crate::error::ValidationError;
use crate::flags::canonicalize_flags;

/// How many batch levels the dispatcher descends. Inner transactions of a
/// batch are validated; a batch inside a batch is not.
const MAX_BATCH_DEPTH: usize = 1;

const MEMO_HEX_FIELDS: [&str; 3] = ["MemoData", "MemoType", "MemoFormat"];

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Validates a transaction record.
///
/// # Errors
///
/// Returns the first failing check as a [`ValidationError`]. Check order is
/// deterministic, so the same record always reports the same problem.
pub fn validate(tx: &Value) -> Result<(), ValidationError> {
    validate_with_advisories(tx).map(|_| ())
}

/// Validates a transaction record and returns the XLS-89 metadata findings
/// collected along the way.
///
/// Metadata findings never fail validation. They are also logged at `warn`.
pub fn validate_with_advisories(tx: &Value) -> Result<Vec<String>, ValidationError> {
    let mut advisories = Vec::new();
    validate_at_depth(tx, 0, &mut advisories)?;
    Ok(advisories)
}

/// Returns a copy of `tx` with `Flags` in numeric form.
///
/// Records without `Flags` are returned unchanged. The record is not
/// otherwise validated.
pub fn canonicalize(tx: &Value) -> Result<Value, ValidationError> {
    let map = as_object(tx)?;
    let tx_type = transaction_type(map)?;
    let flags = canonicalize_flags(map.get("Flags"), tx_type)?;

    let mut canonical = map.clone();
    if map.get("Flags").map_or(false, |value| !value.is_null()) {
        canonical.insert("Flags".to_string(), Value::from(flags));
    }
    Ok(Value::Object(canonical))
}

// ---------------------------------------------------------------------------
// Boundary
// ---------------------------------------------------------------------------

fn as_object(tx: &Value) -> Result<&Map<String, Value>, ValidationError> {
    tx.as_object()
        .ok_or_else(|| ValidationError::rule("BaseTransaction: invalid, expected a valid object"))
}

/// Decodes the record's tag into the closed [`TransactionType`] set.
fn transaction_type(map: &Map<String, Value>) -> Result<TransactionType, ValidationError> {
    match map.get("TransactionType") {
        None | Some(Value::Null) => Err(ValidationError::rule(
            "Object does not have a `TransactionType`",
        )),
        Some(Value::String(tag)) => tag
            .parse::<TransactionType>()
            .map_err(|err| ValidationError::rule(err.to_string())),
        Some(_) => Err(ValidationError::rule("Object's `TransactionType` is not a string")),
    }
}

// ---------------------------------------------------------------------------
// Cross-cutting passes
// ---------------------------------------------------------------------------

/// A memo field passes when it is absent, empty, or a hex string.
fn is_memo_hex(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.is_empty() || is_hex(text),
        Some(_) => false,
    }
}

fn validate_memos(map: &Map<String, Value>) -> Result<(), ValidationError> {
    let memos = match map.get("Memos") {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Array(memos)) => memos,
        Some(_) => return Err(ValidationError::rule("Memo must be array")),
    };

    for entry in memos {
        let memo = match entry.get("Memo") {
            None | Some(Value::Null) => {
                return Err(ValidationError::rule("Memo data must be in a `Memo` field"))
            }
            Some(memo) => memo,
        };
        for field in MEMO_HEX_FIELDS {
            if !is_memo_hex(memo.get(field)) {
                return Err(ValidationError::rule(format!(
                    "{} field must be a hex value",
                    field
                )));
            }
        }
    }
    Ok(())
}

/// The currency code of an issuer-backed issue or issued amount, if `value`
/// has that shape.
fn issued_currency_code(value: &Value) -> Option<&str> {
    let object = value.as_object()?;
    let shaped = match object.len() {
        2 => true,
        3 => object.contains_key("value"),
        _ => false,
    };
    if !shaped || !object.get("issuer").map_or(false, Value::is_string) {
        return None;
    }
    object.get("currency").and_then(Value::as_str)
}

fn reject_disguised_xrp(map: &Map<String, Value>) -> Result<(), ValidationError> {
    for value in map.values() {
        let Some(currency) = issued_currency_code(value) else {
            continue;
        };
        if currency.len() == STANDARD_CURRENCY_CODE_LEN
            && currency.eq_ignore_ascii_case(NATIVE_CURRENCY)
        {
            return Err(ValidationError::rule(format!(
                "Cannot have an issued currency with a similar standard code to XRP \
                 (received '{}'). XRP is not an issued currency.",
                currency
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

fn validate_at_depth(
    tx: &Value,
    depth: usize,
    advisories: &mut Vec<String>,
) -> Result<(), ValidationError> {
    let map = as_object(tx)?;
    let tx_type = transaction_type(map)?;

    validate_memos(map)?;
    reject_disguised_xrp(map)?;

    let flags = canonicalize_flags(map.get("Flags"), tx_type)?;
    let record = TxRecord::new(tx_type, map, flags);

    debug!(tx_type = %tx_type, flags, depth, "validating transaction");
    dispatch(&record, advisories)?;

    if tx_type == TransactionType::Batch {
        if depth >= MAX_BATCH_DEPTH {
            return Err(ValidationError::rule("Batch: Cannot nest Batch transactions."));
        }
        for inner in batch::inner_transactions(&record) {
            validate_at_depth(inner, depth + 1, advisories)?;
        }
    }
    Ok(())
}

/// Runs the per-type validator for `tx`.
fn dispatch(tx: &TxRecord<'_>, advisories: &mut Vec<String>) -> Result<(), ValidationError> {
    use TransactionType::*;

    match tx.tx_type() {
        AccountDelete => account::validate_account_delete(tx),
        AccountSet => account::validate_account_set(tx),
        AMMBid => amm::validate_amm_bid(tx),
        AMMClawback => amm::validate_amm_clawback(tx),
        AMMCreate => amm::validate_amm_create(tx),
        AMMDelete => amm::validate_amm_delete(tx),
        AMMDeposit => amm::validate_amm_deposit(tx),
        AMMVote => amm::validate_amm_vote(tx),
        AMMWithdraw => amm::validate_amm_withdraw(tx),
        Batch => batch::validate_batch(tx),
        CheckCancel => check::validate_check_cancel(tx),
        CheckCash => check::validate_check_cash(tx),
        CheckCreate => check::validate_check_create(tx),
        Clawback => trust::validate_clawback(tx),
        ConfidentialMPTClawback => confidential::validate_confidential_mpt_clawback(tx),
        ConfidentialMPTConvert => confidential::validate_confidential_mpt_convert(tx),
        ConfidentialMPTConvertBack => confidential::validate_confidential_mpt_convert_back(tx),
        ConfidentialMPTMergeInbox => confidential::validate_confidential_mpt_merge_inbox(tx),
        ConfidentialMPTSend => confidential::validate_confidential_mpt_send(tx),
        CredentialAccept => credential::validate_credential_accept(tx),
        CredentialCreate => credential::validate_credential_create(tx),
        CredentialDelete => credential::validate_credential_delete(tx),
        DelegateSet => delegate::validate_delegate_set(tx),
        DepositPreauth => account::validate_deposit_preauth(tx),
        DIDDelete => did::validate_did_delete(tx),
        DIDSet => did::validate_did_set(tx),
        EscrowCancel => escrow::validate_escrow_cancel(tx),
        EscrowCreate => escrow::validate_escrow_create(tx),
        EscrowFinish => escrow::validate_escrow_finish(tx),
        LedgerStateFix => account::validate_ledger_state_fix(tx),
        LoanBrokerCoverClawback => loan::validate_loan_broker_cover_clawback(tx),
        LoanBrokerCoverDeposit => loan::validate_loan_broker_cover_deposit(tx),
        LoanBrokerCoverWithdraw => loan::validate_loan_broker_cover_withdraw(tx),
        LoanBrokerDelete => loan::validate_loan_broker_delete(tx),
        LoanBrokerSet => loan::validate_loan_broker_set(tx),
        LoanDelete => loan::validate_loan_delete(tx),
        LoanManage => loan::validate_loan_manage(tx),
        LoanPay => loan::validate_loan_pay(tx),
        LoanSet => loan::validate_loan_set(tx),
        MPTokenAuthorize => mptoken::validate_mptoken_authorize(tx),
        MPTokenIssuanceCreate => mptoken::validate_mptoken_issuance_create(tx, advisories),
        MPTokenIssuanceDestroy => mptoken::validate_mptoken_issuance_destroy(tx),
        MPTokenIssuanceSet => mptoken::validate_mptoken_issuance_set(tx),
        NFTokenAcceptOffer => nftoken::validate_nftoken_accept_offer(tx),
        NFTokenBurn => nftoken::validate_nftoken_burn(tx),
        NFTokenCancelOffer => nftoken::validate_nftoken_cancel_offer(tx),
        NFTokenCreateOffer => nftoken::validate_nftoken_create_offer(tx),
        NFTokenMint => nftoken::validate_nftoken_mint(tx),
        NFTokenModify => nftoken::validate_nftoken_modify(tx),
        OfferCancel => offer::validate_offer_cancel(tx),
        OfferCreate => offer::validate_offer_create(tx),
        OracleDelete => oracle::validate_oracle_delete(tx),
        OracleSet => oracle::validate_oracle_set(tx),
        Payment => payment::validate_payment(tx),
        PaymentChannelClaim => payment::validate_payment_channel_claim(tx),
        PaymentChannelCreate => payment::validate_payment_channel_create(tx),
        PaymentChannelFund => payment::validate_payment_channel_fund(tx),
        PermissionedDomainDelete => domain::validate_permissioned_domain_delete(tx),
        PermissionedDomainSet => domain::validate_permissioned_domain_set(tx),
        SetHook => hook::validate_set_hook(tx),
        SetRegularKey => account::validate_set_regular_key(tx),
        SignerListSet => account::validate_signer_list_set(tx),
        SponsorshipSet => sponsorship::validate_sponsorship_set(tx),
        TicketCreate => account::validate_ticket_create(tx),
        TrustSet => trust::validate_trust_set(tx),
        VaultClawback => vault::validate_vault_clawback(tx),
        VaultCreate => vault::validate_vault_create(tx, advisories),
        VaultDelete => vault::validate_vault_delete(tx),
        VaultDeposit => vault::validate_vault_deposit(tx),
        VaultSet => vault::validate_vault_set(tx),
        VaultWithdraw => vault::validate_vault_withdraw(tx),
        XChainAccountCreateCommit => xchain::validate_xchain_account_create_commit(tx),
        XChainAddAccountCreateAttestation => {
            xchain::validate_xchain_add_account_create_attestation(tx)
        }
        XChainAddClaimAttestation => xchain::validate_xchain_add_claim_attestation(tx),
        XChainClaim => xchain::validate_xchain_claim(tx),
        XChainCommit => xchain::validate_xchain_commit(tx),
        XChainCreateBridge => xchain::validate_xchain_create_bridge(tx),
        XChainCreateClaimID => xchain::validate_xchain_create_claim_id(tx),
        XChainModifyBridge => xchain::validate_xchain_modify_bridge(tx),
        EnableAmendment => pseudo::validate_enable_amendment(tx),
        SetFee => pseudo::validate_set_fee(tx),
        UNLModify => pseudo::validate_unl_modify(tx),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
