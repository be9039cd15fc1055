//! # Flag Canonicalizer
//!
//! Transactions may spell `Flags` two ways: the wire bitmask (`131072`) or a
//! map of named booleans (`{"tfPartialPayment": true}`). Validators only ever
//! see the bitmask. This module owns the per-type name tables and the
//! conversions between the two forms.
//!
//! The tables are `const` data selected by an exhaustive `match`, so a type
//! without flags is a compile-time fact rather than a missing map entry.
//! Bit values are the ledger's published assignments and must never change.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::transaction::TransactionType;

/// A named flag and its bit value.
pub type FlagEntry = (&'static str, u32);

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Flags accepted on every transaction type.
pub const GLOBAL_FLAGS: &[FlagEntry] = &[("tfInnerBatchTxn", 0x4000_0000)];

/// Bit marking a transaction as an inner transaction of a batch.
pub const TF_INNER_BATCH_TXN: u32 = 0x4000_0000;

// Bits the per-type validators test directly.

pub const TF_HYBRID: u32 = 0x0010_0000;
pub const TF_PARTIAL_PAYMENT: u32 = 0x0002_0000;
pub const TF_SELL_NFTOKEN: u32 = 0x0000_0001;
pub const TF_TRANSFERABLE: u32 = 0x0000_0008;
pub const TF_MPT_CAN_TRANSFER: u32 = 0x0000_0020;
pub const TF_MPT_LOCK: u32 = 0x0000_0001;
pub const TF_MPT_UNLOCK: u32 = 0x0000_0002;
pub const TF_LOAN_OVERPAYMENT: u32 = 0x0001_0000;
pub const TF_LOAN_FULL_PAYMENT: u32 = 0x0002_0000;
pub const TF_LOAN_LATE_PAYMENT: u32 = 0x0004_0000;
pub const TF_LOAN_IMPAIR: u32 = 0x0002_0000;
pub const TF_LOAN_UNIMPAIR: u32 = 0x0004_0000;
pub const TF_DELETE_OBJECT: u32 = 0x0010_0000;
pub const TF_VAULT_PRIVATE: u32 = 0x0001_0000;

const ACCOUNT_SET: &[FlagEntry] = &[
    ("tfRequireDestTag", 0x0001_0000),
    ("tfOptionalDestTag", 0x0002_0000),
    ("tfRequireAuth", 0x0004_0000),
    ("tfOptionalAuth", 0x0008_0000),
    ("tfDisallowXRP", 0x0010_0000),
    ("tfAllowXRP", 0x0020_0000),
];

const AMM_CLAWBACK: &[FlagEntry] = &[("tfClawTwoAssets", 0x0000_0001)];

const AMM_DEPOSIT: &[FlagEntry] = &[
    ("tfLPToken", 0x0001_0000),
    ("tfSingleAsset", 0x0008_0000),
    ("tfTwoAsset", 0x0010_0000),
    ("tfOneAssetLPToken", 0x0020_0000),
    ("tfLimitLPToken", 0x0040_0000),
    ("tfTwoAssetIfEmpty", 0x0080_0000),
];

const AMM_WITHDRAW: &[FlagEntry] = &[
    ("tfLPToken", 0x0001_0000),
    ("tfWithdrawAll", 0x0002_0000),
    ("tfOneAssetWithdrawAll", 0x0004_0000),
    ("tfSingleAsset", 0x0008_0000),
    ("tfTwoAsset", 0x0010_0000),
    ("tfOneAssetLPToken", 0x0020_0000),
    ("tfLimitLPToken", 0x0040_0000),
];

const BATCH: &[FlagEntry] = &[
    ("tfAllOrNothing", 0x0001_0000),
    ("tfOnlyOne", 0x0002_0000),
    ("tfUntilFailure", 0x0004_0000),
    ("tfIndependent", 0x0008_0000),
];

const ENABLE_AMENDMENT: &[FlagEntry] = &[
    ("tfGotMajority", 0x0001_0000),
    ("tfLostMajority", 0x0002_0000),
];

const LOAN_MANAGE: &[FlagEntry] = &[
    ("tfLoanDefault", 0x0001_0000),
    ("tfLoanImpair", TF_LOAN_IMPAIR),
    ("tfLoanUnimpair", TF_LOAN_UNIMPAIR),
];

const LOAN_PAY: &[FlagEntry] = &[
    ("tfLoanOverpayment", TF_LOAN_OVERPAYMENT),
    ("tfLoanFullPayment", TF_LOAN_FULL_PAYMENT),
    ("tfLoanLatePayment", TF_LOAN_LATE_PAYMENT),
];

const LOAN_SET: &[FlagEntry] = &[("tfLoanOverpayment", TF_LOAN_OVERPAYMENT)];

const MPTOKEN_AUTHORIZE: &[FlagEntry] = &[("tfMPTUnauthorize", 0x0000_0001)];

const MPTOKEN_ISSUANCE_CREATE: &[FlagEntry] = &[
    ("tfMPTCanLock", 0x0000_0002),
    ("tfMPTRequireAuth", 0x0000_0004),
    ("tfMPTCanEscrow", 0x0000_0008),
    ("tfMPTCanTrade", 0x0000_0010),
    ("tfMPTCanTransfer", TF_MPT_CAN_TRANSFER),
    ("tfMPTCanClawback", 0x0000_0040),
];

const MPTOKEN_ISSUANCE_SET: &[FlagEntry] =
    &[("tfMPTLock", TF_MPT_LOCK), ("tfMPTUnlock", TF_MPT_UNLOCK)];

const NFTOKEN_CREATE_OFFER: &[FlagEntry] = &[("tfSellNFToken", TF_SELL_NFTOKEN)];

const NFTOKEN_MINT: &[FlagEntry] = &[
    ("tfBurnable", 0x0000_0001),
    ("tfOnlyXRP", 0x0000_0002),
    ("tfTrustLine", 0x0000_0004),
    ("tfTransferable", TF_TRANSFERABLE),
    ("tfMutable", 0x0000_0010),
];

const OFFER_CREATE: &[FlagEntry] = &[
    ("tfPassive", 0x0001_0000),
    ("tfImmediateOrCancel", 0x0002_0000),
    ("tfFillOrKill", 0x0004_0000),
    ("tfSell", 0x0008_0000),
    ("tfHybrid", TF_HYBRID),
];

const PAYMENT: &[FlagEntry] = &[
    ("tfNoRippleDirect", 0x0001_0000),
    ("tfPartialPayment", TF_PARTIAL_PAYMENT),
    ("tfLimitQuality", 0x0004_0000),
];

const PAYMENT_CHANNEL_CLAIM: &[FlagEntry] = &[("tfRenew", 0x0001_0000), ("tfClose", 0x0002_0000)];

const SPONSORSHIP_SET: &[FlagEntry] = &[
    ("tfSponsorshipSetRequireSignForFee", 0x0001_0000),
    ("tfSponsorshipClearRequireSignForFee", 0x0002_0000),
    ("tfSponsorshipSetRequireSignForReserve", 0x0004_0000),
    ("tfSponsorshipClearRequireSignForReserve", 0x0008_0000),
    ("tfDeleteObject", TF_DELETE_OBJECT),
];

const TRUST_SET: &[FlagEntry] = &[
    ("tfSetfAuth", 0x0001_0000),
    ("tfSetNoRipple", 0x0002_0000),
    ("tfClearNoRipple", 0x0004_0000),
    ("tfSetFreeze", 0x0010_0000),
    ("tfClearFreeze", 0x0020_0000),
    ("tfSetDeepFreeze", 0x0040_0000),
    ("tfClearDeepFreeze", 0x0080_0000),
];

const VAULT_CREATE: &[FlagEntry] = &[
    ("tfVaultPrivate", TF_VAULT_PRIVATE),
    ("tfVaultShareNonTransferable", 0x0002_0000),
];

const XCHAIN_MODIFY_BRIDGE: &[FlagEntry] = &[("tfClearAccountCreateAmount", 0x0001_0000)];

/// The type-specific flags registered for `tx_type`. Empty for types that
/// define none; [`GLOBAL_FLAGS`] are not included.
pub fn registered_flags(tx_type: TransactionType) -> &'static [FlagEntry] {
    use TransactionType as T;

    match tx_type {
        T::AccountSet => ACCOUNT_SET,
        T::AMMClawback => AMM_CLAWBACK,
        T::AMMDeposit => AMM_DEPOSIT,
        T::AMMWithdraw => AMM_WITHDRAW,
        T::Batch => BATCH,
        T::EnableAmendment => ENABLE_AMENDMENT,
        T::LoanManage => LOAN_MANAGE,
        T::LoanPay => LOAN_PAY,
        T::LoanSet => LOAN_SET,
        T::MPTokenAuthorize => MPTOKEN_AUTHORIZE,
        T::MPTokenIssuanceCreate => MPTOKEN_ISSUANCE_CREATE,
        T::MPTokenIssuanceSet => MPTOKEN_ISSUANCE_SET,
        T::NFTokenCreateOffer => NFTOKEN_CREATE_OFFER,
        T::NFTokenMint => NFTOKEN_MINT,
        T::OfferCreate => OFFER_CREATE,
        T::Payment => PAYMENT,
        T::PaymentChannelClaim => PAYMENT_CHANNEL_CLAIM,
        T::SponsorshipSet => SPONSORSHIP_SET,
        T::TrustSet => TRUST_SET,
        T::VaultCreate => VAULT_CREATE,
        T::XChainModifyBridge => XCHAIN_MODIFY_BRIDGE,

        T::AccountDelete
        | T::AMMBid
        | T::AMMCreate
        | T::AMMDelete
        | T::AMMVote
        | T::CheckCancel
        | T::CheckCash
        | T::CheckCreate
        | T::Clawback
        | T::ConfidentialMPTClawback
        | T::ConfidentialMPTConvert
        | T::ConfidentialMPTConvertBack
        | T::ConfidentialMPTMergeInbox
        | T::ConfidentialMPTSend
        | T::CredentialAccept
        | T::CredentialCreate
        | T::CredentialDelete
        | T::DelegateSet
        | T::DepositPreauth
        | T::DIDDelete
        | T::DIDSet
        | T::EscrowCancel
        | T::EscrowCreate
        | T::EscrowFinish
        | T::LedgerStateFix
        | T::LoanBrokerCoverClawback
        | T::LoanBrokerCoverDeposit
        | T::LoanBrokerCoverWithdraw
        | T::LoanBrokerDelete
        | T::LoanBrokerSet
        | T::LoanDelete
        | T::MPTokenIssuanceDestroy
        | T::NFTokenAcceptOffer
        | T::NFTokenBurn
        | T::NFTokenCancelOffer
        | T::NFTokenModify
        | T::OfferCancel
        | T::OracleDelete
        | T::OracleSet
        | T::PaymentChannelCreate
        | T::PaymentChannelFund
        | T::PermissionedDomainDelete
        | T::PermissionedDomainSet
        | T::SetHook
        | T::SetRegularKey
        | T::SignerListSet
        | T::TicketCreate
        | T::VaultClawback
        | T::VaultDelete
        | T::VaultDeposit
        | T::VaultSet
        | T::VaultWithdraw
        | T::XChainAccountCreateCommit
        | T::XChainAddAccountCreateAttestation
        | T::XChainAddClaimAttestation
        | T::XChainClaim
        | T::XChainCommit
        | T::XChainCreateBridge
        | T::XChainCreateClaimID
        | T::SetFee
        | T::UNLModify => &[],
    }
}

/// Looks up a flag name for `tx_type`, falling back to the global flags.
pub fn flag_value(tx_type: TransactionType, name: &str) -> Option<u32> {
    registered_flags(tx_type)
        .iter()
        .chain(GLOBAL_FLAGS)
        .find(|(flag, _)| *flag == name)
        .map(|(_, value)| *value)
}

// ---------------------------------------------------------------------------
// Encode / Decode
// ---------------------------------------------------------------------------

fn unknown_flag(has_registry: bool, name: &str) -> ValidationError {
    if !has_registry {
        let globals: Map<String, Value> = GLOBAL_FLAGS
            .iter()
            .map(|(flag, value)| (flag.to_string(), Value::from(*value)))
            .collect();
        ValidationError::rule(format!(
            "Invalid flag {}. Valid flags are {}",
            name,
            Value::Object(globals)
        ))
    } else {
        ValidationError::rule(format!("Invalid flag {}.", name))
    }
}

/// Folds a named-boolean map into the wire bitmask.
///
/// Names not registered for `tx_type` (nor globally) are an error. `false`
/// entries are accepted and contribute nothing.
pub fn encode_flags<'a, I>(named: I, tx_type: TransactionType) -> Result<u32, ValidationError>
where
    I: IntoIterator<Item = (&'a str, bool)>,
{
    named.into_iter().try_fold(0u32, |mask, (name, enabled)| {
        let value = flag_value(tx_type, name)
            .ok_or_else(|| unknown_flag(!registered_flags(tx_type).is_empty(), name))?;
        Ok(if enabled { mask | value } else { mask })
    })
}

/// Expands a bitmask into the names set in it.
///
/// Only registered names (type-specific, then global) can appear; bits with
/// no name are ignored rather than invented.
pub fn decode_flags(bitmask: u32, tx_type: TransactionType) -> BTreeMap<&'static str, bool> {
    registered_flags(tx_type)
        .iter()
        .chain(GLOBAL_FLAGS)
        .filter(|(_, value)| is_flag_enabled(bitmask, *value))
        .map(|(name, _)| (*name, true))
        .collect()
}

/// Canonicalizes a raw `Flags` value to its numeric form.
///
/// Absent or `null` is zero. A number must be a non-negative integer that
/// fits in 32 bits. An object must map names to booleans.
pub fn canonicalize_flags(
    flags: Option<&Value>,
    tx_type: TransactionType,
) -> Result<u32, ValidationError> {
    let invalid = || ValidationError::invalid(tx_type.as_str(), "Flags");

    match flags {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(number)) => number
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(invalid),
        Some(Value::Object(map)) => {
            let named = map
                .iter()
                .map(|(name, enabled)| enabled.as_bool().map(|b| (name.as_str(), b)))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(invalid)?;
            encode_flags(named, tx_type)
        }
        Some(_) => Err(invalid()),
    }
}

/// Returns `true` if every bit of `flag` is set in `flags`.
pub fn is_flag_enabled(flags: u32, flag: u32) -> bool {
    flags & flag == flag
}

// ---------------------------------------------------------------------------
// Record-level helpers
// ---------------------------------------------------------------------------

fn record_type(tx: &Value) -> Option<TransactionType> {
    tx.get("TransactionType")?.as_str()?.parse().ok()
}

/// Returns a record's `Flags` as a number.
///
/// Records with an unknown or missing type only accept global names.
pub fn convert_tx_flags_to_number(tx: &Value) -> Result<u32, ValidationError> {
    let flags = tx.get("Flags");
    match record_type(tx) {
        Some(tx_type) => canonicalize_flags(flags, tx_type),
        None => match flags {
            None | Some(Value::Null) => Ok(0),
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| ValidationError::invalid("BaseTransaction", "Flags")),
            Some(Value::Object(map)) => map.iter().try_fold(0u32, |mask, (name, enabled)| {
                let value = GLOBAL_FLAGS
                    .iter()
                    .find(|(flag, _)| *flag == name)
                    .map(|(_, value)| *value)
                    .ok_or_else(|| unknown_flag(false, name))?;
                Ok(if enabled.as_bool() == Some(true) { mask | value } else { mask })
            }),
            Some(_) => Err(ValidationError::invalid("BaseTransaction", "Flags")),
        },
    }
}

/// Returns the flags set on a record as a name map, global flags included.
pub fn parse_transaction_flags(tx: &Value) -> Result<BTreeMap<&'static str, bool>, ValidationError> {
    let bitmask = convert_tx_flags_to_number(tx)?;
    if bitmask == 0 {
        return Ok(BTreeMap::new());
    }
    Ok(match record_type(tx) {
        Some(tx_type) => decode_flags(bitmask, tx_type),
        None => GLOBAL_FLAGS
            .iter()
            .filter(|(_, value)| is_flag_enabled(bitmask, *value))
            .map(|(name, _)| (*name, true))
            .collect(),
    })
}

// ---------------------------------------------------------------------------
// AccountSet asf flags
// ---------------------------------------------------------------------------

/// `AccountSet.SetFlag` / `ClearFlag` values. These are small integers, not
/// bits; 11 is retired.
pub const ACCOUNT_SET_ASF_FLAGS: &[FlagEntry] = &[
    ("asfRequireDest", 1),
    ("asfRequireAuth", 2),
    ("asfDisallowXRP", 3),
    ("asfDisableMaster", 4),
    ("asfAccountTxnID", 5),
    ("asfNoFreeze", 6),
    ("asfGlobalFreeze", 7),
    ("asfDefaultRipple", 8),
    ("asfDepositAuth", 9),
    ("asfAuthorizedNFTokenMinter", 10),
    ("asfDisallowIncomingNFTokenOffer", 12),
    ("asfDisallowIncomingCheck", 13),
    ("asfDisallowIncomingPayChan", 14),
    ("asfDisallowIncomingTrustline", 15),
    ("asfAllowTrustLineClawback", 16),
    ("asfAllowTrustLineLocking", 17),
];

/// Returns `true` if `value` names a known asf flag.
pub fn is_account_set_asf(value: u64) -> bool {
    ACCOUNT_SET_ASF_FLAGS
        .iter()
        .any(|(_, flag)| u64::from(*flag) == value)
}

// ---------------------------------------------------------------------------
// AccountRoot ledger flags
// ---------------------------------------------------------------------------

/// `lsf*` flags found on AccountRoot ledger entries.
pub const ACCOUNT_ROOT_FLAGS: &[FlagEntry] = &[
    ("lsfPasswordSpent", 0x0001_0000),
    ("lsfRequireDestTag", 0x0002_0000),
    ("lsfRequireAuth", 0x0004_0000),
    ("lsfDisallowXRP", 0x0008_0000),
    ("lsfDisableMaster", 0x0010_0000),
    ("lsfNoFreeze", 0x0020_0000),
    ("lsfGlobalFreeze", 0x0040_0000),
    ("lsfDefaultRipple", 0x0080_0000),
    ("lsfDepositAuth", 0x0100_0000),
    ("lsfAMM", 0x0200_0000),
    ("lsfDisallowIncomingNFTokenOffer", 0x0400_0000),
    ("lsfDisallowIncomingCheck", 0x0800_0000),
    ("lsfDisallowIncomingPayChan", 0x1000_0000),
    ("lsfDisallowIncomingTrustline", 0x2000_0000),
    ("lsfAllowTrustLineClawback", 0x8000_0000),
];

/// Expands an AccountRoot `Flags` bitmask into the `lsf*` names set in it.
pub fn parse_account_root_flags(bitmask: u32) -> BTreeMap<&'static str, bool> {
    ACCOUNT_ROOT_FLAGS
        .iter()
        .filter(|(_, value)| is_flag_enabled(bitmask, *value))
        .map(|(name, _)| (*name, true))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
