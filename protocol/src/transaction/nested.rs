//! # Nested Structure Validators
//!
//! Several transaction types carry small bounded records or lists of them:
//! memos, signers, credential lists, payment paths, bridges, oracle price
//! series, signer entries, AMM auction slots, delegate permissions, hooks.
//! Each gets one reusable check here. The per-type validators decide which
//! ones apply and under what name errors are reported.

use std::collections::HashSet;

use serde_json::{Map, Value};

use super::fields::reject;
use super::predicates::{is_hex, is_issued_currency, is_ledger_entry_id};
use super::record::TxRecord;
use crate::config::{
    MAX_AUTH_ACCOUNTS, MAX_CREDENTIAL_TYPE_LENGTH, MAX_DELEGATE_PERMISSIONS, MAX_HOOKS,
    MAX_ORACLE_PRICE_HEX_LENGTH, MAX_ORACLE_SCALE, MAX_PRICE_DATA_SERIES, MAX_SIGNER_ENTRIES,
    MEMO_SIZE, SIGNER_SIZE,
};
use crate::error::ValidationError;
use crate::transaction::TransactionType;

/// Number of keys in an XChainBridge object.
const XCHAIN_BRIDGE_SIZE: usize = 4;

/// An AuthorizeCredential wrapper holds exactly `Credential`.
const AUTHORIZE_CREDENTIAL_SIZE: usize = 1;

const MEMO_FIELDS: [&str; 3] = ["MemoData", "MemoType", "MemoFormat"];

fn is_optional_hex(object: &Map<String, Value>, key: &str) -> bool {
    match object.get(key) {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => is_hex(text),
        Some(_) => false,
    }
}

fn is_optional_string(object: &Map<String, Value>, key: &str) -> bool {
    matches!(object.get(key), None | Some(Value::Null) | Some(Value::String(_)))
}

// ---------------------------------------------------------------------------
// Memos & Signers
// ---------------------------------------------------------------------------

/// `{"Memo": {...}}` with 1 to 3 hex fields drawn from MemoData, MemoType
/// and MemoFormat, and nothing else.
pub fn is_memo(value: &Value) -> bool {
    let Some(memo) = value.get("Memo").and_then(Value::as_object) else {
        return false;
    };
    (1..=MEMO_SIZE).contains(&memo.len())
        && memo.keys().all(|key| MEMO_FIELDS.contains(&key.as_str()))
        && MEMO_FIELDS.iter().all(|key| is_optional_hex(memo, key))
}

/// `{"Signer": {"Account", "TxnSignature", "SigningPubKey"}}`, all strings.
pub fn is_signer(value: &Value) -> bool {
    let Some(signer) = value.get("Signer").and_then(Value::as_object) else {
        return false;
    };
    signer.len() == SIGNER_SIZE
        && ["Account", "TxnSignature", "SigningPubKey"]
            .iter()
            .all(|key| signer.get(*key).map_or(false, Value::is_string))
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Checks the record's `CredentialType`: a non-empty hex string of at most
/// 128 characters.
pub fn validate_credential_type(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    let Some(value) = tx.get("CredentialType") else {
        return Err(ValidationError::missing(tx.name(), "CredentialType"));
    };
    let Some(credential_type) = value.as_str() else {
        return reject(tx, "CredentialType must be a string");
    };
    if credential_type.is_empty() {
        return reject(tx, "CredentialType cannot be an empty string");
    }
    if credential_type.len() > MAX_CREDENTIAL_TYPE_LENGTH {
        return reject(
            tx,
            format!("CredentialType length cannot be > {}", MAX_CREDENTIAL_TYPE_LENGTH),
        );
    }
    if !is_hex(credential_type) {
        return reject(tx, "CredentialType must be encoded in hex");
    }
    Ok(())
}

/// The two shapes a credential list can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialList {
    /// Hex ledger ids of credential objects (`CredentialIDs`).
    Ids,
    /// `{"Credential": {"Issuer", "CredentialType"}}` wrappers.
    Authorizations,
}

/// `{"Credential": {"Issuer": string, "CredentialType": string}}`.
pub fn is_authorize_credential(value: &Value) -> bool {
    let Some(wrapper) = value.as_object() else {
        return false;
    };
    let Some(credential) = wrapper.get("Credential").and_then(Value::as_object) else {
        return false;
    };
    wrapper.len() == AUTHORIZE_CREDENTIAL_SIZE
        && credential.get("Issuer").map_or(false, Value::is_string)
        && credential.get("CredentialType").map_or(false, Value::is_string)
}

fn credential_key(value: &Value, kind: CredentialList) -> String {
    match kind {
        CredentialList::Ids => value.as_str().unwrap_or_default().to_string(),
        CredentialList::Authorizations => {
            let credential = &value["Credential"];
            format!(
                "{}-{}",
                credential["Issuer"].as_str().unwrap_or_default(),
                credential["CredentialType"].as_str().unwrap_or_default()
            )
        }
    }
}

/// Checks a credential list, reporting errors under `tx_type`.
///
/// Absent (or `null`) is fine. Present lists hold 1 to `max` well-formed,
/// distinct entries.
pub fn validate_credentials_list(
    credentials: Option<&Value>,
    tx_type: &str,
    kind: CredentialList,
    max: usize,
) -> Result<(), ValidationError> {
    let fail = |message: String| Err(ValidationError::rule(format!("{}: {}", tx_type, message)));

    let Some(credentials) = credentials.filter(|value| !value.is_null()) else {
        return Ok(());
    };
    let Some(items) = credentials.as_array() else {
        return fail("Credentials must be an array".into());
    };
    if items.len() > max {
        return fail(format!("Credentials length cannot exceed {} elements", max));
    }
    if items.is_empty() {
        return fail("Credentials cannot be an empty array".into());
    }

    for item in items {
        match kind {
            CredentialList::Ids if !item.as_str().map_or(false, is_hex) => {
                return fail("Invalid Credentials ID list format".into());
            }
            CredentialList::Authorizations if !is_authorize_credential(item) => {
                return fail("Invalid Credentials format".into());
            }
            _ => {}
        }
    }

    let mut seen = HashSet::with_capacity(items.len());
    if !items.iter().all(|item| seen.insert(credential_key(item, kind))) {
        return fail("Credentials cannot contain duplicate elements".into());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Payment paths
// ---------------------------------------------------------------------------

fn is_path_step(step: &Value) -> bool {
    let Some(step) = step.as_object() else {
        return false;
    };
    if !["account", "currency", "issuer"]
        .iter()
        .all(|key| is_optional_string(step, key))
    {
        return false;
    }
    let has = |key: &str| step.get(key).map_or(false, |v| !v.is_null());
    has("account") || has("currency") || has("issuer")
}

/// A non-empty array of non-empty arrays of path steps.
///
/// A step names an account, or a currency and/or issuer to convert through.
pub fn is_paths(value: &Value) -> bool {
    let Some(paths) = value.as_array() else {
        return false;
    };
    !paths.is_empty()
        && paths.iter().all(|path| {
            path.as_array()
                .map_or(false, |steps| !steps.is_empty() && steps.iter().all(is_path_step))
        })
}

// ---------------------------------------------------------------------------
// Cross-chain bridge
// ---------------------------------------------------------------------------

/// The four-key bridge descriptor shared by every XChain transaction.
pub fn is_xchain_bridge(value: &Value) -> bool {
    let Some(bridge) = value.as_object() else {
        return false;
    };
    bridge.len() == XCHAIN_BRIDGE_SIZE
        && bridge.get("LockingChainDoor").map_or(false, Value::is_string)
        && bridge.get("LockingChainIssue").map_or(false, is_issued_currency)
        && bridge.get("IssuingChainDoor").map_or(false, Value::is_string)
        && bridge.get("IssuingChainIssue").map_or(false, is_issued_currency)
}

// ---------------------------------------------------------------------------
// Oracle price data
// ---------------------------------------------------------------------------

/// Checks an `OracleSet.PriceDataSeries`.
pub fn validate_price_data_series(tx: &TxRecord<'_>, series: &Value) -> Result<(), ValidationError> {
    let Some(entries) = series.as_array() else {
        return reject(tx, "PriceDataSeries must be an array");
    };
    if entries.len() > MAX_PRICE_DATA_SERIES {
        return reject(
            tx,
            format!(
                "PriceDataSeries must have at most {} PriceData objects",
                MAX_PRICE_DATA_SERIES
            ),
        );
    }

    for entry in entries {
        let Some(wrapper) = entry.as_object() else {
            return reject(tx, "PriceDataSeries must be an array of objects");
        };
        let Some(price_data) = wrapper.get("PriceData").and_then(Value::as_object) else {
            return reject(tx, "PriceDataSeries must have a `PriceData` object");
        };
        if wrapper.len() != 1 {
            return reject(tx, "PriceDataSeries must only have a single PriceData object");
        }
        if !price_data.get("BaseAsset").map_or(false, Value::is_string) {
            return reject(tx, "PriceDataSeries must have a `BaseAsset` string");
        }
        if !price_data.get("QuoteAsset").map_or(false, Value::is_string) {
            return reject(tx, "PriceDataSeries must have a `QuoteAsset` string");
        }

        let price = price_data.get("AssetPrice");
        let scale = price_data.get("Scale");
        if price.is_some() != scale.is_some() {
            return reject(
                tx,
                "PriceDataSeries must have both `AssetPrice` and `Scale` if any are present",
            );
        }

        match price {
            None | Some(Value::Number(_)) => {}
            Some(Value::String(hex)) => {
                if !is_hex(hex) {
                    return reject(tx, "Field AssetPrice must be a valid hex string");
                }
                if hex.len() > MAX_ORACLE_PRICE_HEX_LENGTH {
                    return reject(
                        tx,
                        format!(
                            "Length of AssetPrice field must be between 1 and {} characters long",
                            MAX_ORACLE_PRICE_HEX_LENGTH
                        ),
                    );
                }
            }
            Some(_) => return reject(tx, "Field AssetPrice must be a string or a number"),
        }

        if let Some(scale) = scale {
            let Some(scale) = scale.as_f64() else {
                return Err(ValidationError::invalid(tx.name(), "Scale"));
            };
            if !(0.0..=MAX_ORACLE_SCALE as f64).contains(&scale) {
                return reject(tx, format!("Scale must be in range 0-{}", MAX_ORACLE_SCALE));
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Signer lists
// ---------------------------------------------------------------------------

/// Checks `SignerListSet.SignerEntries`: 1 to 8 `SignerEntry` wrappers.
pub fn validate_signer_entries(tx: &TxRecord<'_>, entries: &Value) -> Result<(), ValidationError> {
    let Some(entries) = entries.as_array() else {
        return Err(ValidationError::invalid(tx.name(), "SignerEntries"));
    };
    if entries.is_empty() {
        return reject(tx, "need at least 1 member in SignerEntries");
    }
    if entries.len() > MAX_SIGNER_ENTRIES {
        return reject(
            tx,
            format!("maximum of {} members allowed in SignerEntries", MAX_SIGNER_ENTRIES),
        );
    }

    for entry in entries {
        let Some(signer_entry) = entry.get("SignerEntry").and_then(Value::as_object) else {
            return reject(tx, "invalid SignerEntries");
        };
        let account_ok = signer_entry.get("Account").map_or(false, Value::is_string);
        let weight_ok = signer_entry.get("SignerWeight").map_or(false, Value::is_number);
        if !account_ok || !weight_ok {
            return reject(tx, "invalid SignerEntries");
        }
        if let Some(locator) = signer_entry.get("WalletLocator") {
            if !is_ledger_entry_id(locator) {
                return reject(
                    tx,
                    "WalletLocator in SignerEntry must be a 256-bit (32-byte) hexadecimal value",
                );
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// AMM auction slot
// ---------------------------------------------------------------------------

/// Checks `AMMBid.AuthAccounts` against the sender's address.
pub fn validate_auth_accounts(
    tx: &TxRecord<'_>,
    sender: &str,
    auth_accounts: &Value,
) -> Result<(), ValidationError> {
    let Some(accounts) = auth_accounts.as_array() else {
        return reject(tx, "AuthAccounts must be an AuthAccount array");
    };
    if accounts.len() > MAX_AUTH_ACCOUNTS {
        return reject(
            tx,
            format!("AuthAccounts length must not be greater than {}", MAX_AUTH_ACCOUNTS),
        );
    }

    for entry in accounts {
        let account = entry
            .get("AuthAccount")
            .and_then(Value::as_object)
            .and_then(|auth| auth.get("Account"))
            .and_then(Value::as_str);
        match account {
            None => return reject(tx, "invalid AuthAccounts"),
            Some(account) if account == sender => {
                return reject(tx, "AuthAccounts must not include sender's address");
            }
            Some(_) => {}
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Delegated permissions
// ---------------------------------------------------------------------------

/// Transaction types an account may never hand to a delegate.
pub const NON_DELEGATABLE_TRANSACTIONS: &[TransactionType] = &[
    TransactionType::AccountSet,
    TransactionType::SetRegularKey,
    TransactionType::SignerListSet,
    TransactionType::DelegateSet,
    TransactionType::AccountDelete,
    TransactionType::Batch,
    TransactionType::EnableAmendment,
    TransactionType::SetFee,
    TransactionType::UNLModify,
];

/// Checks `DelegateSet.Permissions`.
pub fn validate_permissions(tx: &TxRecord<'_>, permissions: &Value) -> Result<(), ValidationError> {
    let Some(permissions) = permissions.as_array() else {
        return Err(ValidationError::invalid(tx.name(), "Permissions"));
    };
    if permissions.len() > MAX_DELEGATE_PERMISSIONS {
        return reject(
            tx,
            format!(
                "Permissions array length cannot be greater than {}.",
                MAX_DELEGATE_PERMISSIONS
            ),
        );
    }

    let mut seen = HashSet::with_capacity(permissions.len());
    for entry in permissions {
        let Some(permission) = entry.get("Permission").and_then(Value::as_object) else {
            return reject(tx, "Permissions array element is malformed");
        };
        let value = match permission.get("PermissionValue") {
            None | Some(Value::Null) => return reject(tx, "PermissionValue must be defined"),
            Some(Value::String(value)) => value.as_str(),
            Some(_) => return reject(tx, "PermissionValue must be a string"),
        };
        if NON_DELEGATABLE_TRANSACTIONS
            .iter()
            .any(|tx_type| tx_type.as_str() == value)
        {
            return reject(
                tx,
                format!("PermissionValue contains a non-delegatable transaction {}", value),
            );
        }
        if !seen.insert(value) {
            return reject(tx, "Permissions array cannot contain duplicate values");
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Hooks
// ---------------------------------------------------------------------------

/// Checks `SetHook.Hooks`: 1 to 4 `Hook` wrappers with 256-bit ids.
pub fn validate_hooks(tx: &TxRecord<'_>, hooks: &Value) -> Result<(), ValidationError> {
    let Some(hooks) = hooks.as_array() else {
        return reject(tx, "invalid Hooks");
    };
    if hooks.is_empty() {
        return reject(tx, "need at least 1 member in Hooks");
    }
    if hooks.len() > MAX_HOOKS {
        return reject(tx, format!("maximum of {} hooks allowed in Hooks", MAX_HOOKS));
    }

    for entry in hooks {
        let Some(hook) = entry.get("Hook").and_then(Value::as_object) else {
            return reject(tx, "invalid Hooks");
        };
        for field in ["HookOn", "HookNamespace"] {
            if let Some(value) = hook.get(field) {
                if !is_ledger_entry_id(value) {
                    return reject(
                        tx,
                        format!(
                            "{} in Hook must be a 256-bit (32-byte) hexadecimal value",
                            field
                        ),
                    );
                }
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
