//! # Partial-Payment Detection
//!
//! A Payment flagged `tfPartialPayment` may deliver less than its `Amount`.
//! Ledger responses that contain such a payment are annotated with a warning
//! so callers do not mistake the requested amount for the delivered one.
//!
//! ## Response Shapes
//!
//! ```text
//! tx                 result.tx_json (v2) or result (v1), with result.meta
//! transaction_entry  result.tx_json, with result.metadata
//! account_tx         result.transactions[i].tx_json (v2) or .tx (v1), with .meta
//! stream             transaction (v1) or tx_json (v2), with meta
//! ```
//!
//! Metadata may still be in its binary wire form (a hex string). Decoding it
//! is delegated to a [`MetadataDecoder`]; the sentinel `"unavailable"` marks
//! transactions validated before delivered amounts were tracked and is never
//! decoded.

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::amount::amounts_equal;
use crate::config::{METADATA_UNAVAILABLE, WARN_PARTIAL_PAYMENT_CODE, WARN_PARTIAL_PAYMENT_MESSAGE};
use crate::error::MetaDecodeError;
use crate::flags::{is_flag_enabled, TF_PARTIAL_PAYMENT};
use crate::transaction::TransactionType;

// ---------------------------------------------------------------------------
// Decoder seam
// ---------------------------------------------------------------------------

/// Turns binary-encoded transaction metadata into its JSON form.
pub trait MetadataDecoder {
    /// Decodes the hex `blob` into a metadata object.
    fn decode(&self, blob: &str) -> Result<Value, MetaDecodeError>;
}

/// A decoder for processes without a binary codec. Every blob is rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBinaryDecoder;

impl MetadataDecoder for NoBinaryDecoder {
    fn decode(&self, blob: &str) -> Result<Value, MetaDecodeError> {
        Err(MetaDecodeError::Unsupported {
            blob_len: blob.len(),
        })
    }
}

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

fn partial_payment_flag(flags: Option<&Value>) -> bool {
    match flags {
        Some(Value::Number(bits)) => bits
            .as_u64()
            .and_then(|bits| u32::try_from(bits).ok())
            .map_or(false, |bits| is_flag_enabled(bits, TF_PARTIAL_PAYMENT)),
        Some(Value::Object(named)) => named
            .get("tfPartialPayment")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        _ => false,
    }
}

/// Returns `true` if `tx` is a partial-payment-flagged Payment whose
/// delivered amount, per `metadata`, differs from the most it could deliver.
///
/// The most it could deliver is `DeliverMax`, falling back to `Amount`.
///
/// # Errors
///
/// Fails only when `metadata` is a binary blob the decoder rejects. A
/// missing delivered amount is not an error.
pub fn is_partial_payment(
    tx: Option<&Value>,
    metadata: Option<&Value>,
    decoder: &dyn MetadataDecoder,
) -> Result<bool, MetaDecodeError> {
    let (Some(tx), Some(metadata)) = (tx, metadata) else {
        return Ok(false);
    };
    let is_payment =
        tx.get("TransactionType").and_then(Value::as_str) == Some(TransactionType::Payment.as_str());
    if !is_payment || metadata.is_null() {
        return Ok(false);
    }

    let decoded;
    let metadata = match metadata {
        Value::String(blob) if blob == METADATA_UNAVAILABLE => return Ok(false),
        Value::String(blob) => {
            decoded = decoder.decode(blob)?;
            if !decoded.is_object() {
                return Err(MetaDecodeError::NotAnObject);
            }
            &decoded
        }
        other => other,
    };

    if !partial_payment_flag(tx.get("Flags")) {
        return Ok(false);
    }

    let delivered = match metadata.get("delivered_amount") {
        None | Some(Value::Null) => return Ok(false),
        Some(Value::String(text)) if text == METADATA_UNAVAILABLE => return Ok(false),
        Some(delivered) => delivered,
    };
    let Some(requested) = tx.get("DeliverMax").or_else(|| tx.get("Amount")) else {
        return Ok(false);
    };

    Ok(!amounts_equal(delivered, requested))
}

fn partial_payment_warning() -> Value {
    json!({
        "id": WARN_PARTIAL_PAYMENT_CODE,
        "message": WARN_PARTIAL_PAYMENT_MESSAGE,
    })
}

/// Appends the partial-payment warning to `target["warnings"]`, creating
/// the array when it is absent. A non-array value already there becomes the
/// first element of the new array.
fn push_warning(target: &mut Value) {
    let Some(object) = target.as_object_mut() else {
        return;
    };
    let warnings = object
        .entry("warnings")
        .or_insert_with(|| Value::Array(Vec::new()));
    if !warnings.is_array() {
        debug!(existing = %warnings, "wrapping non-array warnings value");
        let existing = warnings.take();
        *warnings = Value::Array(vec![existing]);
    }
    if let Value::Array(list) = warnings {
        list.push(partial_payment_warning());
    }
}

fn response_has_partial_payment(
    command: &str,
    response: &Value,
    decoder: &dyn MetadataDecoder,
) -> Result<bool, MetaDecodeError> {
    let Some(result) = response.get("result") else {
        return Ok(false);
    };

    match command {
        "tx" => {
            let tx = result.get("tx_json").or(Some(result));
            is_partial_payment(tx, result.get("meta"), decoder)
        }
        "transaction_entry" => {
            is_partial_payment(result.get("tx_json"), result.get("metadata"), decoder)
        }
        "account_tx" => {
            let transactions = result.get("transactions").and_then(Value::as_array);
            for entry in transactions.into_iter().flatten() {
                let tx = entry.get("tx_json").or_else(|| entry.get("tx"));
                if is_partial_payment(tx, entry.get("meta"), decoder)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        _ => Ok(false),
    }
}

/// Checks the response to `command` for a partial payment and, if one is
/// found, appends the warning `{id: 2001, message}` to `response.warnings`.
///
/// Commands other than `tx`, `transaction_entry` and `account_tx` are left
/// untouched. Returns whether a warning was added.
pub fn handle_partial_payment(
    command: &str,
    response: &mut Value,
    decoder: &dyn MetadataDecoder,
) -> Result<bool, MetaDecodeError> {
    if !response_has_partial_payment(command, response, decoder)? {
        return Ok(false);
    }

    warn!(command, "response contains a partial payment");
    push_warning(response);
    Ok(true)
}

/// Stream counterpart of [`handle_partial_payment`].
///
/// On detection the warning is appended to `stream.warnings` and `log` is
/// called with `"Partial payment received"` and the annotated stream message.
pub fn handle_stream_partial_payment(
    stream: &mut Value,
    decoder: &dyn MetadataDecoder,
    mut log: impl FnMut(&str, &str),
) -> Result<bool, MetaDecodeError> {
    let tx = stream.get("transaction").or_else(|| stream.get("tx_json"));
    if !is_partial_payment(tx, stream.get("meta"), decoder)? {
        return Ok(false);
    }

    warn!("stream transaction is a partial payment");
    push_warning(stream);
    log("Partial payment received", &stream.to_string());
    Ok(true)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
