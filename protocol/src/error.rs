//! Error types for transaction validation and metadata handling.
//!
//! Hard validation failures are [`ValidationError`]s. Its `Display` output is
//! the canonical, transaction-type-prefixed message that callers match on.
//! The XLS-89 codec and the binary metadata decoder have their own error
//! enums so their failures never masquerade as validation verdicts.

use thiserror::Error;

// ---------------------------------------------------------------------------
// ValidationError
// ---------------------------------------------------------------------------

/// A transaction record failed validation.
///
/// Three message shapes exist: a missing required field, a present field that
/// fails its predicate, and a transaction-specific rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent (or `null`).
    #[error("{tx_type}: missing field {field}")]
    MissingField {
        /// Prefix of the message, usually the transaction type.
        tx_type: String,
        /// Name of the missing field as reported to the caller.
        field: String,
    },

    /// A field is present but fails its shape predicate.
    #[error("{tx_type}: invalid field {field}{}", expected_suffix(.expected))]
    InvalidField {
        /// Prefix of the message, usually the transaction type.
        tx_type: String,
        /// Name of the offending field as reported to the caller.
        field: String,
        /// Optional description of what the field should have been.
        expected: Option<&'static str>,
    },

    /// A cross-field or semantic rule was violated.
    #[error("{0}")]
    Rule(String),
}

fn expected_suffix(expected: &Option<&'static str>) -> String {
    match expected {
        Some(description) => format!(", expected {}", description),
        None => String::new(),
    }
}

impl ValidationError {
    /// Shorthand for [`ValidationError::MissingField`].
    pub fn missing(tx_type: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            tx_type: tx_type.into(),
            field: field.into(),
        }
    }

    /// Shorthand for [`ValidationError::InvalidField`] without a description.
    pub fn invalid(tx_type: impl Into<String>, field: impl Into<String>) -> Self {
        Self::InvalidField {
            tx_type: tx_type.into(),
            field: field.into(),
            expected: None,
        }
    }

    /// Shorthand for [`ValidationError::Rule`].
    pub fn rule(message: impl Into<String>) -> Self {
        Self::Rule(message.into())
    }
}

// ---------------------------------------------------------------------------
// MetadataError
// ---------------------------------------------------------------------------

/// Failures of the XLS-89 `MPTokenMetadata` codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    /// The input to `decode` is not a hex string.
    #[error("MPTokenMetadata must be in hex format.")]
    NotHex,

    /// The hex payload does not decode to UTF-8 text.
    #[error("MPTokenMetadata is not properly formatted as JSON - invalid UTF-8: {0}")]
    NotUtf8(String),

    /// The decoded text is not JSON.
    #[error("MPTokenMetadata is not properly formatted as JSON - {0}")]
    InvalidJson(String),

    /// The JSON document is not an object (decode side).
    #[error("MPTokenMetadata must be a JSON object.")]
    NotObject,

    /// The value handed to `encode` is not an object.
    #[error("MPTokenMetadata must be JSON object.")]
    EncodeNotObject,

    /// Serializing the canonical document failed.
    #[error("MPTokenMetadata could not be serialized: {0}")]
    Serialize(String),
}

// ---------------------------------------------------------------------------
// MetaDecodeError
// ---------------------------------------------------------------------------

/// The binary metadata decoder could not turn a wire blob into a record.
///
/// Raised by the partial-payment detector when a response carries metadata
/// in binary form and the injected decoder rejects it. This is a transport
/// problem, not a statement about the payment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetaDecodeError {
    /// No binary codec is wired into this process.
    #[error("binary metadata decoding is not available: {blob_len} hex characters left undecoded")]
    Unsupported {
        /// Length of the blob that could not be decoded.
        blob_len: usize,
    },

    /// The decoder ran and rejected the blob.
    #[error("malformed binary metadata: {reason}")]
    Malformed {
        /// Decoder-supplied explanation.
        reason: String,
    },

    /// The decoder produced something other than a metadata object.
    #[error("decoded metadata is not an object")]
    NotAnObject,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
