//! # Token Metadata (XLS-89)
//!
//! `MPTokenMetadata` is a hex-encoded JSON document describing a
//! multi-purpose token: ticker, name, icon, asset class and so on. Every
//! field has a long name and a compact one (`ticker` / `t`), and documents
//! may use either.
//!
//! ## Architecture
//!
//! ```text
//! fields.rs  Field table: long/compact names and the rule each field follows
//! codec.rs   Canonical encode (compact keys, sorted, uppercase hex) and decode
//! lint.rs    Advisory conformance checks; never fails a transaction
//! ```
//!
//! The codec is strict: malformed input is a [`MetadataError`]. The linter is
//! not: it returns plain strings that validators log and hand back to the
//! caller next to a successful validation.
//!
//! [`MetadataError`]: crate::error::MetadataError

pub mod codec;
pub mod fields;
pub mod lint;

pub use codec::{decode_mpt_metadata, encode_mpt_metadata};
pub use fields::{FieldMapping, MetaField, MetaRule, MPT_META_FIELDS, MPT_META_URI_FIELDS, URIS};
pub use lint::{lint_mpt_metadata, report_mpt_metadata};
