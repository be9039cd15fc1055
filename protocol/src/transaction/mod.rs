//! # Transaction Module
//!
//! Validation and canonicalization of loosely-typed transaction records.
//! Records arrive as JSON objects; [`validate`] either accepts one in full
//! or reports the first rule it breaks.
//!
//! ## Architecture
//!
//! ```text
//! types.rs        Closed TransactionType enum, decoded once at the boundary
//! record.rs       TxRecord: a typed view with canonical Flags
//! predicates.rs   Shape predicates over JSON values
//! fields.rs       Required/optional field combinators and error messages
//! nested.rs       Memos, signers, credentials, price data, paths
//! base.rs         Fields shared by every transaction type
//! kinds/          One validator per transaction type, grouped by family
//! verification.rs Dispatcher: boundary, cross-cutting passes, per-type match
//! ```
//!
//! ## Validation Order
//!
//! 1. **Boundary**: object with a known `TransactionType`.
//! 2. **Cross-cutting**: memos are hex; no issued currency named `XRP`.
//! 3. **Flags**: canonicalized to a bitmask.
//! 4. **Per-type**: base fields first, then the type's own rules.
//!
//! Per-type validators never see the named-map form of `Flags`. They test
//! bits through [`TxRecord::has_flag`].

pub mod base;
pub mod fields;
pub mod kinds;
pub mod nested;
pub mod predicates;
pub mod record;
pub mod types;
pub mod verification;

pub use base::{validate_base_transaction, BaseTransaction};
pub use record::TxRecord;
pub use types::{TransactionType, UnknownTransactionType};
pub use verification::{canonicalize, validate, validate_with_advisories};
