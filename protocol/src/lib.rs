// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # txguard Protocol: Core Library
//!
//! Validation and canonicalization of ledger transaction records before they
//! are signed or submitted, and annotation of ledger responses after.
//!
//! Records are loosely-typed JSON objects. The library decides whether one
//! is well formed for its `TransactionType`, rewrites named flag maps into
//! their bitmask form, and flags payments that delivered less than they
//! asked for.
//!
//! ## Architecture
//!
//! - **transaction**: The dispatcher and one validator per transaction type.
//! - **amount**: Native, issued and MPT amounts, with exact decimal equality.
//! - **address**: Classic and X-address checks.
//! - **flags**: Per-type flag registry, encode/decode and canonicalization.
//! - **metadata**: XLS-89 `MPTokenMetadata` codec and linter.
//! - **partial_payment**: Partial-payment warnings on ledger responses.
//! - **config**: Protocol constants.
//! - **error**: Error types.
//!
//! ## Design Philosophy
//!
//! 1. Hard failures are `Result`s; advisories are plain lists of strings.
//! 2. Validators see one canonical form of every field they read.
//! 3. The first violation wins, and the check order never changes.
//! 4. No global mutable state. Every call is synchronous and re-entrant.

pub mod address;
pub mod amount;
pub mod config;
pub mod error;
pub mod flags;
pub mod metadata;
pub mod partial_payment;
pub mod transaction;

pub use error::{MetaDecodeError, MetadataError, ValidationError};
pub use transaction::{canonicalize, validate, validate_with_advisories, TransactionType};
