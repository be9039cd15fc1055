//! # Per-Type Validators
//!
//! One function per transaction type, grouped by ledger feature. Each one
//! checks the shared base fields first, then its own fields in a fixed
//! order, then the cross-field rules, and returns the first problem found.
//!
//! Validators see a [`TxRecord`](super::record::TxRecord) whose `Flags` are
//! already a bitmask, so flag tests are plain bit tests whatever form the
//! caller used.

pub mod account;
pub mod amm;
pub mod batch;
pub mod check;
pub mod confidential;
pub mod credential;
pub mod delegate;
pub mod did;
pub mod domain;
pub mod escrow;
pub mod hook;
pub mod loan;
pub mod mptoken;
pub mod nftoken;
pub mod offer;
pub mod oracle;
pub mod payment;
pub mod pseudo;
pub mod sponsorship;
pub mod trust;
pub mod vault;
pub mod xchain;
