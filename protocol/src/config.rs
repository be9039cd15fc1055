//! # Protocol Configuration & Constants
//!
//! Every limit the validators enforce lives here. If a bound is hardcoded
//! inside a validator instead, it will drift from the ledger's own rules the
//! first time an amendment moves it.
//!
//! These values mirror the rules enforced by `rippled`. They are not tuning
//! knobs: loosening one means accepting transactions the network will reject.

// ---------------------------------------------------------------------------
// Base Transaction
// ---------------------------------------------------------------------------

/// A memo may populate at most this many of `MemoData`, `MemoType`, `MemoFormat`.
pub const MEMO_SIZE: usize = 3;

/// A `Signer` wrapper carries exactly `Account`, `TxnSignature`, `SigningPubKey`.
pub const SIGNER_SIZE: usize = 3;

/// Standard (ISO-style) currency codes are three characters long.
pub const STANDARD_CURRENCY_CODE_LEN: usize = 3;

/// The native asset's ticker. Issued currencies may not spell it.
pub const NATIVE_CURRENCY: &str = "XRP";

/// Length of a ledger object id (Hash256) in hex characters.
pub const LEDGER_ENTRY_ID_LENGTH: usize = 64;

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Default cap on credential lists (`CredentialIDs`, `AuthorizeCredentials`).
pub const MAX_AUTHORIZED_CREDENTIALS: usize = 8;

/// `PermissionedDomainSet.AcceptedCredentials` allows a slightly larger list.
pub const MAX_ACCEPTED_CREDENTIALS: usize = 10;

/// Maximum decoded size of a `CredentialType`.
pub const MAX_CREDENTIAL_BYTE_LENGTH: usize = 64;

/// Maximum hex length of a `CredentialType`.
pub const MAX_CREDENTIAL_TYPE_LENGTH: usize = MAX_CREDENTIAL_BYTE_LENGTH * 2;

/// Maximum length (hex characters) of a credential `URI`.
pub const MAX_CREDENTIAL_URI_LENGTH: usize = 256;

// ---------------------------------------------------------------------------
// Token Metadata (XLS-89)
// ---------------------------------------------------------------------------

/// Hard cap on the decoded size of `MPTokenMetadata`.
pub const MAX_MPT_META_BYTE_LENGTH: usize = 1024;

/// Header line prepended to logged XLS-89 advisories.
pub const MPT_META_WARNING_HEADER: &str = "MPTokenMetadata is not properly formatted as JSON as per the XLS-89 standard. While adherence to this standard is not mandatory, such non-compliant MPToken's might not be discoverable by Explorers and Indexers in the XRPL ecosystem.";

/// Largest value an MPT `MaximumAmount` may take (signed 63-bit maximum).
pub const MAX_MPT_AMOUNT: u64 = 9_223_372_036_854_775_807;

// ---------------------------------------------------------------------------
// Fees & Rates
// ---------------------------------------------------------------------------

/// AMM trading fees are expressed in units of 1/100,000 and capped at 1%.
pub const AMM_MAX_TRADING_FEE: u64 = 1_000;

/// Transfer fee ceiling for NFTs and MPTs (50%, in units of 1/100,000).
pub const MAX_TRANSFER_FEE: u64 = 50_000;

/// Loan broker management fee ceiling (10%, in units of 1/10,000).
pub const MAX_MANAGEMENT_FEE_RATE: u64 = 10_000;

/// Loan broker cover-rate ceiling (100%, in units of 1/100,000).
pub const MAX_COVER_RATE: u64 = 100_000;

/// Ceiling shared by every `LoanSet` rate field.
pub const MAX_LOAN_RATE: u64 = 100_000;

/// Shortest payment interval a loan may use, in seconds.
pub const MIN_PAYMENT_INTERVAL: u64 = 60;

/// Maximum hex length of a loan or loan-broker `Data` blob.
pub const MAX_LOAN_DATA_LENGTH: usize = 512;

/// Maximum decoded size of a vault `Data` blob.
pub const VAULT_DATA_MAX_BYTE_LENGTH: usize = 256;

// ---------------------------------------------------------------------------
// Account Settings
// ---------------------------------------------------------------------------

/// Smallest non-zero `TickSize`.
pub const MIN_TICK_SIZE: u64 = 3;

/// Largest `TickSize`.
pub const MAX_TICK_SIZE: u64 = 15;

/// Tickets created by a single `TicketCreate`.
pub const MAX_TICKET_COUNT: u64 = 250;

// ---------------------------------------------------------------------------
// Array Cardinalities
// ---------------------------------------------------------------------------

/// `AMMBid.AuthAccounts` holds at most this many accounts.
pub const MAX_AUTH_ACCOUNTS: usize = 4;

/// A signer list holds at most this many entries.
pub const MAX_SIGNER_ENTRIES: usize = 8;

/// `OracleSet.PriceDataSeries` holds at most this many points.
pub const MAX_PRICE_DATA_SERIES: usize = 10;

/// Oracle price scale upper bound.
pub const MAX_ORACLE_SCALE: u64 = 10;

/// Hex-encoded oracle prices are at most 16 characters (a `u64`).
pub const MAX_ORACLE_PRICE_HEX_LENGTH: usize = 16;

/// `DelegateSet.Permissions` holds at most this many permissions.
pub const MAX_DELEGATE_PERMISSIONS: usize = 10;

/// `SetHook.Hooks` holds at most this many hooks.
pub const MAX_HOOKS: usize = 4;

// ---------------------------------------------------------------------------
// Response Warnings
// ---------------------------------------------------------------------------

/// Warning id attached to responses containing a partial payment.
pub const WARN_PARTIAL_PAYMENT_CODE: u64 = 2001;

/// Message attached alongside [`WARN_PARTIAL_PAYMENT_CODE`].
pub const WARN_PARTIAL_PAYMENT_MESSAGE: &str = "This response contains a Partial Payment";

/// Sentinel used by the ledger for metadata that predates delivered-amount tracking.
pub const METADATA_UNAVAILABLE: &str = "unavailable";

// ---------------------------------------------------------------------------
// Helper Functions
// ---------------------------------------------------------------------------

/// Returns `true` if `tick_size` is a legal `AccountSet.TickSize` value.
/// Zero clears the setting, so it is accepted alongside the 3..=15 band.
pub fn is_valid_tick_size(tick_size: u64) -> bool {
    tick_size == 0 || (MIN_TICK_SIZE..=MAX_TICK_SIZE).contains(&tick_size)
}

/// Returns `true` if `count` tickets may be created in a single transaction.
pub fn is_valid_ticket_count(count: u64) -> bool {
    (1..=MAX_TICKET_COUNT).contains(&count)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
