//! # CLI Interface
//!
//! Defines the command-line argument structure for `txguard` using `clap`
//! derive. Input paths accept `-` for stdin.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::logging::LogFormat;

/// Offline validation and canonicalization of ledger transaction records.
///
/// Checks a transaction before it is signed or submitted, converts flag maps
/// to and from their bitmask form, works with XLS-89 token metadata, and
/// annotates ledger responses that contain partial payments.
#[derive(Parser, Debug)]
#[command(
    name = "txguard",
    about = "Ledger transaction validation and canonicalization",
    version,
    propagate_version = true
)]
pub struct TxguardCli {
    /// Log output format.
    #[arg(long, global = true, env = "TXGUARD_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Default log filter, used when `RUST_LOG` is not set.
    #[arg(
        long,
        global = true,
        env = "TXGUARD_LOG",
        default_value = "txguard=info,txguard_protocol=info"
    )]
    pub log_level: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the `txguard` binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a transaction record read from a file or stdin.
    Validate(ValidateArgs),
    /// Convert between named flag maps and bitmasks.
    #[command(subcommand)]
    Flags(FlagsCommand),
    /// Encode, decode or lint XLS-89 `MPTokenMetadata`.
    #[command(subcommand)]
    Metadata(MetadataCommand),
    /// Annotate a ledger response that contains a partial payment.
    CheckResponse(CheckResponseArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to a JSON transaction record, or `-` for stdin.
    pub input: PathBuf,

    /// Print the record with `Flags` in numeric form instead of a verdict.
    #[arg(long)]
    pub canonical: bool,
}

/// Subcommands of `flags`.
#[derive(Subcommand, Debug)]
pub enum FlagsCommand {
    /// Fold a JSON map of flag names to booleans into a bitmask.
    Encode {
        /// Transaction type the flags belong to.
        #[arg(long = "type")]
        tx_type: String,
        /// JSON object, e.g. `{"tfPartialPayment": true}`.
        flags: String,
    },
    /// Expand a bitmask into the flag names set in it.
    Decode {
        /// Transaction type the flags belong to.
        #[arg(long = "type")]
        tx_type: String,
        /// Decimal or `0x`-prefixed hexadecimal bitmask.
        bitmask: String,
    },
}

/// Subcommands of `metadata`.
#[derive(Subcommand, Debug)]
pub enum MetadataCommand {
    /// Encode a JSON metadata document to canonical hex.
    Encode {
        /// Path to a JSON document, or `-` for stdin.
        input: PathBuf,
    },
    /// Decode hex metadata to a document with long key names.
    Decode {
        /// Hex-encoded metadata.
        hex: String,
    },
    /// Report XLS-89 conformance problems. Never fails on content.
    Lint {
        /// Hex-encoded metadata.
        hex: String,
    },
}

/// Response shapes understood by `check-response`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCommand {
    /// `tx` lookup.
    Tx,
    /// `transaction_entry` lookup.
    #[value(name = "transaction_entry")]
    TransactionEntry,
    /// `account_tx` history page.
    #[value(name = "account_tx")]
    AccountTx,
    /// A `transactions` stream message.
    Stream,
}

impl ResponseCommand {
    /// The request command name this response answers.
    pub fn as_str(self) -> &'static str {
        match self {
            ResponseCommand::Tx => "tx",
            ResponseCommand::TransactionEntry => "transaction_entry",
            ResponseCommand::AccountTx => "account_tx",
            ResponseCommand::Stream => "stream",
        }
    }
}

/// Arguments for the `check-response` subcommand.
#[derive(Args, Debug)]
pub struct CheckResponseArgs {
    /// The command that produced the response.
    #[arg(long, value_enum)]
    pub command: ResponseCommand,

    /// Path to a JSON response, or `-` for stdin.
    pub input: PathBuf,
}
