// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # txguard
//!
//! Entry point for the `txguard` binary. Parses CLI arguments, initializes
//! logging, and runs one offline command against the protocol library.
//!
//! The binary supports five subcommands:
//!
//! - `validate`       check a transaction record, optionally canonicalizing it
//! - `flags`          encode a flag map or decode a bitmask
//! - `metadata`       XLS-89 encode, decode and lint
//! - `check-response` annotate a ledger response carrying a partial payment
//! - `version`        print build version information

mod cli;
mod logging;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use txguard_protocol::flags::{decode_flags, encode_flags};
use txguard_protocol::metadata::{decode_mpt_metadata, encode_mpt_metadata, lint_mpt_metadata};
use txguard_protocol::partial_payment::{
    handle_partial_payment, handle_stream_partial_payment, NoBinaryDecoder,
};
use txguard_protocol::{canonicalize, validate_with_advisories, TransactionType, ValidationError};

use cli::{
    CheckResponseArgs, Commands, FlagsCommand, MetadataCommand, ResponseCommand, TxguardCli,
    ValidateArgs,
};

fn main() -> Result<ExitCode> {
    let cli = TxguardCli::parse();
    logging::init_logging(&cli.log_level, cli.log_format);

    match cli.command {
        Commands::Validate(args) => run_validate(args),
        Commands::Flags(command) => run_flags(command).map(|_| ExitCode::SUCCESS),
        Commands::Metadata(command) => run_metadata(command).map(|_| ExitCode::SUCCESS),
        Commands::CheckResponse(args) => run_check_response(args).map(|_| ExitCode::SUCCESS),
        Commands::Version => {
            print_version();
            Ok(ExitCode::SUCCESS)
        }
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Reads `path` as text, treating `-` as stdin.
fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn read_json(path: &Path) -> Result<Value> {
    let text = read_input(path)?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

/// Renders the stdout report for a record, or the first rule it breaks.
fn validate_report(tx: &Value, canonical: bool) -> Result<String, ValidationError> {
    let advisories = validate_with_advisories(tx)?;

    if canonical {
        let canonical = canonicalize(tx)?;
        return Ok(serde_json::to_string_pretty(&canonical).unwrap_or_default());
    }

    let tx_type = tx
        .get("TransactionType")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let mut lines = vec![format!("valid {}", tx_type)];
    lines.extend(advisories);
    Ok(lines.join("\n"))
}

fn run_validate(args: ValidateArgs) -> Result<ExitCode> {
    let tx = read_json(&args.input)?;

    match validate_report(&tx, args.canonical) {
        Ok(report) => {
            println!("{}", report);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::debug!(input = %args.input.display(), "validation failed");
            eprintln!("{}", err);
            Ok(ExitCode::FAILURE)
        }
    }
}

// ---------------------------------------------------------------------------
// flags
// ---------------------------------------------------------------------------

/// Parses a decimal or `0x`-prefixed hexadecimal bitmask.
fn parse_bitmask(text: &str) -> Result<u32> {
    let text = text.trim();
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => text.parse::<u32>(),
    };
    parsed.with_context(|| format!("invalid bitmask: {}", text))
}

fn encode_flag_map(tx_type: &str, flags: &str) -> Result<u32> {
    let tx_type: TransactionType = tx_type.parse()?;
    let map: Value = serde_json::from_str(flags).context("flags must be a JSON object")?;
    let Value::Object(map) = map else {
        bail!("flags must be a JSON object");
    };

    let named = map
        .iter()
        .map(|(name, enabled)| {
            enabled
                .as_bool()
                .map(|enabled| (name.as_str(), enabled))
                .ok_or_else(|| anyhow!("flag {} must be true or false", name))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(encode_flags(named, tx_type)?)
}

fn decode_bitmask(tx_type: &str, bitmask: &str) -> Result<Value> {
    let tx_type: TransactionType = tx_type.parse()?;
    let decoded = decode_flags(parse_bitmask(bitmask)?, tx_type);
    Ok(serde_json::to_value(decoded)?)
}

fn run_flags(command: FlagsCommand) -> Result<()> {
    match command {
        FlagsCommand::Encode { tx_type, flags } => {
            println!("{}", encode_flag_map(&tx_type, &flags)?);
        }
        FlagsCommand::Decode { tx_type, bitmask } => {
            let decoded = decode_bitmask(&tx_type, &bitmask)?;
            println!("{}", serde_json::to_string_pretty(&decoded)?);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// metadata
// ---------------------------------------------------------------------------

fn run_metadata(command: MetadataCommand) -> Result<()> {
    match command {
        MetadataCommand::Encode { input } => {
            let document = read_json(&input)?;
            println!("{}", encode_mpt_metadata(&document)?);
        }
        MetadataCommand::Decode { hex } => {
            let document = decode_mpt_metadata(hex.trim())?;
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        MetadataCommand::Lint { hex } => {
            let advisories = lint_mpt_metadata(hex.trim());
            if advisories.is_empty() {
                tracing::info!("metadata conforms to XLS-89");
            }
            for advisory in advisories {
                println!("{}", advisory);
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// check-response
// ---------------------------------------------------------------------------

/// Annotates `response` in place. Returns whether a warning was added.
fn check_response(command: ResponseCommand, response: &mut Value) -> Result<bool> {
    let decoder = NoBinaryDecoder;
    let annotated = match command {
        ResponseCommand::Stream => {
            handle_stream_partial_payment(response, &decoder, |message, body| {
                tracing::warn!(body, "{}", message);
            })
        }
        other => handle_partial_payment(other.as_str(), response, &decoder),
    };
    annotated.with_context(|| format!("failed to inspect {} response", command.as_str()))
}

fn run_check_response(args: CheckResponseArgs) -> Result<()> {
    let mut response = read_json(&args.input)?;
    let annotated = check_response(args.command, &mut response)?;
    tracing::info!(command = args.command.as_str(), annotated, "response checked");
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// version
// ---------------------------------------------------------------------------

/// Prints version information to stdout.
fn print_version() {
    println!("txguard           {}", env!("CARGO_PKG_VERSION"));
    println!("transaction types {}", TransactionType::ALL.len());
    println!("rustc             {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}
