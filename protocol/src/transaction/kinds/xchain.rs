//! Cross-chain bridges.
//!
//! Every XChain transaction names its bridge with the same four-key
//! descriptor; attestations additionally carry the witness server's signing
//! details.

use crate::error::ValidationError;
use crate::transaction::base::validate_base_transaction;
use crate::transaction::fields::{optional_field, required_field};
use crate::transaction::nested::is_xchain_bridge;
use crate::transaction::predicates::{
    is_account, is_amount, is_number, is_number_or_numeric_string, is_string, is_zero_or_one,
};
use crate::transaction::record::TxRecord;

fn require_bridge(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    required_field(tx, "XChainBridge", is_xchain_bridge)?;
    Ok(())
}

/// Fields shared by both attestation types.
fn validate_attestation(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    required_field(tx, "Amount", is_amount)?;
    required_field(tx, "AttestationRewardAccount", is_account)?;
    required_field(tx, "AttestationSignerAccount", is_account)?;
    required_field(tx, "OtherChainSource", is_account)?;
    required_field(tx, "PublicKey", is_string)?;
    required_field(tx, "Signature", is_string)?;
    required_field(tx, "WasLockingChainSend", is_zero_or_one)?;
    Ok(())
}

pub fn validate_xchain_account_create_commit(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    require_bridge(tx)?;
    required_field(tx, "SignatureReward", is_amount)?;
    required_field(tx, "Destination", is_account)?;
    required_field(tx, "Amount", is_amount)?;
    Ok(())
}

pub fn validate_xchain_add_account_create_attestation(
    tx: &TxRecord<'_>,
) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    validate_attestation(tx)?;
    required_field(tx, "Destination", is_account)?;
    required_field(tx, "SignatureReward", is_amount)?;
    required_field(tx, "XChainAccountCreateCount", is_number_or_numeric_string)?;
    require_bridge(tx)
}

pub fn validate_xchain_add_claim_attestation(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    validate_attestation(tx)?;
    optional_field(tx, "Destination", is_account)?;
    required_field(tx, "XChainClaimID", is_number_or_numeric_string)?;
    require_bridge(tx)
}

pub fn validate_xchain_claim(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    require_bridge(tx)?;
    required_field(tx, "XChainClaimID", is_number_or_numeric_string)?;
    required_field(tx, "Destination", is_account)?;
    optional_field(tx, "DestinationTag", is_number)?;
    required_field(tx, "Amount", is_amount)?;
    Ok(())
}

pub fn validate_xchain_commit(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    require_bridge(tx)?;
    required_field(tx, "XChainClaimID", is_number_or_numeric_string)?;
    optional_field(tx, "OtherChainDestination", is_account)?;
    required_field(tx, "Amount", is_amount)?;
    Ok(())
}

pub fn validate_xchain_create_bridge(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    require_bridge(tx)?;
    required_field(tx, "SignatureReward", is_amount)?;
    optional_field(tx, "MinAccountCreateAmount", is_amount)?;
    Ok(())
}

pub fn validate_xchain_create_claim_id(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    require_bridge(tx)?;
    required_field(tx, "SignatureReward", is_amount)?;
    required_field(tx, "OtherChainSource", is_account)?;
    Ok(())
}

pub fn validate_xchain_modify_bridge(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    require_bridge(tx)?;
    optional_field(tx, "SignatureReward", is_amount)?;
    optional_field(tx, "MinAccountCreateAmount", is_amount)?;
    Ok(())
}
