//! Confidential MPT transfers.
//!
//! Balances move as ElGamal ciphertexts with zero-knowledge proofs attached.
//! Nothing here can check the cryptography; the validators only make sure
//! every ciphertext, commitment and proof is present and hex encoded.

use crate::config::MAX_AUTHORIZED_CREDENTIALS;
use crate::error::ValidationError;
use crate::transaction::base::validate_base_transaction;
use crate::transaction::fields::{optional_field, required_field};
use crate::transaction::nested::{validate_credentials_list, CredentialList};
use crate::transaction::predicates::{is_account, is_hex_string, is_string};
use crate::transaction::record::TxRecord;

fn require_hex(tx: &TxRecord<'_>, fields: &[&str]) -> Result<(), ValidationError> {
    for field in fields {
        required_field(tx, field, is_hex_string)?;
    }
    Ok(())
}

fn allow_hex(tx: &TxRecord<'_>, fields: &[&str]) -> Result<(), ValidationError> {
    for field in fields {
        optional_field(tx, field, is_hex_string)?;
    }
    Ok(())
}

pub fn validate_confidential_mpt_clawback(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field(tx, "Holder", is_account)?;
    required_field(tx, "MPTokenIssuanceID", is_string)?;
    required_field(tx, "MPTAmount", is_string)?;
    require_hex(tx, &["ZKProof"])
}

pub fn validate_confidential_mpt_convert(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field(tx, "MPTokenIssuanceID", is_string)?;
    required_field(tx, "MPTAmount", is_string)?;
    require_hex(
        tx,
        &["HolderEncryptedAmount", "IssuerEncryptedAmount", "BlindingFactor"],
    )?;
    allow_hex(
        tx,
        &["AuditorEncryptedAmount", "HolderElGamalPublicKey", "ZKProof"],
    )
}

pub fn validate_confidential_mpt_convert_back(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field(tx, "MPTokenIssuanceID", is_string)?;
    required_field(tx, "MPTAmount", is_string)?;
    require_hex(
        tx,
        &[
            "HolderEncryptedAmount",
            "IssuerEncryptedAmount",
            "BlindingFactor",
            "ZKProof",
            "BalanceCommitment",
        ],
    )?;
    allow_hex(tx, &["AuditorEncryptedAmount"])
}

pub fn validate_confidential_mpt_merge_inbox(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field(tx, "MPTokenIssuanceID", is_string)?;
    Ok(())
}

pub fn validate_confidential_mpt_send(tx: &TxRecord<'_>) -> Result<(), ValidationError> {
    validate_base_transaction(tx)?;

    required_field(tx, "Destination", is_account)?;
    required_field(tx, "MPTokenIssuanceID", is_string)?;
    require_hex(
        tx,
        &[
            "SenderEncryptedAmount",
            "DestinationEncryptedAmount",
            "IssuerEncryptedAmount",
            "ZKProof",
            "AmountCommitment",
            "BalanceCommitment",
        ],
    )?;
    allow_hex(tx, &["AuditorEncryptedAmount"])?;
    validate_credentials_list(
        tx.get("CredentialIDs"),
        tx.name(),
        CredentialList::Ids,
        MAX_AUTHORIZED_CREDENTIALS,
    )
}
