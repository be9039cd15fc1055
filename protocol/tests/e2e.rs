//! End-to-end integration tests for txguard-protocol.
//!
//! These tests drive the public entry points only: the dispatcher, flag
//! canonicalization, the metadata codec and the partial-payment handler.
//! Every transaction type has a minimal well-formed fixture, and each field
//! the type requires is removed in turn to check that the failure names it.

use std::collections::BTreeSet;

use serde_json::{json, Value};

use txguard_protocol::flags::{TF_INNER_BATCH_TXN, TF_PARTIAL_PAYMENT};
use txguard_protocol::metadata::{decode_mpt_metadata, encode_mpt_metadata, lint_mpt_metadata};
use txguard_protocol::partial_payment::{handle_partial_payment, NoBinaryDecoder};
use txguard_protocol::{canonicalize, validate, validate_with_advisories, TransactionType};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

const ALICE: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
const BOB: &str = "rfmDuhDyLGgx94qiwf3YF8BUV5j6KSvE8";
const ISSUER: &str = "rLUEXYuLiQptky37CqLcm9USQpPiz5rkpD";
const CAROL: &str = "rPEPPER7kfTD9w2To4CQk6UCfuHM9c6GDY";
const GENESIS: &str = "rrrrrrrrrrrrrrrrrrrrrhoLvTp";

const LEDGER_ID: &str = "DB303FC1C7611B22C09E773B51044F6BEA02EF917DF59A2E2860871E167066A5";
const MPT_ID: &str = "000004C463C52827307480341125DA0577DEFC38405B0E3E";

fn usd(value: &str) -> Value {
    json!({"currency": "USD", "issuer": ISSUER, "value": value})
}

fn usd_issue() -> Value {
    json!({"currency": "USD", "issuer": ISSUER})
}

fn bridge() -> Value {
    json!({
        "LockingChainDoor": ALICE,
        "LockingChainIssue": {"currency": "XRP"},
        "IssuingChainDoor": CAROL,
        "IssuingChainIssue": {"currency": "XRP"},
    })
}

fn inner_payment() -> Value {
    json!({
        "TransactionType": "Payment",
        "Account": ALICE,
        "Destination": BOB,
        "Amount": "1000",
        "Flags": TF_INNER_BATCH_TXN,
    })
}

/// A minimal record of `tx_type`, with fields merged over `{TransactionType, Account}`.
fn record(tx_type: TransactionType, account: &str, fields: Value) -> Value {
    let mut tx = json!({"TransactionType": tx_type.as_str(), "Account": account});
    if let (Some(target), Value::Object(extra)) = (tx.as_object_mut(), fields) {
        target.extend(extra);
    }
    tx
}

/// One well-formed fixture per transaction type, with the fields that type
/// requires beyond `Account`.
fn fixtures() -> Vec<(TransactionType, Value, Vec<&'static str>)> {
    use TransactionType::*;

    let attestation = json!({
        "Amount": "10000000",
        "AttestationRewardAccount": ALICE,
        "AttestationSignerAccount": CAROL,
        "OtherChainSource": BOB,
        "PublicKey": "ED1F4A024ACFEBDB6C7AA88DEDE3364E060487EA31B14CC9E0D610D152B31AADC2",
        "Signature": "3044022018D7F3D1B7A0C3B4",
        "WasLockingChainSend": 1,
        "XChainBridge": bridge(),
    });
    let with_attestation = |extra: Value| {
        let mut fields = attestation.clone();
        if let (Some(target), Value::Object(extra)) = (fields.as_object_mut(), extra) {
            target.extend(extra);
        }
        fields
    };
    let attestation_fields = [
        "Amount",
        "AttestationRewardAccount",
        "AttestationSignerAccount",
        "OtherChainSource",
        "PublicKey",
        "Signature",
        "WasLockingChainSend",
        "XChainBridge",
    ];

    let entries: Vec<(TransactionType, &str, Value, Vec<&'static str>)> = vec![
        (AccountDelete, ALICE, json!({"Destination": BOB, "DestinationTag": 13}), vec!["Destination"]),
        (AccountSet, ALICE, json!({"SetFlag": 8, "Domain": "6578616D706C652E636F6D"}), vec![]),
        (
            AMMBid,
            ALICE,
            json!({
                "Asset": {"currency": "XRP"},
                "Asset2": usd_issue(),
                "AuthAccounts": [{"AuthAccount": {"Account": BOB}}],
            }),
            vec!["Asset", "Asset2"],
        ),
        (
            AMMClawback,
            ISSUER,
            json!({"Holder": BOB, "Asset": usd_issue(), "Asset2": {"currency": "XRP"}}),
            vec!["Holder", "Asset", "Asset2"],
        ),
        (
            AMMCreate,
            ALICE,
            json!({"Amount": "1000", "Amount2": usd("10"), "TradingFee": 12}),
            vec!["Amount", "Amount2", "TradingFee"],
        ),
        (
            AMMDelete,
            ALICE,
            json!({"Asset": {"currency": "XRP"}, "Asset2": usd_issue()}),
            vec!["Asset", "Asset2"],
        ),
        (
            AMMDeposit,
            ALICE,
            json!({"Asset": {"currency": "XRP"}, "Asset2": usd_issue(), "Amount": "1000"}),
            vec!["Asset", "Asset2"],
        ),
        (
            AMMVote,
            ALICE,
            json!({"Asset": {"currency": "XRP"}, "Asset2": usd_issue(), "TradingFee": 25}),
            vec!["Asset", "Asset2", "TradingFee"],
        ),
        (
            AMMWithdraw,
            ALICE,
            json!({"Asset": {"currency": "XRP"}, "Asset2": usd_issue(), "Amount": "1000"}),
            vec!["Asset", "Asset2"],
        ),
        (
            Batch,
            ALICE,
            json!({"Flags": 0x0001_0000, "RawTransactions": [{"RawTransaction": inner_payment()}]}),
            vec!["RawTransactions"],
        ),
        (CheckCancel, ALICE, json!({"CheckID": LEDGER_ID}), vec!["CheckID"]),
        (CheckCash, ALICE, json!({"CheckID": LEDGER_ID, "Amount": "100"}), vec!["CheckID"]),
        (
            CheckCreate,
            ALICE,
            json!({"Destination": BOB, "SendMax": usd("5"), "InvoiceID": LEDGER_ID}),
            vec!["Destination", "SendMax"],
        ),
        (
            Clawback,
            ISSUER,
            json!({"Amount": {"currency": "USD", "issuer": BOB, "value": "5"}}),
            vec!["Amount"],
        ),
        (
            ConfidentialMPTClawback,
            ISSUER,
            json!({
                "Holder": BOB,
                "MPTokenIssuanceID": MPT_ID,
                "MPTAmount": "100",
                "ZKProof": "ABCDEF",
            }),
            vec!["Holder", "MPTokenIssuanceID", "MPTAmount", "ZKProof"],
        ),
        (
            ConfidentialMPTConvert,
            ALICE,
            json!({
                "MPTokenIssuanceID": MPT_ID,
                "MPTAmount": "100",
                "HolderEncryptedAmount": "AB01",
                "IssuerEncryptedAmount": "AB02",
                "BlindingFactor": "AB03",
            }),
            vec![
                "MPTokenIssuanceID",
                "MPTAmount",
                "HolderEncryptedAmount",
                "IssuerEncryptedAmount",
                "BlindingFactor",
            ],
        ),
        (
            ConfidentialMPTConvertBack,
            ALICE,
            json!({
                "MPTokenIssuanceID": MPT_ID,
                "MPTAmount": "100",
                "HolderEncryptedAmount": "AB01",
                "IssuerEncryptedAmount": "AB02",
                "BlindingFactor": "AB03",
                "ZKProof": "AB04",
                "BalanceCommitment": "AB05",
            }),
            vec![
                "MPTokenIssuanceID",
                "MPTAmount",
                "HolderEncryptedAmount",
                "IssuerEncryptedAmount",
                "BlindingFactor",
                "ZKProof",
                "BalanceCommitment",
            ],
        ),
        (
            ConfidentialMPTMergeInbox,
            ALICE,
            json!({"MPTokenIssuanceID": MPT_ID}),
            vec!["MPTokenIssuanceID"],
        ),
        (
            ConfidentialMPTSend,
            ALICE,
            json!({
                "Destination": BOB,
                "MPTokenIssuanceID": MPT_ID,
                "SenderEncryptedAmount": "AB01",
                "DestinationEncryptedAmount": "AB02",
                "IssuerEncryptedAmount": "AB03",
                "ZKProof": "AB04",
                "AmountCommitment": "AB05",
                "BalanceCommitment": "AB06",
            }),
            vec![
                "Destination",
                "MPTokenIssuanceID",
                "SenderEncryptedAmount",
                "DestinationEncryptedAmount",
                "IssuerEncryptedAmount",
                "ZKProof",
                "AmountCommitment",
                "BalanceCommitment",
            ],
        ),
        (
            CredentialAccept,
            BOB,
            json!({"Issuer": ISSUER, "CredentialType": "4B5943"}),
            vec!["Issuer", "CredentialType"],
        ),
        (
            CredentialCreate,
            ISSUER,
            json!({"Subject": BOB, "CredentialType": "4B5943", "URI": "68747470733A2F2F"}),
            vec!["Subject", "CredentialType"],
        ),
        (
            CredentialDelete,
            ISSUER,
            json!({"Subject": BOB, "CredentialType": "4B5943"}),
            vec!["CredentialType"],
        ),
        (
            DelegateSet,
            ALICE,
            json!({
                "Authorize": BOB,
                "Permissions": [{"Permission": {"PermissionValue": "Payment"}}],
            }),
            vec!["Authorize", "Permissions"],
        ),
        (DepositPreauth, ALICE, json!({"Authorize": BOB}), vec![]),
        (DIDDelete, ALICE, json!({}), vec![]),
        (DIDSet, ALICE, json!({"Data": "617474657374", "URI": "6469643A"}), vec![]),
        (
            EscrowCancel,
            ALICE,
            json!({"Owner": ALICE, "OfferSequence": 7}),
            vec!["Owner", "OfferSequence"],
        ),
        (
            EscrowCreate,
            ALICE,
            json!({"Amount": "10000", "Destination": BOB, "FinishAfter": 533_257_958}),
            vec!["Amount", "Destination"],
        ),
        (
            EscrowFinish,
            BOB,
            json!({"Owner": ALICE, "OfferSequence": "7"}),
            vec!["Owner", "OfferSequence"],
        ),
        (LedgerStateFix, ALICE, json!({"LedgerFixType": 1, "Owner": BOB}), vec!["LedgerFixType"]),
        (LoanBrokerCoverClawback, ALICE, json!({"LoanBrokerID": LEDGER_ID}), vec![]),
        (
            LoanBrokerCoverDeposit,
            ALICE,
            json!({"LoanBrokerID": LEDGER_ID, "Amount": "1000"}),
            vec!["LoanBrokerID", "Amount"],
        ),
        (
            LoanBrokerCoverWithdraw,
            ALICE,
            json!({"LoanBrokerID": LEDGER_ID, "Amount": "1000", "Destination": BOB}),
            vec!["LoanBrokerID", "Amount"],
        ),
        (LoanBrokerDelete, ALICE, json!({"LoanBrokerID": LEDGER_ID}), vec!["LoanBrokerID"]),
        (
            LoanBrokerSet,
            ALICE,
            json!({"VaultID": LEDGER_ID, "ManagementFeeRate": 100, "DebtMaximum": "1e6"}),
            vec!["VaultID"],
        ),
        (LoanDelete, ALICE, json!({"LoanID": LEDGER_ID}), vec!["LoanID"]),
        (LoanManage, ALICE, json!({"LoanID": LEDGER_ID}), vec!["LoanID"]),
        (
            LoanPay,
            ALICE,
            json!({"LoanID": LEDGER_ID, "Amount": "1000"}),
            vec!["LoanID", "Amount"],
        ),
        (
            LoanSet,
            ALICE,
            json!({
                "LoanBrokerID": LEDGER_ID,
                "PrincipalRequested": "10000",
                "InterestRate": 500,
                "PaymentInterval": 3600,
                "GracePeriod": 600,
            }),
            vec!["LoanBrokerID", "PrincipalRequested"],
        ),
        (MPTokenAuthorize, BOB, json!({"MPTokenIssuanceID": MPT_ID}), vec!["MPTokenIssuanceID"]),
        (
            MPTokenIssuanceCreate,
            ISSUER,
            json!({"MaximumAmount": "9223372036854775807", "AssetScale": 2}),
            vec![],
        ),
        (
            MPTokenIssuanceDestroy,
            ISSUER,
            json!({"MPTokenIssuanceID": MPT_ID}),
            vec!["MPTokenIssuanceID"],
        ),
        (
            MPTokenIssuanceSet,
            ISSUER,
            json!({"MPTokenIssuanceID": MPT_ID, "Holder": BOB, "Flags": 1}),
            vec!["MPTokenIssuanceID"],
        ),
        (NFTokenAcceptOffer, BOB, json!({"NFTokenSellOffer": LEDGER_ID}), vec![]),
        (NFTokenBurn, ALICE, json!({"NFTokenID": LEDGER_ID}), vec!["NFTokenID"]),
        (NFTokenCancelOffer, ALICE, json!({"NFTokenOffers": [LEDGER_ID]}), vec!["NFTokenOffers"]),
        (
            NFTokenCreateOffer,
            ALICE,
            json!({"NFTokenID": LEDGER_ID, "Amount": "1000", "Flags": 1}),
            vec!["NFTokenID", "Amount"],
        ),
        (
            NFTokenMint,
            ALICE,
            json!({"NFTokenTaxon": 0, "URI": "697066733A2F2F", "TransferFee": 500, "Flags": 8}),
            vec!["NFTokenTaxon"],
        ),
        (NFTokenModify, ALICE, json!({"NFTokenID": LEDGER_ID, "Owner": BOB}), vec!["NFTokenID"]),
        (OfferCancel, ALICE, json!({"OfferSequence": 12}), vec!["OfferSequence"]),
        (
            OfferCreate,
            ALICE,
            json!({"TakerGets": "1000000", "TakerPays": usd("1")}),
            vec!["TakerGets", "TakerPays"],
        ),
        (OracleDelete, ALICE, json!({"OracleDocumentID": 1}), vec!["OracleDocumentID"]),
        (
            OracleSet,
            ALICE,
            json!({
                "OracleDocumentID": 1,
                "LastUpdateTime": 768_062_172,
                "Provider": "70726F7669646572",
                "AssetClass": "63757272656E6379",
                "PriceDataSeries": [{"PriceData": {
                    "BaseAsset": "XRP",
                    "QuoteAsset": "USD",
                    "AssetPrice": 740,
                    "Scale": 3,
                }}],
            }),
            vec!["OracleDocumentID", "LastUpdateTime"],
        ),
        (Payment, ALICE, json!({"Destination": BOB, "Amount": "1000"}), vec!["Amount", "Destination"]),
        (PaymentChannelClaim, BOB, json!({"Channel": LEDGER_ID, "Balance": "1000"}), vec!["Channel"]),
        (
            PaymentChannelCreate,
            ALICE,
            json!({
                "Amount": "10000",
                "Destination": BOB,
                "SettleDelay": 86_400,
                "PublicKey": "32D2471DB72B27E3310F355BB33E339BF26F8392D5A93D3BC0FC3B566612DA0F0A",
            }),
            vec!["Amount", "Destination", "SettleDelay", "PublicKey"],
        ),
        (
            PaymentChannelFund,
            ALICE,
            json!({"Channel": LEDGER_ID, "Amount": "200000"}),
            vec!["Channel", "Amount"],
        ),
        (PermissionedDomainDelete, ALICE, json!({"DomainID": LEDGER_ID}), vec!["DomainID"]),
        (
            PermissionedDomainSet,
            ALICE,
            json!({
                "AcceptedCredentials": [{"Credential": {"Issuer": ISSUER, "CredentialType": "4B5943"}}],
            }),
            vec!["AcceptedCredentials"],
        ),
        (
            SetHook,
            ALICE,
            json!({"Hooks": [{"Hook": {
                "CreateCode": "0061736D01000000",
                "HookOn": LEDGER_ID,
                "HookNamespace": LEDGER_ID,
                "HookApiVersion": 0,
            }}]}),
            vec!["Hooks"],
        ),
        (SetRegularKey, ALICE, json!({"RegularKey": CAROL}), vec![]),
        (
            SignerListSet,
            ALICE,
            json!({
                "SignerQuorum": 2,
                "SignerEntries": [
                    {"SignerEntry": {"Account": BOB, "SignerWeight": 1}},
                    {"SignerEntry": {"Account": CAROL, "SignerWeight": 1}},
                ],
            }),
            vec!["SignerQuorum", "SignerEntries"],
        ),
        (SponsorshipSet, ALICE, json!({"Sponsee": BOB, "ReserveCount": 2}), vec![]),
        (TicketCreate, ALICE, json!({"TicketCount": 10}), vec!["TicketCount"]),
        (TrustSet, ALICE, json!({"LimitAmount": usd("100"), "QualityIn": 0}), vec!["LimitAmount"]),
        (
            VaultClawback,
            ISSUER,
            json!({"VaultID": LEDGER_ID, "Holder": BOB, "Amount": usd("1")}),
            vec!["VaultID", "Holder"],
        ),
        (VaultCreate, ALICE, json!({"Asset": usd_issue(), "Data": "AB"}), vec!["Asset"]),
        (VaultDelete, ALICE, json!({"VaultID": LEDGER_ID}), vec!["VaultID"]),
        (
            VaultDeposit,
            BOB,
            json!({"VaultID": LEDGER_ID, "Amount": usd("10")}),
            vec!["VaultID", "Amount"],
        ),
        (VaultSet, ALICE, json!({"VaultID": LEDGER_ID, "AssetsMaximum": "1000"}), vec!["VaultID"]),
        (
            VaultWithdraw,
            BOB,
            json!({"VaultID": LEDGER_ID, "Amount": usd("10"), "Destination": CAROL}),
            vec!["VaultID", "Amount"],
        ),
        (
            XChainAccountCreateCommit,
            ALICE,
            json!({
                "XChainBridge": bridge(),
                "SignatureReward": "100",
                "Destination": BOB,
                "Amount": "10000000",
            }),
            vec!["XChainBridge", "SignatureReward", "Destination", "Amount"],
        ),
        (
            XChainAddAccountCreateAttestation,
            ALICE,
            with_attestation(json!({
                "Destination": CAROL,
                "SignatureReward": "100",
                "XChainAccountCreateCount": "2",
            })),
            attestation_fields
                .iter()
                .copied()
                .chain(["Destination", "SignatureReward", "XChainAccountCreateCount"])
                .collect(),
        ),
        (
            XChainAddClaimAttestation,
            ALICE,
            with_attestation(json!({"XChainClaimID": 3, "Destination": CAROL})),
            attestation_fields.iter().copied().chain(["XChainClaimID"]).collect(),
        ),
        (
            XChainClaim,
            ALICE,
            json!({
                "XChainBridge": bridge(),
                "XChainClaimID": "13",
                "Destination": BOB,
                "Amount": "10000",
            }),
            vec!["XChainBridge", "XChainClaimID", "Destination", "Amount"],
        ),
        (
            XChainCommit,
            ALICE,
            json!({
                "XChainBridge": bridge(),
                "XChainClaimID": 5,
                "OtherChainDestination": BOB,
                "Amount": "10000",
            }),
            vec!["XChainBridge", "XChainClaimID", "Amount"],
        ),
        (
            XChainCreateBridge,
            ALICE,
            json!({"XChainBridge": bridge(), "SignatureReward": "200", "MinAccountCreateAmount": "1000000"}),
            vec!["XChainBridge", "SignatureReward"],
        ),
        (
            XChainCreateClaimID,
            ALICE,
            json!({"XChainBridge": bridge(), "SignatureReward": "100", "OtherChainSource": BOB}),
            vec!["XChainBridge", "SignatureReward", "OtherChainSource"],
        ),
        (
            XChainModifyBridge,
            ALICE,
            json!({"XChainBridge": bridge(), "SignatureReward": "300"}),
            vec!["XChainBridge"],
        ),
        (
            EnableAmendment,
            GENESIS,
            json!({"Amendment": LEDGER_ID, "LedgerSequence": 21_225_473}),
            vec!["Amendment", "LedgerSequence"],
        ),
        (
            SetFee,
            GENESIS,
            json!({
                "BaseFeeDrops": "10",
                "ReserveBaseDrops": "10000000",
                "ReserveIncrementDrops": "2000000",
            }),
            vec!["BaseFeeDrops", "ReserveBaseDrops", "ReserveIncrementDrops"],
        ),
        (
            UNLModify,
            GENESIS,
            json!({
                "LedgerSequence": 1_600_000,
                "UNLModifyDisabling": 1,
                "UNLModifyValidator": "EDB6FC8E803EE8EDC2793F1EC917B2EE41D35255618DEB91D3F9B1FC89B75D4539",
            }),
            vec!["LedgerSequence", "UNLModifyDisabling", "UNLModifyValidator"],
        ),
    ];

    entries
        .into_iter()
        .map(|(tx_type, account, fields, required)| {
            (tx_type, record(tx_type, account, fields), required)
        })
        .collect()
}

fn error_of(tx: &Value) -> String {
    match validate(tx) {
        Ok(()) => panic!("expected failure for {}", tx),
        Err(err) => err.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

#[test]
fn every_transaction_type_has_a_fixture() {
    let covered: BTreeSet<TransactionType> = fixtures().iter().map(|(t, _, _)| *t).collect();
    let all: BTreeSet<TransactionType> = TransactionType::ALL.iter().copied().collect();
    assert_eq!(covered, all);
}

#[test]
fn every_fixture_validates() {
    for (tx_type, tx, _) in fixtures() {
        if let Err(err) = validate(&tx) {
            panic!("{} fixture rejected: {}", tx_type, err);
        }
    }
}

#[test]
fn removing_a_required_field_names_it() {
    for (tx_type, tx, required) in fixtures() {
        for field in std::iter::once("Account").chain(required) {
            let mut stripped = tx.clone();
            stripped.as_object_mut().unwrap().remove(field);

            let message = error_of(&stripped);
            assert!(
                message.ends_with(&format!("missing field {}", field)),
                "{} without {}: {}",
                tx_type,
                field,
                message
            );
        }
    }
}

#[test]
fn null_required_field_counts_as_missing() {
    let mut tx = record(
        TransactionType::CheckCancel,
        ALICE,
        json!({"CheckID": Value::Null}),
    );
    assert_eq!(error_of(&tx), "CheckCancel: missing field CheckID");

    tx["CheckID"] = json!(LEDGER_ID);
    assert!(validate(&tx).is_ok());
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn amm_clawback_holder_cannot_be_the_issuer() {
    let tx = record(
        TransactionType::AMMClawback,
        ISSUER,
        json!({"Holder": ISSUER, "Asset": usd_issue(), "Asset2": {"currency": "XRP"}}),
    );
    assert_eq!(error_of(&tx), "AMMClawback: Holder and Asset.issuer must be distinct");
}

#[test]
fn mpt_maximum_amount_is_bounded_to_63_bits() {
    let tx = record(
        TransactionType::MPTokenIssuanceCreate,
        ISSUER,
        json!({"MaximumAmount": "9223372036854775808"}),
    );
    assert_eq!(error_of(&tx), "MPTokenIssuanceCreate: MaximumAmount out of range");
}

#[test]
fn deliver_min_requires_partial_payment_flag() {
    let mut tx = record(
        TransactionType::Payment,
        ALICE,
        json!({"Destination": BOB, "Amount": "1000", "DeliverMin": "500"}),
    );
    assert_eq!(
        error_of(&tx),
        "PaymentTransaction: tfPartialPayment flag required with DeliverMin"
    );

    tx["Flags"] = json!(TF_PARTIAL_PAYMENT);
    assert!(validate(&tx).is_ok());
}

#[test]
fn oracle_price_series_is_capped_at_ten() {
    let entry = json!({"PriceData": {"BaseAsset": "XRP", "QuoteAsset": "USD"}});
    let tx = record(
        TransactionType::OracleSet,
        ALICE,
        json!({
            "OracleDocumentID": 1,
            "LastUpdateTime": 768_062_172,
            "PriceDataSeries": vec![entry; 11],
        }),
    );
    assert_eq!(
        error_of(&tx),
        "OracleSet: PriceDataSeries must have at most 10 PriceData objects"
    );
}

#[test]
fn batches_cannot_nest() {
    let mut inner = record(
        TransactionType::Batch,
        ALICE,
        json!({"RawTransactions": [{"RawTransaction": inner_payment()}]}),
    );
    inner["Flags"] = json!(TF_INNER_BATCH_TXN);
    let tx = record(
        TransactionType::Batch,
        ALICE,
        json!({"RawTransactions": [{"RawTransaction": inner}]}),
    );
    assert_eq!(
        error_of(&tx),
        "Batch: RawTransactions[0] is a Batch transaction. Cannot nest Batch transactions."
    );
}

#[test]
fn batch_inner_transactions_are_fully_validated() {
    let mut inner = inner_payment();
    inner["Amount"] = json!({"currency": "USD", "issuer": ISSUER});
    let tx = record(
        TransactionType::Batch,
        ALICE,
        json!({"RawTransactions": [{"RawTransaction": inner}]}),
    );
    assert_eq!(error_of(&tx), "PaymentTransaction: invalid Amount");
}

#[test]
fn batch_inner_flag_errors_are_reported() {
    let mut inner = inner_payment();
    inner["Flags"] = json!({"tfInnerBatchTxn": true, "tfTypo": true});
    let tx = record(
        TransactionType::Batch,
        ALICE,
        json!({"RawTransactions": [{"RawTransaction": inner}]}),
    );
    assert!(error_of(&tx).starts_with("Invalid flag tfTypo."));
}

#[test]
fn unknown_flag_names_are_rejected() {
    let tx = record(
        TransactionType::Payment,
        ALICE,
        json!({"Destination": BOB, "Amount": "1000", "Flags": {"tfRenew": true}}),
    );
    assert!(error_of(&tx).starts_with("Invalid flag tfRenew."));
}

#[test]
fn canonical_form_matches_numeric_flags() {
    let named = record(
        TransactionType::OfferCreate,
        ALICE,
        json!({
            "TakerGets": "1000000",
            "TakerPays": usd("1"),
            "Flags": {"tfPassive": true, "tfSell": true, "tfFillOrKill": false},
        }),
    );
    let canonical = canonicalize(&named).unwrap();
    assert_eq!(canonical["Flags"], json!(0x0001_0000 | 0x0008_0000));
    assert!(validate(&canonical).is_ok());
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

fn conforming_metadata() -> Value {
    json!({
        "ticker": "TBILL",
        "name": "T-Bill Yield Token",
        "icon": "https://example.org/tbill.png",
        "asset_class": "rwa",
        "asset_subclass": "treasury",
        "issuer_name": "Example Yield Co.",
        "uris": [{"uri": "https://example.org", "category": "website", "title": "Home"}],
        "additional_info": {"interest_rate": "5.00%"},
    })
}

#[test]
fn conforming_metadata_produces_no_advisories() {
    let hex = encode_mpt_metadata(&conforming_metadata()).unwrap();
    assert!(lint_mpt_metadata(&hex).is_empty());

    let tx = record(
        TransactionType::MPTokenIssuanceCreate,
        ISSUER,
        json!({"MPTokenMetadata": hex}),
    );
    assert_eq!(validate_with_advisories(&tx).unwrap(), Vec::<String>::new());
}

#[test]
fn non_conforming_metadata_is_advisory_only() {
    let hex = encode_mpt_metadata(&json!({"ticker": "tbill"})).unwrap();
    let tx = record(TransactionType::VaultCreate, ALICE, json!({
        "Asset": {"currency": "XRP"},
        "MPTokenMetadata": hex,
    }));

    let advisories = validate_with_advisories(&tx).unwrap();
    assert!(!advisories.is_empty());
    assert!(validate(&tx).is_ok());
}

#[test]
fn metadata_decodes_to_long_names() {
    let compact = json!({"t": "TBILL", "n": "T-Bill", "ac": "rwa"});
    let decoded = decode_mpt_metadata(&encode_mpt_metadata(&compact).unwrap()).unwrap();
    assert_eq!(decoded, json!({"ticker": "TBILL", "name": "T-Bill", "asset_class": "rwa"}));
}

// ---------------------------------------------------------------------------
// Partial payments
// ---------------------------------------------------------------------------

#[test]
fn partial_payment_response_is_annotated() {
    let mut tx = record(
        TransactionType::Payment,
        ALICE,
        json!({"Destination": BOB, "Amount": usd("100"), "Flags": TF_PARTIAL_PAYMENT}),
    );
    assert!(validate(&tx).is_ok());

    tx["meta"] = json!({"delivered_amount": usd("99.99"), "TransactionResult": "tesSUCCESS"});
    let mut response = json!({"id": 1, "result": tx, "type": "response"});

    let flagged = handle_partial_payment("tx", &mut response, &NoBinaryDecoder).unwrap();
    assert!(flagged);
    assert_eq!(
        response["warnings"],
        json!([{"id": 2001, "message": "This response contains a Partial Payment"}])
    );
}
