//! The closed set of transaction type tags.
//!
//! A record's `TransactionType` string is turned into a [`TransactionType`]
//! once, at the input boundary. After that the dispatcher matches on the enum
//! exhaustively, so adding a variant without a validator does not compile.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TransactionType
// ---------------------------------------------------------------------------

macro_rules! transaction_types {
    ($($(#[$meta:meta])* $variant:ident),+ $(,)?) => {
        /// Discriminant for the operation a transaction record represents.
        ///
        /// The variant names are the wire tags, character for character.
        #[allow(clippy::upper_case_acronyms)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum TransactionType {
            $($(#[$meta])* $variant,)+
        }

        impl TransactionType {
            /// Every known tag, in declaration order.
            pub const ALL: &'static [TransactionType] = &[$(TransactionType::$variant,)+];

            /// The wire tag of this type.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(TransactionType::$variant => stringify!($variant),)+
                }
            }
        }

        impl FromStr for TransactionType {
            type Err = UnknownTransactionType;

            fn from_str(tag: &str) -> Result<Self, Self::Err> {
                match tag {
                    $(stringify!($variant) => Ok(TransactionType::$variant),)+
                    other => Err(UnknownTransactionType(other.to_string())),
                }
            }
        }
    };
}

transaction_types! {
    AccountDelete,
    AccountSet,
    AMMBid,
    AMMClawback,
    AMMCreate,
    AMMDelete,
    AMMDeposit,
    AMMVote,
    AMMWithdraw,
    Batch,
    CheckCancel,
    CheckCash,
    CheckCreate,
    Clawback,
    ConfidentialMPTClawback,
    ConfidentialMPTConvert,
    ConfidentialMPTConvertBack,
    ConfidentialMPTMergeInbox,
    ConfidentialMPTSend,
    CredentialAccept,
    CredentialCreate,
    CredentialDelete,
    DelegateSet,
    DepositPreauth,
    DIDDelete,
    DIDSet,
    EscrowCancel,
    EscrowCreate,
    EscrowFinish,
    LedgerStateFix,
    LoanBrokerCoverClawback,
    LoanBrokerCoverDeposit,
    LoanBrokerCoverWithdraw,
    LoanBrokerDelete,
    LoanBrokerSet,
    LoanDelete,
    LoanManage,
    LoanPay,
    LoanSet,
    MPTokenAuthorize,
    MPTokenIssuanceCreate,
    MPTokenIssuanceDestroy,
    MPTokenIssuanceSet,
    NFTokenAcceptOffer,
    NFTokenBurn,
    NFTokenCancelOffer,
    NFTokenCreateOffer,
    NFTokenMint,
    NFTokenModify,
    OfferCancel,
    OfferCreate,
    OracleDelete,
    OracleSet,
    Payment,
    PaymentChannelClaim,
    PaymentChannelCreate,
    PaymentChannelFund,
    PermissionedDomainDelete,
    PermissionedDomainSet,
    SetHook,
    SetRegularKey,
    SignerListSet,
    SponsorshipSet,
    TicketCreate,
    TrustSet,
    VaultClawback,
    VaultCreate,
    VaultDelete,
    VaultDeposit,
    VaultSet,
    VaultWithdraw,
    XChainAccountCreateCommit,
    XChainAddAccountCreateAttestation,
    XChainAddClaimAttestation,
    XChainClaim,
    XChainCommit,
    XChainCreateBridge,
    XChainCreateClaimID,
    XChainModifyBridge,
    /// Pseudo-transaction: amendment voting outcome.
    EnableAmendment,
    /// Pseudo-transaction: fee schedule change.
    SetFee,
    /// Pseudo-transaction: negative-UNL change.
    UNLModify,
}

impl TransactionType {
    /// Pseudo-transactions are produced by validators, never by accounts.
    pub fn is_pseudo(self) -> bool {
        matches!(
            self,
            TransactionType::EnableAmendment | TransactionType::SetFee | TransactionType::UNLModify
        )
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tag that names no known transaction type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid field TransactionType: {0}")]
pub struct UnknownTransactionType(pub String);

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
