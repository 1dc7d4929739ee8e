use solana_sdk::signature::Signature;
use std::fmt::Display;
use thiserror::Error;

/// SDK-specific error types for sweep operations
#[derive(Debug, Error)]
pub enum SweepSdkError {
    /// Recipient text is not a usable address
    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),

    /// No signer is attached to the sweeper
    #[error("Wallet not connected")]
    WalletNotConnected,

    /// Another sweep from this sweeper has not finished yet
    #[error("A sweep is already in flight")]
    AlreadyInFlight,

    /// A read against the ledger failed before anything was submitted
    #[error("Query failed ({operation}): {message}")]
    QueryFailed {
        operation: &'static str,
        message: String,
    },

    /// Signing, broadcast or confirmation failed.
    /// `signature` is set once the transaction left the signer.
    #[error("Submission failed: {message}")]
    SubmissionFailed {
        signature: Option<Signature>,
        message: String,
    },

    /// Token account data returned by the RPC could not be interpreted
    #[error("Invalid account data: {0}")]
    InvalidAccountData(String),

    /// Instruction construction rejected its inputs
    #[error("Program error: {0}")]
    ProgramError(#[from] solana_sdk::program_error::ProgramError),
}

impl SweepSdkError {
    pub(crate) fn query(operation: &'static str, err: impl Display) -> Self {
        Self::QueryFailed {
            operation,
            message: err.to_string(),
        }
    }

    pub(crate) fn submission(signature: Option<Signature>, err: impl Display) -> Self {
        Self::SubmissionFailed {
            signature,
            message: err.to_string(),
        }
    }

    /// Signature of the submitted transaction, if one was obtained before the failure.
    pub fn signature(&self) -> Option<&Signature> {
        match self {
            Self::SubmissionFailed { signature, .. } => signature.as_ref(),
            _ => None,
        }
    }
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, SweepSdkError>;
