use crate::basic::sweeper::SweepOutcome;
use crate::error::{Result, SweepSdkError};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Info,
    Error,
}

/// User-facing summary of one sweep call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txid: Option<String>,
}

impl Notification {
    fn new(kind: NotificationKind, message: &str) -> Self {
        Self {
            kind,
            message: message.to_string(),
            description: None,
            txid: None,
        }
    }

    /// Map a sweep result to exactly one notification
    pub fn from_result(result: &Result<SweepOutcome>) -> Self {
        match result {
            Ok(SweepOutcome::NothingToDo) => {
                Self::new(NotificationKind::Info, "No eligible accounts to process.")
            }
            Ok(SweepOutcome::Confirmed { signature }) => Self {
                txid: Some(signature.to_string()),
                ..Self::new(NotificationKind::Success, "Transaction successful!")
            },
            Err(SweepSdkError::WalletNotConnected) => {
                Self::new(NotificationKind::Error, "Wallet not connected!")
            }
            Err(SweepSdkError::InvalidRecipient(_)) => {
                Self::new(NotificationKind::Error, "Invalid recipient wallet address!")
            }
            Err(SweepSdkError::AlreadyInFlight) => {
                Self::new(NotificationKind::Error, "A sweep is already in progress.")
            }
            Err(err) => Self {
                description: Some(err.to_string()),
                txid: err.signature().map(ToString::to_string),
                ..Self::new(NotificationKind::Error, "Transaction failed!")
            },
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}
