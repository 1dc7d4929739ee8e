pub mod advanced;
pub mod basic;
pub mod core;
pub mod error;
pub mod types;
pub mod utils;

pub use crate::basic::notification::{Notification, NotificationKind};
pub use crate::basic::planner::{PlannedStep, SweepPlan};
pub use crate::basic::recipient::parse_recipient;
pub use crate::basic::sweeper::{SweepConfig, SweepOutcome, Sweeper};
pub use crate::core::connection::SolConnection;
pub use crate::core::constants::FEE_RESERVE_LAMPORTS;
pub use crate::core::rpc::RpcConnection;
pub use crate::core::signer::{KeypairSigner, SweepSigner};
pub use crate::error::{Result, SweepSdkError};
pub use crate::types::{BlockhashAnchor, TokenHolding};
