use std::time::Duration;

/// Lamports left behind in the swept wallet to pay the sweep transaction fee.
///
/// The native transfer is computed from the balance read before submission,
/// so rent refunded by the token account closes in the same transaction is
/// not forwarded and stays with the swept wallet.
pub const FEE_RESERVE_LAMPORTS: u64 = 5_000;

pub const DEFAULT_LOCAL_RPC_URL: &str = "http://127.0.0.1:8899";
pub const DEFAULT_DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";
pub const DEFAULT_MAINNET_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// Delay between signature status polls while waiting for confirmation.
pub const CONFIRMATION_POLL_INTERVAL: Duration = Duration::from_millis(500);
