use crate::types::{BlockhashAnchor, TokenHolding};
use async_trait::async_trait;
use solana_sdk::account::Account;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;
use std::error::Error;

/// Ledger access needed by a sweep.
///
/// Implemented by [`crate::core::rpc::RpcConnection`] for a live cluster and by
/// in-memory doubles in tests.
#[async_trait]
pub trait SolConnection: Send + Sync {
    /// Every token account owned by `owner` under `token_program_id`.
    async fn get_token_accounts_by_owner(
        &self,
        owner: &Pubkey,
        token_program_id: &Pubkey,
    ) -> Result<Vec<TokenHolding>, Box<dyn Error + Send + Sync>>;
    async fn get_account(
        &self,
        pubkey: &Pubkey,
    ) -> Result<Option<Account>, Box<dyn Error + Send + Sync>>;
    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, Box<dyn Error + Send + Sync>>;
    async fn get_latest_blockhash(&self)
        -> Result<BlockhashAnchor, Box<dyn Error + Send + Sync>>;
    async fn send_transaction(
        &self,
        tx: &Transaction,
    ) -> Result<Signature, Box<dyn Error + Send + Sync>>;

    /// Wait until `signature` reaches `commitment`.
    /// Fails if the transaction errored or `anchor` expired first.
    async fn confirm_transaction(
        &self,
        signature: &Signature,
        anchor: &BlockhashAnchor,
        commitment: CommitmentConfig,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;
}
