use crate::core::connection::SolConnection;
use crate::core::constants::CONFIRMATION_POLL_INTERVAL;
use crate::types::{BlockhashAnchor, TokenHolding};
use crate::utils;
use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_request::TokenAccountsFilter;
use solana_sdk::account::Account;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;
use std::error::Error;
use std::time::Duration;
use tracing::debug;

/// [`SolConnection`] over a JSON-RPC endpoint.
pub struct RpcConnection {
    client: RpcClient,
    commitment: CommitmentConfig,
    poll_interval: Duration,
}

impl RpcConnection {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self::new_with_commitment(rpc_url, CommitmentConfig::confirmed())
    }

    pub fn new_with_commitment(rpc_url: impl Into<String>, commitment: CommitmentConfig) -> Self {
        Self {
            client: RpcClient::new_with_commitment(rpc_url.into(), commitment),
            commitment,
            poll_interval: CONFIRMATION_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Access the underlying RpcClient if callers need lower-level queries.
    pub fn rpc(&self) -> &RpcClient {
        &self.client
    }
}

#[async_trait]
impl SolConnection for RpcConnection {
    async fn get_token_accounts_by_owner(
        &self,
        owner: &Pubkey,
        token_program_id: &Pubkey,
    ) -> Result<Vec<TokenHolding>, Box<dyn Error + Send + Sync>> {
        let keyed_accounts = self
            .client
            .get_token_accounts_by_owner(owner, TokenAccountsFilter::ProgramId(*token_program_id))
            .await?;

        let mut holdings = Vec::with_capacity(keyed_accounts.len());
        for keyed in &keyed_accounts {
            // jsonParsed payload; serde_json keeps us independent of the decoder types
            let data = serde_json::to_value(&keyed.account.data)?;
            holdings.push(utils::parse_token_holding(&keyed.pubkey, &data)?);
        }
        Ok(holdings)
    }

    async fn get_account(
        &self,
        pubkey: &Pubkey,
    ) -> Result<Option<Account>, Box<dyn Error + Send + Sync>> {
        let response = self
            .client
            .get_account_with_commitment(pubkey, self.commitment)
            .await?;
        Ok(response.value)
    }

    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, Box<dyn Error + Send + Sync>> {
        let response = self
            .client
            .get_balance_with_commitment(pubkey, self.commitment)
            .await?;
        Ok(response.value)
    }

    async fn get_latest_blockhash(
        &self,
    ) -> Result<BlockhashAnchor, Box<dyn Error + Send + Sync>> {
        let (blockhash, last_valid_block_height) = self
            .client
            .get_latest_blockhash_with_commitment(self.commitment)
            .await?;
        Ok(BlockhashAnchor {
            blockhash,
            last_valid_block_height,
        })
    }

    async fn send_transaction(
        &self,
        tx: &Transaction,
    ) -> Result<Signature, Box<dyn Error + Send + Sync>> {
        Ok(self.client.send_transaction(tx).await?)
    }

    async fn confirm_transaction(
        &self,
        signature: &Signature,
        anchor: &BlockhashAnchor,
        commitment: CommitmentConfig,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        loop {
            match self
                .client
                .get_signature_status_with_commitment(signature, commitment)
                .await?
            {
                Some(Ok(())) => return Ok(()),
                Some(Err(err)) => return Err(err.into()),
                None => {}
            }

            let block_height = self
                .client
                .get_block_height_with_commitment(commitment)
                .await?;
            if block_height > anchor.last_valid_block_height {
                return Err(format!(
                    "blockhash expired at block height {} before {} was confirmed",
                    anchor.last_valid_block_height, signature
                )
                .into());
            }

            debug!(%signature, block_height, "waiting for confirmation");
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
