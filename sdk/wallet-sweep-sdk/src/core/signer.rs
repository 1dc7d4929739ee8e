use crate::core::connection::SolConnection;
use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature, Signer};
use solana_sdk::transaction::Transaction;
use std::error::Error;

/// Abstraction for the connected wallet.
/// This allows the SDK to work with:
/// 1. Local Keypairs (Backend/CLI)
/// 2. Wallet Adapters that only expose a combined sign-and-send call
#[async_trait]
pub trait SweepSigner: Send + Sync {
    fn pubkey(&self) -> Pubkey;

    /// Sign `tx` as fee payer and broadcast it through `connection`.
    /// The transaction already carries its recent blockhash.
    async fn sign_and_send(
        &self,
        tx: Transaction,
        connection: &dyn SolConnection,
    ) -> Result<Signature, Box<dyn Error + Send + Sync>>;
}

/// Signer backed by a local keypair file or an in-memory keypair.
pub struct KeypairSigner {
    keypair: Keypair,
}

impl KeypairSigner {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }
}

#[async_trait]
impl SweepSigner for KeypairSigner {
    fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    async fn sign_and_send(
        &self,
        mut tx: Transaction,
        connection: &dyn SolConnection,
    ) -> Result<Signature, Box<dyn Error + Send + Sync>> {
        let recent_blockhash = tx.message.recent_blockhash;
        tx.try_sign(&[&self.keypair], recent_blockhash)?;
        connection.send_transaction(&tx).await
    }
}
