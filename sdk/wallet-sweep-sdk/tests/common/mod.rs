use async_trait::async_trait;
use solana_sdk::account::Account;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::transaction::Transaction;
use std::collections::HashSet;
use std::error::Error;
use std::sync::Mutex;
use wallet_sweep_sdk::{BlockhashAnchor, SolConnection, SweepSigner, TokenHolding};

/// Ledger calls recorded by [`MockConnection`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    TokenAccounts,
    Account(Pubkey),
    Balance,
    Blockhash,
    Send,
    Confirm(Signature),
}

/// In-memory ledger for driving a `Sweeper` without a cluster
#[derive(Default)]
pub struct MockConnection {
    pub holdings: Vec<TokenHolding>,
    pub existing: HashSet<Pubkey>,
    pub balance: u64,
    pub anchor: Option<BlockhashAnchor>,
    pub fail_enumeration: bool,
    pub fail_account: bool,
    pub fail_balance: bool,
    pub fail_blockhash: bool,
    pub fail_send: bool,
    pub fail_confirm: bool,
    pub calls: Mutex<Vec<Call>>,
    pub sent: Mutex<Vec<Transaction>>,
}

impl MockConnection {
    pub fn new(holdings: Vec<TokenHolding>, balance: u64) -> Self {
        Self {
            holdings,
            balance,
            anchor: Some(BlockhashAnchor {
                blockhash: Hash::new_unique(),
                last_valid_block_height: 1_000,
            }),
            ..Default::default()
        }
    }

    pub fn with_existing(mut self, accounts: impl IntoIterator<Item = Pubkey>) -> Self {
        self.existing.extend(accounts);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<Transaction> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl SolConnection for MockConnection {
    async fn get_token_accounts_by_owner(
        &self,
        _owner: &Pubkey,
        _token_program_id: &Pubkey,
    ) -> Result<Vec<TokenHolding>, Box<dyn Error + Send + Sync>> {
        self.record(Call::TokenAccounts);
        // behave like a network round trip so concurrent callers interleave
        tokio::task::yield_now().await;
        if self.fail_enumeration {
            return Err("connection timed out".into());
        }
        Ok(self.holdings.clone())
    }

    async fn get_account(
        &self,
        pubkey: &Pubkey,
    ) -> Result<Option<Account>, Box<dyn Error + Send + Sync>> {
        self.record(Call::Account(*pubkey));
        if self.fail_account {
            return Err("account lookup failed".into());
        }
        Ok(self
            .existing
            .contains(pubkey)
            .then(|| Account::new(2_039_280, 165, &spl_token::id())))
    }

    async fn get_balance(&self, _pubkey: &Pubkey) -> Result<u64, Box<dyn Error + Send + Sync>> {
        self.record(Call::Balance);
        if self.fail_balance {
            return Err("balance unavailable".into());
        }
        Ok(self.balance)
    }

    async fn get_latest_blockhash(
        &self,
    ) -> Result<BlockhashAnchor, Box<dyn Error + Send + Sync>> {
        self.record(Call::Blockhash);
        if self.fail_blockhash {
            return Err("blockhash unavailable".into());
        }
        self.anchor.ok_or_else(|| "blockhash unavailable".into())
    }

    async fn send_transaction(
        &self,
        tx: &Transaction,
    ) -> Result<Signature, Box<dyn Error + Send + Sync>> {
        self.record(Call::Send);
        if self.fail_send {
            return Err("transaction simulation failed".into());
        }
        self.sent.lock().unwrap().push(tx.clone());
        let signature = tx.signatures.first().ok_or("No signature")?;
        Ok(*signature)
    }

    async fn confirm_transaction(
        &self,
        signature: &Signature,
        _anchor: &BlockhashAnchor,
        _commitment: CommitmentConfig,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.record(Call::Confirm(*signature));
        if self.fail_confirm {
            return Err("blockhash expired".into());
        }
        Ok(())
    }
}

/// Wallet that refuses to sign, like a user rejecting the prompt
pub struct RejectingSigner {
    pub pubkey: Pubkey,
}

#[async_trait]
impl SweepSigner for RejectingSigner {
    fn pubkey(&self) -> Pubkey {
        self.pubkey
    }

    async fn sign_and_send(
        &self,
        _tx: Transaction,
        _connection: &dyn SolConnection,
    ) -> Result<Signature, Box<dyn Error + Send + Sync>> {
        Err("User rejected the request".into())
    }
}

pub fn holding(mint: Pubkey, amount: u64) -> TokenHolding {
    TokenHolding::new(Pubkey::new_unique(), mint, amount)
}

pub fn owner() -> Keypair {
    Keypair::new()
}
