use crate::advanced::builders::build_sweep_transaction;
use crate::basic::planner::{plan_native_sweep, plan_token_sweep, SweepPlan};
use crate::basic::recipient::parse_recipient_for;
use crate::core::connection::SolConnection;
use crate::core::constants::FEE_RESERVE_LAMPORTS;
use crate::core::signer::SweepSigner;
use crate::error::{Result, SweepSdkError};
use crate::utils;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Tunables for a sweep
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Lamports kept back for the transaction fee
    pub fee_reserve_lamports: u64,

    /// Commitment the sweep waits for after submission
    pub commitment: CommitmentConfig,

    /// Token program whose accounts are swept
    pub token_program_id: Pubkey,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            fee_reserve_lamports: FEE_RESERVE_LAMPORTS,
            commitment: CommitmentConfig::confirmed(),
            token_program_id: spl_token::id(),
        }
    }
}

/// Terminal, non-error result of a sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepOutcome {
    /// No token accounts and no lamports above the fee reserve
    NothingToDo,

    /// The sweep transaction reached the configured commitment
    Confirmed { signature: Signature },
}

/// Where an invocation is in its lifecycle. Only surfaced through `debug!` logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SweepStage {
    Idle,
    ValidatingRecipient,
    Enumerating,
    Planning,
    Sweeping,
    Assembling,
    Submitting,
    Confirming,
    Succeeded,
    Failed,
}

/// State of one sweep call
struct SweepInvocation {
    owner: Pubkey,
    recipient: Pubkey,
    stage: SweepStage,
}

impl SweepInvocation {
    /// Record for an invocation whose recipient already passed validation
    fn new(owner: Pubkey, recipient: Pubkey) -> Self {
        let mut invocation = Self {
            owner,
            recipient,
            stage: SweepStage::Idle,
        };
        invocation.advance(SweepStage::ValidatingRecipient);
        invocation
    }

    fn advance(&mut self, next: SweepStage) {
        debug!(owner = %self.owner, from = ?self.stage, to = ?next, "sweep stage");
        self.stage = next;
    }
}

/// Clears the in-flight flag when the sweep returns, whichever way it exits.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| Self(flag))
            .map_err(|_| SweepSdkError::AlreadyInFlight)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Closes every token account of the connected wallet and forwards all
/// balances to a recipient in one transaction.
pub struct Sweeper<C, S> {
    connection: C,
    signer: Option<S>,
    config: SweepConfig,
    in_flight: AtomicBool,
}

impl<C: SolConnection, S: SweepSigner> Sweeper<C, S> {
    /// `signer` is `None` while no wallet is connected.
    pub fn new(connection: C, signer: Option<S>) -> Self {
        Self {
            connection,
            signer,
            config: SweepConfig::default(),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_config(mut self, config: SweepConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_fee_reserve(mut self, lamports: u64) -> Self {
        self.config.fee_reserve_lamports = lamports;
        self
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    /// Whether a sweep is currently running on this sweeper
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Build the sweep plan for `recipient` without submitting anything
    pub async fn plan(&self, recipient: &str) -> Result<SweepPlan> {
        let signer = self.signer.as_ref().ok_or(SweepSdkError::WalletNotConnected)?;
        let mut invocation = self.begin(signer, recipient)?;
        self.build_plan(&mut invocation).await
    }

    /// Run one sweep: plan, sign, submit and wait for confirmation.
    ///
    /// Nothing is retried. A failure after broadcast carries the signature in
    /// [`SweepSdkError::SubmissionFailed`].
    pub async fn sweep(&self, recipient: &str) -> Result<SweepOutcome> {
        let _guard = InFlightGuard::acquire(&self.in_flight)?;
        let signer = self.signer.as_ref().ok_or(SweepSdkError::WalletNotConnected)?;
        let mut invocation = self.begin(signer, recipient)?;

        let result = self.run(signer, &mut invocation).await;
        match &result {
            Ok(outcome) => {
                invocation.advance(SweepStage::Succeeded);
                info!(owner = %invocation.owner, ?outcome, "sweep finished");
            }
            Err(err) => {
                let failed_at = invocation.stage;
                invocation.advance(SweepStage::Failed);
                warn!(owner = %invocation.owner, stage = ?failed_at, %err, "sweep failed");
            }
        }
        result
    }

    fn begin(&self, signer: &S, recipient: &str) -> Result<SweepInvocation> {
        let owner = signer.pubkey();
        let recipient = parse_recipient_for(&owner, recipient)?;
        Ok(SweepInvocation::new(owner, recipient))
    }

    async fn build_plan(&self, invocation: &mut SweepInvocation) -> Result<SweepPlan> {
        let owner = invocation.owner;
        let recipient = invocation.recipient;
        let token_program_id = self.config.token_program_id;

        invocation.advance(SweepStage::Enumerating);
        let holdings = self
            .connection
            .get_token_accounts_by_owner(&owner, &token_program_id)
            .await
            .map_err(|e| SweepSdkError::query("enumerate token accounts", e))?;
        info!(%owner, count = holdings.len(), "found token accounts");

        invocation.advance(SweepStage::Planning);
        let destinations = utils::unique_destinations(&recipient, &holdings, &token_program_id);
        let existing = utils::fetch_existing_accounts(&self.connection, &destinations).await?;
        let mut plan = plan_token_sweep(&owner, &recipient, &token_program_id, &holdings, &existing)?;

        invocation.advance(SweepStage::Sweeping);
        let balance = self
            .connection
            .get_balance(&owner)
            .await
            .map_err(|e| SweepSdkError::query("get balance", e))?;
        plan_native_sweep(
            &mut plan,
            &owner,
            &recipient,
            balance,
            self.config.fee_reserve_lamports,
        );

        Ok(plan)
    }

    async fn run(&self, signer: &S, invocation: &mut SweepInvocation) -> Result<SweepOutcome> {
        let plan = self.build_plan(invocation).await?;

        invocation.advance(SweepStage::Assembling);
        if plan.is_empty() {
            info!(owner = %invocation.owner, "nothing to sweep");
            return Ok(SweepOutcome::NothingToDo);
        }

        let anchor = self
            .connection
            .get_latest_blockhash()
            .await
            .map_err(|e| SweepSdkError::query("get latest blockhash", e))?;
        let tx = build_sweep_transaction(&invocation.owner, &plan, &anchor.blockhash);

        invocation.advance(SweepStage::Submitting);
        let signature = signer
            .sign_and_send(tx, &self.connection)
            .await
            .map_err(|e| SweepSdkError::submission(None, e))?;
        info!(%signature, instructions = plan.len(), "sweep submitted");

        invocation.advance(SweepStage::Confirming);
        self.connection
            .confirm_transaction(&signature, &anchor, self.config.commitment)
            .await
            .map_err(|e| SweepSdkError::submission(Some(signature), e))?;

        Ok(SweepOutcome::Confirmed { signature })
    }
}
