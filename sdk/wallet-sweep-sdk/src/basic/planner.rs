use crate::advanced::instructions;
use crate::error::Result;
use crate::types::TokenHolding;
use crate::utils::derive_destination;
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::debug;

/// What a single planned instruction does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedStep {
    /// Create the recipient's associated token account for `mint`
    CreateDestination { mint: Pubkey, destination: Pubkey },

    /// Move the full balance of `source` into `destination`
    TransferTokens {
        source: Pubkey,
        destination: Pubkey,
        mint: Pubkey,
        amount: u64,
    },

    /// Close `holding`, refunding its rent to the swept wallet
    CloseHolding { holding: Pubkey, mint: Pubkey },

    /// Forward lamports from the swept wallet to the recipient
    TransferLamports { lamports: u64 },
}

impl fmt::Display for PlannedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateDestination { mint, destination } => {
                write!(f, "create token account {destination} (mint {mint})")
            }
            Self::TransferTokens {
                source,
                destination,
                amount,
                ..
            } => write!(f, "transfer {amount} from {source} to {destination}"),
            Self::CloseHolding { holding, .. } => write!(f, "close token account {holding}"),
            Self::TransferLamports { lamports } => write!(f, "transfer {lamports} lamports"),
        }
    }
}

/// Ordered instruction list for one sweep, with a description of each entry.
#[derive(Debug, Clone, Default)]
pub struct SweepPlan {
    steps: Vec<PlannedStep>,
    instructions: Vec<Instruction>,
}

impl SweepPlan {
    fn push(&mut self, step: PlannedStep, ix: Instruction) {
        debug!(%step, "planned");
        self.steps.push(step);
        self.instructions.push(ix);
    }

    pub fn steps(&self) -> &[PlannedStep] {
        &self.steps
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Lamports the plan forwards to the recipient, if any
    pub fn native_transfer(&self) -> Option<u64> {
        self.steps.iter().find_map(|step| match step {
            PlannedStep::TransferLamports { lamports } => Some(*lamports),
            _ => None,
        })
    }
}

/// Plan the token part of a sweep.
///
/// For each holding, in order: create the destination if it is not in
/// `existing_destinations` (once per mint), transfer the full balance if it is
/// non-zero, then close the holding.
pub fn plan_token_sweep(
    owner: &Pubkey,
    recipient: &Pubkey,
    token_program_id: &Pubkey,
    holdings: &[TokenHolding],
    existing_destinations: &HashSet<Pubkey>,
) -> Result<SweepPlan> {
    let mut plan = SweepPlan::default();
    let mut destinations: HashMap<Pubkey, Pubkey> = HashMap::new();
    let mut created: HashSet<Pubkey> = HashSet::new();

    for holding in holdings {
        let destination = *destinations
            .entry(holding.mint)
            .or_insert_with(|| derive_destination(recipient, &holding.mint, token_program_id));

        if !existing_destinations.contains(&destination) && created.insert(destination) {
            plan.push(
                PlannedStep::CreateDestination {
                    mint: holding.mint,
                    destination,
                },
                instructions::create_destination(owner, recipient, &holding.mint, token_program_id),
            );
        }

        if !holding.is_empty() {
            plan.push(
                PlannedStep::TransferTokens {
                    source: holding.address,
                    destination,
                    mint: holding.mint,
                    amount: holding.amount,
                },
                instructions::transfer_tokens(
                    token_program_id,
                    &holding.address,
                    &destination,
                    owner,
                    holding.amount,
                )?,
            );
        }

        plan.push(
            PlannedStep::CloseHolding {
                holding: holding.address,
                mint: holding.mint,
            },
            instructions::close_holding(token_program_id, &holding.address, owner)?,
        );
    }

    Ok(plan)
}

/// Append the lamport transfer of `balance - fee_reserve` when it is positive.
///
/// `balance` is read before the sweep lands, so rent refunded by the closes in
/// the same transaction is never part of the forwarded amount.
pub fn plan_native_sweep(
    plan: &mut SweepPlan,
    owner: &Pubkey,
    recipient: &Pubkey,
    balance: u64,
    fee_reserve: u64,
) {
    let lamports = balance.saturating_sub(fee_reserve);
    if lamports == 0 {
        debug!(balance, fee_reserve, "no lamports left to forward");
        return;
    }

    plan.push(
        PlannedStep::TransferLamports { lamports },
        instructions::transfer_lamports(owner, recipient, lamports),
    );
}
