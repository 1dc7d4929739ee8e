use crate::basic::planner::SweepPlan;
use solana_sdk::hash::Hash;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::transaction::Transaction;

/// Compose the unsigned sweep transaction with `payer` as fee payer.
/// Instruction order is taken from the plan as-is.
pub fn build_sweep_transaction(payer: &Pubkey, plan: &SweepPlan, blockhash: &Hash) -> Transaction {
    let message = Message::new_with_blockhash(plan.instructions(), Some(payer), blockhash);
    Transaction::new_unsigned(message)
}
