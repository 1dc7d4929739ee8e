use crate::error::Result;
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use solana_system_interface::instruction as system_instruction;
use spl_associated_token_account_client::instruction::create_associated_token_account;

/// Create `recipient`'s associated token account for `mint`, funded by `payer`.
pub fn create_destination(
    payer: &Pubkey,
    recipient: &Pubkey,
    mint: &Pubkey,
    token_program_id: &Pubkey,
) -> Instruction {
    create_associated_token_account(payer, recipient, mint, token_program_id)
}

/// Move `amount` base units from `source` to `destination`, signed by `owner`.
pub fn transfer_tokens(
    token_program_id: &Pubkey,
    source: &Pubkey,
    destination: &Pubkey,
    owner: &Pubkey,
    amount: u64,
) -> Result<Instruction> {
    Ok(spl_token::instruction::transfer(
        token_program_id,
        source,
        destination,
        owner,
        &[],
        amount,
    )?)
}

/// Close `holding`, sending its rent reserve back to `owner`.
pub fn close_holding(
    token_program_id: &Pubkey,
    holding: &Pubkey,
    owner: &Pubkey,
) -> Result<Instruction> {
    Ok(spl_token::instruction::close_account(
        token_program_id,
        holding,
        owner,
        owner,
        &[],
    )?)
}

pub fn transfer_lamports(from: &Pubkey, to: &Pubkey, lamports: u64) -> Instruction {
    system_instruction::transfer(from, to, lamports)
}
