use crate::core::connection::SolConnection;
use crate::error::{Result, SweepSdkError};
use crate::types::TokenHolding;
use futures::future::try_join_all;
use serde_json::Value;
use solana_sdk::pubkey::Pubkey;
use spl_associated_token_account_client::address::get_associated_token_address_with_program_id;
use std::collections::HashSet;
use std::str::FromStr;

//=============================================================================
// Address Derivation Helpers
//=============================================================================

/// Derive the recipient's associated token account for `mint`
pub fn derive_destination(recipient: &Pubkey, mint: &Pubkey, token_program_id: &Pubkey) -> Pubkey {
    get_associated_token_address_with_program_id(recipient, mint, token_program_id)
}

/// Destination accounts for every distinct mint, in first-seen order
pub fn unique_destinations(
    recipient: &Pubkey,
    holdings: &[TokenHolding],
    token_program_id: &Pubkey,
) -> Vec<Pubkey> {
    let mut seen = HashSet::new();
    holdings
        .iter()
        .filter(|holding| seen.insert(holding.mint))
        .map(|holding| derive_destination(recipient, &holding.mint, token_program_id))
        .collect()
}

//=============================================================================
// Account Fetching & Parsing
//=============================================================================

/// Look up all `destinations` concurrently and return the ones that exist.
/// Any failed lookup fails the whole batch.
pub async fn fetch_existing_accounts(
    connection: &impl SolConnection,
    destinations: &[Pubkey],
) -> Result<HashSet<Pubkey>> {
    let lookups = destinations.iter().map(|destination| async move {
        connection
            .get_account(destination)
            .await
            .map(|account| account.map(|_| *destination))
            .map_err(|e| SweepSdkError::query("get destination account", e))
    });

    let found = try_join_all(lookups).await?;
    Ok(found.into_iter().flatten().collect())
}

/// Parse a `jsonParsed` SPL token account payload
pub fn parse_token_holding(address: &str, data: &Value) -> Result<TokenHolding> {
    let address = Pubkey::from_str(address).map_err(|e| {
        SweepSdkError::InvalidAccountData(format!("Invalid token account address {address}: {e}"))
    })?;

    let info = data.pointer("/parsed/info").ok_or_else(|| {
        SweepSdkError::InvalidAccountData(format!("{address}: missing parsed token info"))
    })?;

    let mint = info
        .get("mint")
        .and_then(Value::as_str)
        .ok_or_else(|| SweepSdkError::InvalidAccountData(format!("{address}: missing mint")))
        .and_then(|mint| {
            Pubkey::from_str(mint).map_err(|e| {
                SweepSdkError::InvalidAccountData(format!("{address}: invalid mint {mint}: {e}"))
            })
        })?;

    let amount = info
        .pointer("/tokenAmount/amount")
        .and_then(Value::as_str)
        .ok_or_else(|| SweepSdkError::InvalidAccountData(format!("{address}: missing amount")))
        .and_then(|amount| {
            amount.parse::<u64>().map_err(|e| {
                SweepSdkError::InvalidAccountData(format!(
                    "{address}: invalid amount {amount}: {e}"
                ))
            })
        })?;

    Ok(TokenHolding::new(address, mint, amount))
}
