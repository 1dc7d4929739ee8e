// Example: Previewing a sweep against a running cluster
//
// This example demonstrates how to:
// 1. Connect to an RPC endpoint
// 2. Attach a local keypair as the connected wallet
// 3. Print the instructions a sweep would submit, without sending them

use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Keypair;
use wallet_sweep_sdk::{KeypairSigner, RpcConnection, Sweeper};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Connection (local validator by default)
    let connection = RpcConnection::new("http://127.0.0.1:8899");

    // 2. Wallet to sweep (replace with read_keypair_file for a real wallet)
    let wallet = Keypair::new();
    let sweeper = Sweeper::new(connection, Some(KeypairSigner::new(wallet)));

    // 3. Recipient of every balance
    let recipient = Pubkey::new_unique();

    let plan = sweeper.plan(&recipient.to_string()).await?;
    println!("{} instruction(s) planned", plan.len());
    for step in plan.steps() {
        println!("  {step}");
    }

    // In a real application, you would:
    // let outcome = sweeper.sweep(&recipient.to_string()).await?;

    Ok(())
}
