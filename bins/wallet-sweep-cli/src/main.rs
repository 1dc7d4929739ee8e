use std::{path::PathBuf, process::ExitCode};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use solana_sdk::signature::read_keypair_file;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wallet_sweep_sdk::core::constants::{
    DEFAULT_DEVNET_RPC_URL, DEFAULT_LOCAL_RPC_URL, DEFAULT_MAINNET_RPC_URL,
};
use wallet_sweep_sdk::{
    KeypairSigner, Notification, PlannedStep, RpcConnection, SweepConfig, SweepPlan, Sweeper,
    FEE_RESERVE_LAMPORTS,
};

#[derive(Parser)]
#[command(
    name = "wallet-sweep",
    about = "Close every token account of a wallet and forward all balances to a recipient",
    version
)]
struct Cli {
    #[arg(long, global = true, value_enum, default_value_t = Network::Local)]
    network: Network,

    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Keypair of the wallet to sweep. Without it the wallet counts as not connected.
    #[arg(long, global = true)]
    keypair: Option<PathBuf>,

    /// Lamports left behind for the transaction fee.
    #[arg(long, global = true, default_value_t = FEE_RESERVE_LAMPORTS)]
    fee_reserve: u64,

    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the instructions a sweep would submit, without sending anything.
    Plan {
        #[arg(long)]
        recipient: String,
    },
    /// Build, sign and submit the sweep transaction.
    Execute {
        #[arg(long)]
        recipient: String,
        /// Require an explicit confirmation before submitting.
        #[arg(long)]
        confirm: bool,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Network {
    Local,
    Devnet,
    Mainnet,
    Custom,
}

#[derive(Serialize)]
struct PlanSummary {
    steps: Vec<StepRow>,
    lamports_forwarded: u64,
}

#[derive(Serialize)]
struct StepRow {
    kind: &'static str,
    detail: String,
}

type CliSweeper = Sweeper<RpcConnection, KeypairSigner>;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let sweeper = build_sweeper(&cli)?;

    match &cli.command {
        Command::Plan { recipient } => handle_plan(&cli, &sweeper, recipient).await,
        Command::Execute { recipient, confirm } => {
            if !*confirm {
                bail!("Sweep execution requires --confirm");
            }
            handle_execute(&cli, &sweeper, recipient).await
        }
    }
}

async fn handle_plan(cli: &Cli, sweeper: &CliSweeper, recipient: &str) -> Result<ExitCode> {
    let plan = match sweeper.plan(recipient).await {
        Ok(plan) => plan,
        Err(err) => return report(cli, Notification::from_result(&Err(err))),
    };

    render(cli.json, plan_summary(&plan), |s| {
        if s.steps.is_empty() {
            println!("Nothing to sweep.");
            return;
        }
        println!("{} instruction(s) planned", s.steps.len());
        for step in &s.steps {
            println!("- {}", step.detail);
        }
    })?;
    Ok(ExitCode::SUCCESS)
}

async fn handle_execute(cli: &Cli, sweeper: &CliSweeper, recipient: &str) -> Result<ExitCode> {
    let result = sweeper.sweep(recipient).await;
    report(cli, Notification::from_result(&result))
}

fn report(cli: &Cli, notification: Notification) -> Result<ExitCode> {
    let failed = notification.is_error();
    render(cli.json, notification, |n| {
        println!("{}", n.message);
        if let Some(description) = &n.description {
            println!("  {description}");
        }
        if let Some(txid) = &n.txid {
            println!("  signature: {txid}");
        }
    })?;

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn build_sweeper(cli: &Cli) -> Result<CliSweeper> {
    let rpc_url = cli
        .rpc_url
        .clone()
        .or_else(|| default_rpc_url(cli.network))
        .ok_or_else(|| anyhow!("--rpc-url is required for custom network"))?;
    info!(%rpc_url, "using RPC endpoint");

    let signer = cli
        .keypair
        .as_ref()
        .map(|path| {
            read_keypair_file(path)
                .map(KeypairSigner::new)
                .map_err(|e| anyhow!("failed to read keypair {}: {e}", path.display()))
        })
        .transpose()?;

    let config = SweepConfig {
        fee_reserve_lamports: cli.fee_reserve,
        ..SweepConfig::default()
    };

    Ok(Sweeper::new(RpcConnection::new(rpc_url), signer).with_config(config))
}

fn default_rpc_url(network: Network) -> Option<String> {
    match network {
        Network::Local => Some(DEFAULT_LOCAL_RPC_URL.to_string()),
        Network::Devnet => Some(DEFAULT_DEVNET_RPC_URL.to_string()),
        Network::Mainnet => Some(DEFAULT_MAINNET_RPC_URL.to_string()),
        Network::Custom => None,
    }
}

fn plan_summary(plan: &SweepPlan) -> PlanSummary {
    PlanSummary {
        steps: plan.steps().iter().map(step_row).collect(),
        lamports_forwarded: plan.native_transfer().unwrap_or(0),
    }
}

fn step_row(step: &PlannedStep) -> StepRow {
    let kind = match step {
        PlannedStep::CreateDestination { .. } => "create_destination",
        PlannedStep::TransferTokens { .. } => "transfer_tokens",
        PlannedStep::CloseHolding { .. } => "close_holding",
        PlannedStep::TransferLamports { .. } => "transfer_lamports",
    };
    StepRow {
        kind,
        detail: step.to_string(),
    }
}

fn render<T, F>(json: bool, value: T, printer: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&T),
{
    if json {
        println!("{}", to_json(&value)?);
    } else {
        printer(&value);
    }
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize output as JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;
    use std::cell::Cell;

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("not representable"))
        }
    }

    #[test]
    fn test_json_serialization_error_is_reported() {
        let printed = Cell::new(false);
        let err = render(true, Unserializable, |_| printed.set(true)).unwrap_err();
        assert!(err.to_string().contains("JSON"));
        assert!(!printed.get());
    }

    #[test]
    fn test_text_output_uses_printer() {
        let printed = Cell::new(false);
        render(false, Unserializable, |_| printed.set(true)).unwrap();
        assert!(printed.get());
    }

    #[test]
    fn test_plan_summary_json() {
        let summary = PlanSummary {
            steps: vec![step_row(&PlannedStep::TransferLamports { lamports: 42 })],
            lamports_forwarded: 42,
        };
        let json = to_json(&summary).unwrap();
        assert!(json.contains("\"transfer_lamports\""));
        assert!(json.contains("\"lamports_forwarded\": 42"));
    }

    #[test]
    fn test_execute_parses_confirm_flag() {
        let cli = Cli::try_parse_from([
            "wallet-sweep",
            "--json",
            "execute",
            "--recipient",
            "11111111111111111111111111111111",
            "--confirm",
        ])
        .unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Command::Execute { confirm: true, .. }));
    }
}
