use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use serde_json::json;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use whirlpool_positions::{
    config::DEFAULT_BATCH_SIZE, pda::WHIRLPOOL_PROGRAM_ID, HydratedPosition, PositionClient,
    PositionData, TokenProgram,
};

// ─── CLI definition ───────────────────────────────────────────────────────────

/// Look up Whirlpool positions held by a wallet or opened in a pool.
///
/// Every command supports --json for machine-readable output.
/// Global options can also be set via environment variables:
///   WHIRLPOOL_RPC_URL     — Solana JSON-RPC endpoint
///   WHIRLPOOL_BATCH_SIZE  — accounts per getMultipleAccounts call
#[derive(Parser)]
#[command(
    name    = "whirlpool-positions",
    version = env!("CARGO_PKG_VERSION"),
    about   = "Resolve Whirlpool positions and position bundles on Solana.",
    after_help = "\
ENVIRONMENT:
  WHIRLPOOL_RPC_URL     Solana JSON-RPC endpoint  [default: https://api.mainnet-beta.solana.com]
  WHIRLPOOL_BATCH_SIZE  Accounts per getMultipleAccounts call  [default: 100]
  RUST_LOG              Log filter, e.g. whirlpool_positions=debug

QUICK START:
  whirlpool-positions owner <WALLET>
  whirlpool-positions pool  <WHIRLPOOL> --json"
)]
struct Cli {
    /// Solana JSON-RPC endpoint
    #[arg(
        long,
        global     = true,
        value_name = "URL",
        default_value = "https://api.mainnet-beta.solana.com",
        env = "WHIRLPOOL_RPC_URL"
    )]
    rpc_url: String,

    /// Maximum accounts requested per getMultipleAccounts call
    #[arg(
        long,
        global     = true,
        value_name = "N",
        default_value_t = DEFAULT_BATCH_SIZE,
        env = "WHIRLPOOL_BATCH_SIZE"
    )]
    batch_size: usize,

    /// Whirlpool program ID (override for local validators)
    #[arg(long, global = true, value_name = "PUBKEY")]
    program_id: Option<String>,

    /// Output machine-readable JSON instead of human-readable text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every position and position bundle held by a wallet
    ///
    /// Position NFTs under both SPL Token and Token-2022 are considered.
    /// Bundles are expanded into the positions in their occupied slots.
    Owner {
        /// Wallet address (base-58)
        #[arg(value_name = "WALLET")]
        owner: String,
    },

    /// List every position opened in a pool
    Pool {
        /// Whirlpool address (base-58)
        #[arg(value_name = "WHIRLPOOL")]
        pool: String,
    },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args().len() == 1 {
        Cli::command().print_long_help().ok();
        println!();
        return Ok(());
    }

    let cli = Cli::parse();
    init_logging();

    let program_id = match &cli.program_id {
        Some(id) => parse_pubkey("program ID", id)?,
        None     => WHIRLPOOL_PROGRAM_ID,
    };
    let client = PositionClient::new(cli.rpc_url.clone())
        .with_program_id(program_id)
        .with_batch_size(cli.batch_size);

    match &cli.command {
        Commands::Owner { owner } => cmd_owner(&client, owner, cli.json).await?,
        Commands::Pool { pool }   => cmd_pool(&client, pool, cli.json).await?,
    }

    Ok(())
}

/// Library events stay quiet; the CLI's own summaries are shown.
/// Target filters match by prefix, so the CLI target needs its own directive.
const DEFAULT_LOG_FILTER: &str = "whirlpool_positions=warn,whirlpool_positions_cli=info";

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// ─── owner ────────────────────────────────────────────────────────────────────

async fn cmd_owner(client: &PositionClient, owner: &str, json_output: bool) -> Result<()> {
    let owner = parse_pubkey("wallet", owner)?;
    let entries = client
        .positions_for_owner(&owner)
        .await
        .context("Failed to resolve wallet positions — check your RPC endpoint")?;
    info!(%owner, entries = entries.len(), "resolved");

    if json_output {
        println!("{}", json!({
            "status": "ok", "command": "owner",
            "owner": owner.to_string(), "positions": entries,
        }));
        return Ok(());
    }

    println!("─── Positions ────────────────────────────────────────────────────");
    println!("  Owner   {owner}");
    println!();
    if entries.is_empty() {
        println!("  No positions or position bundles found.");
        return Ok(());
    }

    for (i, entry) in entries.iter().enumerate() {
        match entry {
            PositionData::Position { position, token_program } => {
                println!("  [{i:>2}]  Position   {}  ({})", position.address, program_label(*token_program));
                print_position_body(position, "        ");
            }
            PositionData::PositionBundle { bundle, token_program } => {
                println!("  [{i:>2}]  Bundle     {}  ({})", bundle.address, program_label(*token_program));
                println!("        Mint       {}", bundle.data.position_bundle_mint);
                println!("        Slots      {} occupied", bundle.data.position_bitmap.occupied_count());
                for position in &bundle.positions {
                    println!("        ·  {}", position.address);
                    print_position_body(position, "           ");
                }
            }
        }
        println!();
    }
    let bundles = entries.iter().filter(|e| e.is_position_bundle()).count();
    println!("  Total: {} position(s)  ·  {} bundle(s)", entries.len() - bundles, bundles);
    Ok(())
}

// ─── pool ─────────────────────────────────────────────────────────────────────

async fn cmd_pool(client: &PositionClient, pool: &str, json_output: bool) -> Result<()> {
    let pool = parse_pubkey("whirlpool", pool)?;
    let positions = client
        .positions_in_pool(&pool)
        .await
        .context("Failed to list pool positions — check your RPC endpoint")?;
    info!(%pool, positions = positions.len(), "listed");

    if json_output {
        println!("{}", json!({
            "status": "ok", "command": "pool",
            "whirlpool": pool.to_string(), "positions": positions,
        }));
        return Ok(());
    }

    println!("─── Pool Positions ───────────────────────────────────────────────");
    println!("  Whirlpool  {pool}");
    println!();
    for (i, position) in positions.iter().enumerate() {
        println!("  [{i:>2}]  Position   {}", position.address);
        print_position_body(position, "        ");
        println!();
    }
    println!("  Total: {} position(s)", positions.len());
    Ok(())
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn print_position_body(position: &HydratedPosition, indent: &str) {
    let p = &position.data;
    println!("{indent}Whirlpool  {}", p.whirlpool);
    println!("{indent}Ticks      [{}, {})", p.tick_lower_index, p.tick_upper_index);
    println!("{indent}Liquidity  {:>20}", p.liquidity);
    println!("{indent}Fees owed  {} / {}", p.fee_owed_a, p.fee_owed_b);
}

fn program_label(program: TokenProgram) -> &'static str {
    match program {
        TokenProgram::Token     => "SPL Token",
        TokenProgram::Token2022 => "Token-2022",
    }
}

fn parse_pubkey(what: &str, value: &str) -> Result<Pubkey> {
    Pubkey::from_str(value).with_context(|| format!("Invalid {what} address: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_enables_cli_summaries() {
        let filter = tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER).unwrap();
        let rendered = filter.to_string();
        assert!(rendered.contains("whirlpool_positions_cli=info"));
        assert!(rendered.contains("whirlpool_positions=warn"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(parse_pubkey("wallet", "not-a-key").is_err());
        assert!(parse_pubkey("wallet", &Pubkey::new_unique().to_string()).is_ok());
    }
}
