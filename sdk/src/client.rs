//! [`PositionClient`] — the main entry point for wallet and pool lookups.

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};

use crate::{
    config::FetchConfig,
    error::Result,
    owner::fetch_positions_for_owner,
    pool::fetch_positions_in_pool,
    types::{HydratedPosition, PositionData},
};

// ─── Constants ────────────────────────────────────────────────────────────────

const DEVNET_RPC:  &str = "https://api.devnet.solana.com";
const MAINNET_RPC: &str = "https://api.mainnet-beta.solana.com";

// ─── Client ───────────────────────────────────────────────────────────────────

/// Async position reader bound to one RPC endpoint.
///
/// ```rust,no_run
/// # use whirlpool_positions::PositionClient;
/// # use solana_sdk::pubkey::Pubkey;
/// # use std::str::FromStr;
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = PositionClient::mainnet();
/// let wallet = Pubkey::from_str("9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM")?;
/// for entry in client.positions_for_owner(&wallet).await? {
///     println!("{} bundle={}", entry.address(), entry.is_position_bundle());
/// }
/// # Ok(())
/// # }
/// ```
pub struct PositionClient {
    rpc_url: String,
    config:  FetchConfig,
}

impl PositionClient {
    /// Create a client pointing at any RPC endpoint.
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            config:  FetchConfig::default(),
        }
    }

    /// Pre-configured client for Solana devnet.
    pub fn devnet() -> Self {
        Self::new(DEVNET_RPC)
    }

    /// Pre-configured client for Solana mainnet-beta.
    pub fn mainnet() -> Self {
        Self::new(MAINNET_RPC)
    }

    /// Override the program ID (useful for locally deployed programs in tests).
    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.config = self.config.with_program_id(program_id);
        self
    }

    /// Override the number of addresses sent per `getMultipleAccounts` call.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.config = self.config.with_batch_size(batch_size);
        self
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    // ── Read operations ───────────────────────────────────────────────────────

    /// Every position and position bundle held by `owner`, bundles hydrated
    /// with the positions in their occupied slots.
    pub async fn positions_for_owner(&self, owner: &Pubkey) -> Result<Vec<PositionData>> {
        fetch_positions_for_owner(&self.rpc(), owner, &self.config).await
    }

    /// Every position opened in the pool at `pool`.
    pub async fn positions_in_pool(&self, pool: &Pubkey) -> Result<Vec<HydratedPosition>> {
        fetch_positions_in_pool(&self.rpc(), pool, &self.config).await
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn rpc(&self) -> RpcClient {
        RpcClient::new_with_commitment(self.rpc_url.clone(), CommitmentConfig::confirmed())
    }
}
