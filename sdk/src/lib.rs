//! Whirlpool position resolver
//!
//! Finds and decodes the concentrated-liquidity positions a wallet holds,
//! including positions grouped in position bundles, and lists the positions
//! of a single pool.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use whirlpool_positions::{PositionClient, PositionData};
//! use solana_sdk::pubkey::Pubkey;
//! use std::str::FromStr;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PositionClient::mainnet();
//!     let wallet = Pubkey::from_str("9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM")?;
//!
//!     for entry in client.positions_for_owner(&wallet).await? {
//!         match entry {
//!             PositionData::Position { position, .. } => {
//!                 println!("position {} liquidity {}", position.address, position.data.liquidity);
//!             }
//!             PositionData::PositionBundle { bundle, .. } => {
//!                 println!("bundle {} with {} positions", bundle.address, bundle.positions.len());
//!             }
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Feature Overview
//!
//! | Item | Description |
//! |------|-------------|
//! | [`PositionClient::positions_for_owner`] | Positions and bundles held by a wallet |
//! | [`PositionClient::positions_in_pool`] | Positions opened in one pool |
//! | [`fetch_positions_for_owner`] | Same, over any [`AccountSource`] |
//! | [`fetch_positions_in_pool`] | Same, over any [`AccountSource`] |
//! | [`fetch_batched`] | Chunked, order-preserving `getMultipleAccounts` |
//! | [`enumerate_set_bits`] | Occupied slots of a bundle bitmap |

pub mod bitmap;
pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod owner;
pub mod pda;
pub mod pool;
pub mod rpc;
pub mod state;
pub mod types;

pub use bitmap::{enumerate_set_bits, PositionBitmap, POSITION_BUNDLE_SIZE};
pub use client::PositionClient;
pub use config::FetchConfig;
pub use error::{Error, Result};
pub use fetch::fetch_batched;
pub use owner::fetch_positions_for_owner;
pub use pool::fetch_positions_in_pool;
pub use rpc::AccountSource;
pub use types::*;
