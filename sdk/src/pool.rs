//! List the standalone positions of one pool.

use solana_client::rpc_filter::{Memcmp, MemcmpEncodedBytes, RpcFilterType};
use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use crate::config::FetchConfig;
use crate::error::Result;
use crate::rpc::AccountSource;
use crate::state::{account_discriminator, parse_position, POSITION_LEN, POSITION_WHIRLPOOL_OFFSET};
use crate::types::HydratedPosition;

/// Fetch every `Position` account whose `whirlpool` field equals `pool`.
///
/// Bundled positions record their pool like any other position, so they are
/// returned here without any bundle traversal.
pub async fn fetch_positions_in_pool<S>(
    source: &S,
    pool:   &Pubkey,
    config: &FetchConfig,
) -> Result<Vec<HydratedPosition>>
where
    S: AccountSource + ?Sized,
{
    let raw = source
        .program_accounts(&config.program_id, pool_position_filters(pool))
        .await?;
    debug!(%pool, positions = raw.len(), "pool positions fetched");

    raw.into_iter()
        .map(|(address, data)| {
            Ok(HydratedPosition { address, data: parse_position(&data)? })
        })
        .collect()
}

/// `getProgramAccounts` filters selecting the positions of `pool`.
pub fn pool_position_filters(pool: &Pubkey) -> Vec<RpcFilterType> {
    vec![
        RpcFilterType::DataSize(POSITION_LEN as u64),
        RpcFilterType::Memcmp(Memcmp::new(
            0,
            MemcmpEncodedBytes::Bytes(account_discriminator("Position").to_vec()),
        )),
        RpcFilterType::Memcmp(Memcmp::new(
            POSITION_WHIRLPOOL_OFFSET,
            MemcmpEncodedBytes::Bytes(pool.to_bytes().to_vec()),
        )),
    ]
}
