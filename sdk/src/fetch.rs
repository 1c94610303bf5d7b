//! Batched `getMultipleAccounts` with order-preserving decode.

use futures::future::try_join_all;
use solana_sdk::pubkey::Pubkey;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::rpc::AccountSource;
use crate::types::MaybeAccount;

/// Fetch `addresses` in chunks of at most `batch_size` and decode every
/// existing account with `decode`.
///
/// The output has one entry per input address, in input order. Chunks are
/// requested concurrently; an empty input makes no RPC calls. A decode error
/// on an existing account aborts the whole fetch.
pub async fn fetch_batched<S, T, F>(
    source:     &S,
    addresses:  &[Pubkey],
    batch_size: usize,
    decode:     F,
) -> Result<Vec<MaybeAccount<T>>>
where
    S: AccountSource + ?Sized,
    F: Fn(&[u8]) -> Result<T>,
{
    if batch_size == 0 {
        return Err(Error::InvalidArgument("batch_size must be at least 1".into()));
    }
    if addresses.is_empty() {
        return Ok(Vec::new());
    }

    let chunks: Vec<&[Pubkey]> = addresses.chunks(batch_size).collect();
    debug!(addresses = addresses.len(), chunks = chunks.len(), "fetching accounts");

    let responses = try_join_all(chunks.iter().map(|chunk| source.multiple_accounts(chunk))).await?;

    let mut out = Vec::with_capacity(addresses.len());
    for (chunk, accounts) in chunks.iter().zip(responses) {
        if accounts.len() != chunk.len() {
            return Err(Error::UnexpectedResponse(format!(
                "getMultipleAccounts returned {} entries for {} addresses",
                accounts.len(),
                chunk.len(),
            )));
        }
        for (address, maybe) in chunk.iter().zip(accounts) {
            let data = maybe.map(|bytes| decode(&bytes)).transpose()?;
            if data.is_none() {
                trace!(%address, "no account");
            }
            out.push(MaybeAccount { address: *address, data });
        }
    }
    Ok(out)
}
