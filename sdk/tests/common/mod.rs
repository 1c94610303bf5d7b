//! In-memory `AccountSource` and account fixtures shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use solana_client::client_error::ClientErrorKind;
use solana_client::rpc_filter::RpcFilterType;
use solana_sdk::pubkey::Pubkey;
use whirlpool_positions::{
    state::{account_discriminator, POSITION_BUNDLE_LEN, POSITION_LEN, TOKEN_ACCOUNT_LEN},
    AccountSource, Error, Result, TokenProgram,
};

#[derive(Default)]
pub struct MockSource {
    pub accounts:         HashMap<Pubkey, Vec<u8>>,
    pub token_accounts:   HashMap<Pubkey, Vec<(Pubkey, Vec<u8>)>>,
    pub program_accounts: Vec<(Pubkey, Vec<u8>)>,
    pub fail_fetches:     bool,
    multiple_calls:       AtomicUsize,
    requested_chunks:     Mutex<Vec<usize>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, address: Pubkey, data: Vec<u8>) -> Self {
        self.accounts.insert(address, data);
        self
    }

    /// Add a token account for `owner` under `program`; returns the token account address.
    pub fn add_holding(&mut self, program: TokenProgram, owner: &Pubkey, mint: &Pubkey, amount: u64) -> Pubkey {
        let address = Pubkey::new_unique();
        self.token_accounts
            .entry(program.program_id())
            .or_default()
            .push((address, token_account_bytes(mint, owner, amount)));
        address
    }

    pub fn multiple_calls(&self) -> usize {
        self.multiple_calls.load(Ordering::SeqCst)
    }

    pub fn requested_chunks(&self) -> Vec<usize> {
        self.requested_chunks.lock().unwrap().clone()
    }
}

#[async_trait]
impl AccountSource for MockSource {
    async fn token_accounts_by_owner(
        &self,
        owner: &Pubkey,
        token_program: &Pubkey,
    ) -> Result<Vec<(Pubkey, Vec<u8>)>> {
        Ok(self
            .token_accounts
            .get(token_program)
            .map(|accounts| {
                accounts
                    .iter()
                    .filter(|(_, data)| data[32..64] == owner.to_bytes())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn multiple_accounts(&self, addresses: &[Pubkey]) -> Result<Vec<Option<Vec<u8>>>> {
        self.multiple_calls.fetch_add(1, Ordering::SeqCst);
        self.requested_chunks.lock().unwrap().push(addresses.len());
        if self.fail_fetches {
            return Err(Error::Rpc(ClientErrorKind::Custom("node unavailable".into()).into()));
        }
        Ok(addresses.iter().map(|a| self.accounts.get(a).cloned()).collect())
    }

    async fn program_accounts(
        &self,
        _program_id: &Pubkey,
        filters: Vec<RpcFilterType>,
    ) -> Result<Vec<(Pubkey, Vec<u8>)>> {
        Ok(self
            .program_accounts
            .iter()
            .filter(|(_, data)| {
                filters.iter().all(|filter| match filter {
                    RpcFilterType::DataSize(size) => data.len() as u64 == *size,
                    RpcFilterType::Memcmp(memcmp) => memcmp.bytes_match(data),
                    _ => true,
                })
            })
            .cloned()
            .collect())
    }
}

// ─── Fixtures ─────────────────────────────────────────────────────────────────

pub fn token_account_bytes(mint: &Pubkey, owner: &Pubkey, amount: u64) -> Vec<u8> {
    let mut data = vec![0u8; TOKEN_ACCOUNT_LEN];
    data[..32].copy_from_slice(mint.as_ref());
    data[32..64].copy_from_slice(owner.as_ref());
    data[64..72].copy_from_slice(&amount.to_le_bytes());
    data
}

pub fn position_bytes(whirlpool: &Pubkey, position_mint: &Pubkey, liquidity: u128) -> Vec<u8> {
    let mut data = vec![0u8; POSITION_LEN];
    data[..8].copy_from_slice(&account_discriminator("Position"));
    data[8..40].copy_from_slice(whirlpool.as_ref());
    data[40..72].copy_from_slice(position_mint.as_ref());
    data[72..88].copy_from_slice(&liquidity.to_le_bytes());
    data
}

pub fn bundle_bytes(bundle_mint: &Pubkey, occupied: &[u16]) -> Vec<u8> {
    let mut data = vec![0u8; POSITION_BUNDLE_LEN];
    data[..8].copy_from_slice(&account_discriminator("PositionBundle"));
    data[8..40].copy_from_slice(bundle_mint.as_ref());
    for &slot in occupied {
        data[40 + slot as usize / 8] |= 1 << (slot % 8);
    }
    data
}
