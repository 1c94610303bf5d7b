//! Resolver settings shared by both read pipelines.

use solana_sdk::pubkey::Pubkey;

use crate::pda::WHIRLPOOL_PROGRAM_ID;

/// `getMultipleAccounts` accepts at most 100 addresses per request.
pub const DEFAULT_BATCH_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Program that owns `Position` / `PositionBundle` accounts.
    pub program_id: Pubkey,
    /// Addresses per `getMultipleAccounts` call.
    pub batch_size: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            program_id: WHIRLPOOL_PROGRAM_ID,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl FetchConfig {
    /// Override the program ID (useful for locally deployed programs in tests).
    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = program_id;
        self
    }

    /// Lower the per-request account cap for RPC providers stricter than 100.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }
}
