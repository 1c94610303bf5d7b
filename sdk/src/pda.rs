//! Program IDs and PDA derivation helpers.
//!
//! Seeds mirror the Whirlpool program's `#[account(seeds = ...)]` constraints.

use solana_sdk::{pubkey, pubkey::Pubkey};

// ─── Well-known program IDs ───────────────────────────────────────────────────

/// Whirlpool concentrated-liquidity program (mainnet-beta and devnet).
pub const WHIRLPOOL_PROGRAM_ID: Pubkey = pubkey!("whirLbMiicVdio4qvUfM5KAg6Ct8VwpYzGff3uctyCc");

/// Legacy SPL Token program.
pub const TOKEN_PROGRAM_ID: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

/// SPL Token-2022 program.
pub const TOKEN_2022_PROGRAM_ID: Pubkey = pubkey!("TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb");

// ─── PDA seeds ────────────────────────────────────────────────────────────────

pub const POSITION_SEED:         &[u8] = b"position";
pub const POSITION_BUNDLE_SEED:  &[u8] = b"position_bundle";
pub const BUNDLED_POSITION_SEED: &[u8] = b"bundled_position";

// ─── PDA derivation helpers ───────────────────────────────────────────────────

/// Derive the standalone position PDA owned by a position mint.
pub fn derive_position(position_mint: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[POSITION_SEED, position_mint.as_ref()], program_id)
}

/// Derive the position-bundle PDA owned by a bundle mint.
pub fn derive_position_bundle(bundle_mint: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[POSITION_BUNDLE_SEED, bundle_mint.as_ref()], program_id)
}

/// Derive the position PDA living in slot `bundle_index` of a bundle.
///
/// The index seed is the decimal string of the slot, not its LE bytes.
pub fn derive_bundled_position(
    bundle_mint:  &Pubkey,
    bundle_index: u16,
    program_id:   &Pubkey,
) -> (Pubkey, u8) {
    let index = bundle_index.to_string();
    Pubkey::find_program_address(
        &[BUNDLED_POSITION_SEED, bundle_mint.as_ref(), index.as_bytes()],
        program_id,
    )
}
