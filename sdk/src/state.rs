//! On-chain account deserialization.
//!
//! Parses raw account bytes for `Position` (216 bytes), `PositionBundle`
//! (136 bytes) and packed SPL / Token-2022 token accounts.
//! Byte offsets mirror the Anchor `#[account]` layout exactly.

use serde::{Serialize, Serializer};
use solana_sdk::{hash::hash, pubkey::Pubkey};

use crate::bitmap::{PositionBitmap, POSITION_BITMAP_LEN};
use crate::error::{Error, Result};

/// Size of a `Position` account, discriminator included.
pub const POSITION_LEN: usize = 216;
/// Size of a `PositionBundle` account, discriminator included.
pub const POSITION_BUNDLE_LEN: usize = 136;
/// Size of the base SPL token account; Token-2022 extensions follow it.
pub const TOKEN_ACCOUNT_LEN: usize = 165;

/// Reward slots tracked per position.
pub const NUM_REWARDS: usize = 3;

/// Byte offset of `Position::whirlpool`; used by the pool-scoped memcmp filter.
pub const POSITION_WHIRLPOOL_OFFSET: usize = 8;

// ─── Position ─────────────────────────────────────────────────────────────────

/// Deserialized `Position` account state.
///
/// Layout (after 8-byte Anchor discriminator):
/// ```text
/// whirlpool(32)  position_mint(32)  liquidity(16)
/// tick_lower_index(4)  tick_upper_index(4)
/// fee_growth_checkpoint_a(16)  fee_owed_a(8)
/// fee_growth_checkpoint_b(16)  fee_owed_b(8)
/// reward_infos(3 × 24)  = 216 bytes
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Position {
    #[serde(serialize_with = "serialize_pubkey")]
    pub whirlpool:               Pubkey,
    #[serde(serialize_with = "serialize_pubkey")]
    pub position_mint:           Pubkey,
    pub liquidity:               u128,
    pub tick_lower_index:        i32,
    pub tick_upper_index:        i32,
    pub fee_growth_checkpoint_a: u128,
    pub fee_owed_a:              u64,
    pub fee_growth_checkpoint_b: u128,
    pub fee_owed_b:              u64,
    pub reward_infos:            [PositionRewardInfo; NUM_REWARDS],
}

/// Per-reward accrual snapshot stored inside a `Position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PositionRewardInfo {
    pub growth_inside_checkpoint: u128,
    pub amount_owed:              u64,
}

/// Deserialize a `Position` account from raw bytes.
pub fn parse_position(data: &[u8]) -> Result<Position> {
    check_account(data, "Position", POSITION_LEN)?;

    let mut reward_infos = [PositionRewardInfo::default(); NUM_REWARDS];
    for (i, info) in reward_infos.iter_mut().enumerate() {
        let base = 144 + i * 24;
        *info = PositionRewardInfo {
            growth_inside_checkpoint: read_u128(data, base)?,
            amount_owed:              read_u64(data, base + 16)?,
        };
    }

    Ok(Position {
        whirlpool:               read_pubkey(data, POSITION_WHIRLPOOL_OFFSET)?,
        position_mint:           read_pubkey(data, 40)?,
        liquidity:               read_u128(data, 72)?,
        tick_lower_index:        read_i32(data, 88)?,
        tick_upper_index:        read_i32(data, 92)?,
        fee_growth_checkpoint_a: read_u128(data, 96)?,
        fee_owed_a:              read_u64(data, 112)?,
        fee_growth_checkpoint_b: read_u128(data, 120)?,
        fee_owed_b:              read_u64(data, 136)?,
        reward_infos,
    })
}

// ─── PositionBundle ───────────────────────────────────────────────────────────

/// Deserialized `PositionBundle` account state.
///
/// Layout (after 8-byte Anchor discriminator):
/// ```text
/// position_bundle_mint(32)  position_bitmap(32)  reserved(64)  = 136 bytes
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionBundle {
    #[serde(serialize_with = "serialize_pubkey")]
    pub position_bundle_mint: Pubkey,
    pub position_bitmap:      PositionBitmap,
}

/// Deserialize a `PositionBundle` account from raw bytes.
pub fn parse_position_bundle(data: &[u8]) -> Result<PositionBundle> {
    check_account(data, "PositionBundle", POSITION_BUNDLE_LEN)?;

    let bitmap: [u8; POSITION_BITMAP_LEN] = read_array(data, 40)?;
    Ok(PositionBundle {
        position_bundle_mint: read_pubkey(data, 8)?,
        position_bitmap:      PositionBitmap::new(bitmap),
    })
}

// ─── SPL token account ────────────────────────────────────────────────────────

/// The fields of a packed token account this crate cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenAccountState {
    pub mint:   Pubkey,
    pub owner:  Pubkey,
    pub amount: u64,
}

/// Read `mint`, `owner` and `amount` from a packed token account.
///
/// Token account layout: `mint(32) owner(32) amount(8) …`. Token-2022
/// accounts share the base layout and append extensions after byte 165.
pub fn parse_token_account(data: &[u8]) -> Result<TokenAccountState> {
    if data.len() < TOKEN_ACCOUNT_LEN {
        return Err(Error::ParseError {
            offset: 0,
            reason: format!("Token account is {} bytes; need at least {}", data.len(), TOKEN_ACCOUNT_LEN),
        });
    }
    Ok(TokenAccountState {
        mint:   read_pubkey(data, 0)?,
        owner:  read_pubkey(data, 32)?,
        amount: read_u64(data, 64)?,
    })
}

// ─── Discriminators ───────────────────────────────────────────────────────────

/// Anchor account discriminator: `sha256("account:{TypeName}")[..8]`.
pub fn account_discriminator(type_name: &str) -> [u8; 8] {
    let h = hash(format!("account:{type_name}").as_bytes());
    let mut disc = [0u8; 8];
    disc.copy_from_slice(&h.to_bytes()[..8]);
    disc
}

fn check_account(data: &[u8], type_name: &str, expected: usize) -> Result<()> {
    if data.len() < expected {
        return Err(Error::ParseError {
            offset: 0,
            reason: format!("{type_name} account is {} bytes; expected {expected}", data.len()),
        });
    }
    if data[..8] != account_discriminator(type_name) {
        return Err(Error::ParseError {
            offset: 0,
            reason: format!("discriminator does not match {type_name}"),
        });
    }
    Ok(())
}

// ─── Byte-slice primitives ────────────────────────────────────────────────────

fn read_array<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N]> {
    data.get(offset..offset + N)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| Error::ParseError {
            offset,
            reason: format!("slice too short for {N} bytes"),
        })
}

pub(crate) fn read_pubkey(data: &[u8], offset: usize) -> Result<Pubkey> {
    read_array::<32>(data, offset).map(Pubkey::from)
}

pub(crate) fn read_i32(data: &[u8], offset: usize) -> Result<i32> {
    read_array(data, offset).map(i32::from_le_bytes)
}

pub(crate) fn read_u64(data: &[u8], offset: usize) -> Result<u64> {
    read_array(data, offset).map(u64::from_le_bytes)
}

pub(crate) fn read_u128(data: &[u8], offset: usize) -> Result<u128> {
    read_array(data, offset).map(u128::from_le_bytes)
}

// ─── Serde helpers ────────────────────────────────────────────────────────────

/// Serialize a `Pubkey` as its base58 string instead of a byte array.
pub(crate) fn serialize_pubkey<S: Serializer>(key: &Pubkey, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(key)
}
