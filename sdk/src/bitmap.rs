//! Occupancy bitmap of a position bundle.
//!
//! Bits are packed little-endian within each byte: slot `i` lives in
//! `bytes[i / 8]` under mask `1 << (i % 8)`.

use serde::Serialize;

use crate::error::{Error, Result};

/// Number of bundled-position slots in one `PositionBundle`.
pub const POSITION_BUNDLE_SIZE: u16 = 256;

/// Bytes needed to store [`POSITION_BUNDLE_SIZE`] bits.
pub const POSITION_BITMAP_LEN: usize = POSITION_BUNDLE_SIZE as usize / 8;

/// Return the indices of every set bit in `[0, bit_count)`, ascending.
///
/// `bit_count` is a protocol constant, not derived from `bytes.len()`; a
/// buffer shorter than `ceil(bit_count / 8)` is rejected.
pub fn enumerate_set_bits(bytes: &[u8], bit_count: u16) -> Result<Vec<u16>> {
    let required = (bit_count as usize).div_ceil(8);
    if bytes.len() < required {
        return Err(Error::BitmapTooShort { len: bytes.len(), required });
    }
    Ok((0..bit_count).filter(|&i| bit_is_set(bytes, i)).collect())
}

fn bit_is_set(bytes: &[u8], index: u16) -> bool {
    let i = index as usize;
    bytes[i / 8] & (1 << (i % 8)) != 0
}

// ─── PositionBitmap ───────────────────────────────────────────────────────────

/// Fixed-capacity bit set tracking which bundle slots hold a live position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct PositionBitmap([u8; POSITION_BITMAP_LEN]);

impl PositionBitmap {
    pub const fn new(bytes: [u8; POSITION_BITMAP_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; POSITION_BITMAP_LEN] {
        &self.0
    }

    /// `true` when slot `index` is occupied. Out-of-range indices are never occupied.
    pub fn is_occupied(&self, index: u16) -> bool {
        index < POSITION_BUNDLE_SIZE && bit_is_set(&self.0, index)
    }

    /// Occupied slot indices in ascending order.
    pub fn occupied_indices(&self) -> Vec<u16> {
        (0..POSITION_BUNDLE_SIZE).filter(|&i| bit_is_set(&self.0, i)).collect()
    }

    pub fn occupied_count(&self) -> u32 {
        self.0.iter().map(|b| b.count_ones()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    pub fn is_full(&self) -> bool {
        self.0.iter().all(|&b| b == u8::MAX)
    }

    /// Lowest free slot, or `None` when every slot is taken.
    pub fn first_unoccupied(&self) -> Option<u16> {
        (0..POSITION_BUNDLE_SIZE).find(|&i| !bit_is_set(&self.0, i))
    }
}
