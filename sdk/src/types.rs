//! Result types returned by the resolver.

use serde::Serialize;
use solana_sdk::pubkey::Pubkey;

use crate::pda::{TOKEN_2022_PROGRAM_ID, TOKEN_PROGRAM_ID};
use crate::state::{serialize_pubkey, Position, PositionBundle};

// ─── Token programs ───────────────────────────────────────────────────────────

/// The token program that owns the account holding a position NFT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenProgram {
    Token,
    Token2022,
}

impl TokenProgram {
    /// Query order for owner resolution; results keep this order.
    pub const ALL: [TokenProgram; 2] = [TokenProgram::Token, TokenProgram::Token2022];

    pub fn program_id(self) -> Pubkey {
        match self {
            TokenProgram::Token     => TOKEN_PROGRAM_ID,
            TokenProgram::Token2022 => TOKEN_2022_PROGRAM_ID,
        }
    }

    pub fn from_program_id(program_id: &Pubkey) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.program_id() == *program_id)
    }
}

/// A token account held by the wallet that may represent a position or bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenHolding {
    /// The token account itself.
    pub address:       Pubkey,
    pub mint:          Pubkey,
    pub amount:        u64,
    pub token_program: TokenProgram,
}

// ─── Fetch results ────────────────────────────────────────────────────────────

/// One entry of a batched fetch: the requested address and, if an account
/// lives there, its decoded contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaybeAccount<T> {
    pub address: Pubkey,
    pub data:    Option<T>,
}

impl<T> MaybeAccount<T> {
    pub fn exists(&self) -> bool {
        self.data.is_some()
    }

    /// `(address, data)` for existing accounts, `None` otherwise.
    pub fn into_existing(self) -> Option<(Pubkey, T)> {
        let address = self.address;
        self.data.map(|data| (address, data))
    }
}

// ─── Hydrated positions ───────────────────────────────────────────────────────

/// A decoded `Position` together with its account address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HydratedPosition {
    #[serde(serialize_with = "serialize_pubkey")]
    pub address: Pubkey,
    pub data:    Position,
}

impl HydratedPosition {
    pub fn is_position_bundle(&self) -> bool {
        false
    }
}

/// A decoded `PositionBundle` with every live position in its slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HydratedPositionBundle {
    #[serde(serialize_with = "serialize_pubkey")]
    pub address:   Pubkey,
    pub data:      PositionBundle,
    pub positions: Vec<HydratedPosition>,
}

impl HydratedPositionBundle {
    pub fn is_position_bundle(&self) -> bool {
        true
    }
}

/// Everything a wallet can hold that represents liquidity in the program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PositionData {
    Position {
        #[serde(flatten)]
        position:      HydratedPosition,
        token_program: TokenProgram,
    },
    PositionBundle {
        #[serde(flatten)]
        bundle:        HydratedPositionBundle,
        token_program: TokenProgram,
    },
}

impl PositionData {
    pub fn address(&self) -> Pubkey {
        match self {
            PositionData::Position { position, .. }     => position.address,
            PositionData::PositionBundle { bundle, .. } => bundle.address,
        }
    }

    pub fn token_program(&self) -> TokenProgram {
        match self {
            PositionData::Position { token_program, .. }
            | PositionData::PositionBundle { token_program, .. } => *token_program,
        }
    }

    pub fn is_position_bundle(&self) -> bool {
        matches!(self, PositionData::PositionBundle { .. })
    }
}
