//! Resolve every position and position bundle held by a wallet.
//!
//! Positions are NFTs: the wallet holds exactly one token of the position
//! mint, and the position account is a PDA of that mint. Bundles work the
//! same way, with up to [`POSITION_BUNDLE_SIZE`](crate::bitmap::POSITION_BUNDLE_SIZE)
//! positions hanging off one bundle mint. Resolution takes two fetch rounds:
//! candidates first, then the slots of whichever bundles exist.

use std::collections::HashMap;

use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use crate::config::FetchConfig;
use crate::error::Result;
use crate::fetch::fetch_batched;
use crate::pda::{derive_bundled_position, derive_position, derive_position_bundle};
use crate::rpc::AccountSource;
use crate::state::{parse_position, parse_position_bundle, parse_token_account};
use crate::types::{
    HydratedPosition, HydratedPositionBundle, PositionData, TokenHolding, TokenProgram,
};

/// Fetch every position and position bundle owned by `owner`.
///
/// Results follow the wallet's token accounts: SPL Token holdings first, then
/// Token-2022 holdings, each in the order the RPC node returned them. A
/// holding whose position PDA and bundle PDA both exist yields both entries.
pub async fn fetch_positions_for_owner<S>(
    source: &S,
    owner:  &Pubkey,
    config: &FetchConfig,
) -> Result<Vec<PositionData>>
where
    S: AccountSource + ?Sized,
{
    let holdings = fetch_position_holdings(source, owner).await?;
    debug!(%owner, candidates = holdings.len(), "position candidates");

    // PDA derivation is pure hashing with no I/O; one pass, joined before any fetch.
    let program_id = &config.program_id;
    let (position_addresses, bundle_addresses): (Vec<Pubkey>, Vec<Pubkey>) = holdings
        .iter()
        .map(|h| {
            (
                derive_position(&h.mint, program_id).0,
                derive_position_bundle(&h.mint, program_id).0,
            )
        })
        .unzip();

    let (positions, bundles) = tokio::try_join!(
        fetch_batched(source, &position_addresses, config.batch_size, parse_position),
        fetch_batched(source, &bundle_addresses, config.batch_size, parse_position_bundle),
    )?;

    // Second round: every occupied slot of every existing bundle, in one pass.
    let bundled_addresses: Vec<Pubkey> = bundles
        .iter()
        .filter_map(|b| b.data.as_ref())
        .flat_map(|bundle| {
            let mint = bundle.position_bundle_mint;
            bundle
                .position_bitmap
                .occupied_indices()
                .into_iter()
                .map(move |index| derive_bundled_position(&mint, index, program_id).0)
        })
        .collect();
    debug!(
        bundles = bundles.iter().filter(|b| b.exists()).count(),
        bundled_positions = bundled_addresses.len(),
        "resolving bundle slots"
    );

    let bundled = fetch_batched(source, &bundled_addresses, config.batch_size, parse_position).await?;
    let groups = PositionGroups::new(
        bundled
            .into_iter()
            .filter_map(|m| m.into_existing())
            .map(|(address, data)| HydratedPosition { address, data })
            .collect(),
    );

    let mut result = Vec::new();
    for ((holding, position), bundle) in holdings.iter().zip(positions).zip(bundles) {
        if let Some((address, data)) = position.into_existing() {
            result.push(PositionData::Position {
                position:      HydratedPosition { address, data },
                token_program: holding.token_program,
            });
        }
        if let Some((address, data)) = bundle.into_existing() {
            let positions = groups.get(&data.position_bundle_mint);
            result.push(PositionData::PositionBundle {
                bundle:        HydratedPositionBundle { address, data, positions },
                token_program: holding.token_program,
            });
        }
    }

    debug!(%owner, entries = result.len(), "owner positions resolved");
    Ok(result)
}

/// List the wallet's token accounts under both token programs and keep the
/// ones holding exactly one token.
pub async fn fetch_position_holdings<S>(source: &S, owner: &Pubkey) -> Result<Vec<TokenHolding>>
where
    S: AccountSource + ?Sized,
{
    let [first, second] = TokenProgram::ALL;
    let (first_id, second_id) = (first.program_id(), second.program_id());
    let (first_accounts, second_accounts) = tokio::try_join!(
        source.token_accounts_by_owner(owner, &first_id),
        source.token_accounts_by_owner(owner, &second_id),
    )?;

    let mut holdings = Vec::new();
    for (token_program, accounts) in [(first, first_accounts), (second, second_accounts)] {
        for (address, data) in accounts {
            let account = parse_token_account(&data)?;
            if account.amount == 1 {
                holdings.push(TokenHolding {
                    address,
                    mint: account.mint,
                    amount: account.amount,
                    token_program,
                });
            }
        }
    }
    Ok(holdings)
}

// ─── Grouping ─────────────────────────────────────────────────────────────────

/// Bundled positions indexed by `position_mint`.
///
/// A bundled position records its bundle's mint as its own `position_mint`,
/// so the bundle mint is the lookup key.
struct PositionGroups {
    arena: Vec<HydratedPosition>,
    index: HashMap<Pubkey, Vec<usize>>,
}

impl PositionGroups {
    fn new(arena: Vec<HydratedPosition>) -> Self {
        let mut index: HashMap<Pubkey, Vec<usize>> = HashMap::new();
        for (i, position) in arena.iter().enumerate() {
            index.entry(position.data.position_mint).or_default().push(i);
        }
        Self { arena, index }
    }

    /// Positions whose mint is `mint`, in fetch order; empty if none.
    fn get(&self, mint: &Pubkey) -> Vec<HydratedPosition> {
        self.index
            .get(mint)
            .map(|slots| slots.iter().map(|&i| self.arena[i].clone()).collect())
            .unwrap_or_default()
    }
}
