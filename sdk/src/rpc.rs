//! The three read-only RPC queries the resolver depends on.
//!
//! [`AccountSource`] is implemented for the nonblocking `RpcClient`; tests
//! substitute an in-memory source.

use std::str::FromStr;

use async_trait::async_trait;
use serde_json::json;
use solana_account_decoder_client_types::UiAccountEncoding;
use solana_client::{
    nonblocking::rpc_client::RpcClient,
    rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig},
    rpc_filter::RpcFilterType,
    rpc_request::RpcRequest,
    rpc_response::{Response, RpcKeyedAccount},
};
use solana_sdk::pubkey::Pubkey;

use crate::error::{Error, Result};

/// Raw account bytes keyed by address.
pub type KeyedAccountData = (Pubkey, Vec<u8>);

#[async_trait]
pub trait AccountSource: Send + Sync {
    /// `getTokenAccountsByOwner` restricted to one token program, base64-encoded.
    async fn token_accounts_by_owner(
        &self,
        owner:         &Pubkey,
        token_program: &Pubkey,
    ) -> Result<Vec<KeyedAccountData>>;

    /// `getMultipleAccounts`; one entry per address, `None` for missing accounts.
    async fn multiple_accounts(&self, addresses: &[Pubkey]) -> Result<Vec<Option<Vec<u8>>>>;

    /// `getProgramAccounts` with server-side filters.
    async fn program_accounts(
        &self,
        program_id: &Pubkey,
        filters:    Vec<RpcFilterType>,
    ) -> Result<Vec<KeyedAccountData>>;
}

#[async_trait]
impl AccountSource for RpcClient {
    async fn token_accounts_by_owner(
        &self,
        owner:         &Pubkey,
        token_program: &Pubkey,
    ) -> Result<Vec<KeyedAccountData>> {
        // The typed helper forces jsonParsed encoding; we want raw bytes.
        let config = RpcAccountInfoConfig {
            encoding:   Some(UiAccountEncoding::Base64),
            commitment: Some(self.commitment()),
            ..RpcAccountInfoConfig::default()
        };
        let response: Response<Vec<RpcKeyedAccount>> = self
            .send(
                RpcRequest::GetTokenAccountsByOwner,
                json!([owner.to_string(), { "programId": token_program.to_string() }, config]),
            )
            .await?;

        response
            .value
            .into_iter()
            .map(|keyed| {
                let address = Pubkey::from_str(&keyed.pubkey).map_err(|e| Error::ParseError {
                    offset: 0,
                    reason: format!("invalid token account address {}: {e}", keyed.pubkey),
                })?;
                let data = keyed.account.data.decode().ok_or_else(|| Error::ParseError {
                    offset: 0,
                    reason: format!("token account {address} was not returned as binary data"),
                })?;
                Ok((address, data))
            })
            .collect()
    }

    async fn multiple_accounts(&self, addresses: &[Pubkey]) -> Result<Vec<Option<Vec<u8>>>> {
        let accounts = self.get_multiple_accounts(addresses).await?;
        Ok(accounts.into_iter().map(|maybe| maybe.map(|acc| acc.data)).collect())
    }

    async fn program_accounts(
        &self,
        program_id: &Pubkey,
        filters:    Vec<RpcFilterType>,
    ) -> Result<Vec<KeyedAccountData>> {
        let config = RpcProgramAccountsConfig {
            filters: Some(filters),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                ..RpcAccountInfoConfig::default()
            },
            ..RpcProgramAccountsConfig::default()
        };
        let raw = self.get_program_accounts_with_config(program_id, config).await?;
        Ok(raw.into_iter().map(|(pk, acc)| (pk, acc.data)).collect())
    }
}
