use std::cmp::Reverse;

use borsh::BorshDeserialize;
use solana_account_decoder::{UiAccountEncoding, UiDataSliceConfig};
use solana_client::{
    rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig},
    rpc_filter::{Memcmp, RpcFilterType},
};
use solana_sdk::{account::Account, commitment_config::CommitmentConfig, pubkey::Pubkey};
use tracing::warn;

use crate::{
    error::ClientError,
    state::{Poll, PollAccount, SearchById, SearchByOwner, ID_FIELD_OFFSET},
};

/// Matches the encoded `owner` field, which sits at the very start of the
/// poll layout.
pub(crate) fn owner_filter(owner: &str) -> Result<RpcFilterType, ClientError> {
    let probe = borsh::to_vec(&SearchByOwner {
        owner: owner.to_string(),
    })
    .map_err(ClientError::Encode)?;
    Ok(RpcFilterType::Memcmp(Memcmp::new_raw_bytes(0, probe)))
}

/// Matches the encoded `id` field at its fixed offset. Only valid for polls
/// whose owner is the default tag, see [`ID_FIELD_OFFSET`].
pub(crate) fn id_filter(id: &str) -> Result<RpcFilterType, ClientError> {
    let probe = borsh::to_vec(&SearchById { id: id.to_string() }).map_err(ClientError::Encode)?;
    Ok(RpcFilterType::Memcmp(Memcmp::new_raw_bytes(
        ID_FIELD_OFFSET,
        probe,
    )))
}

pub(crate) fn scan_config(
    filter: RpcFilterType,
    data_slice: Option<UiDataSliceConfig>,
) -> RpcProgramAccountsConfig {
    RpcProgramAccountsConfig {
        filters: Some(vec![filter]),
        account_config: RpcAccountInfoConfig {
            encoding: Some(UiAccountEncoding::Base64),
            data_slice,
            commitment: Some(CommitmentConfig::confirmed()),
            ..RpcAccountInfoConfig::default()
        },
        ..RpcProgramAccountsConfig::default()
    }
}

/// Decodes a scan batch. One corrupt account must not sink the whole list,
/// so undecodable records are logged and dropped.
pub(crate) fn decode_polls(
    accounts: impl IntoIterator<Item = (Pubkey, Account)>,
) -> Vec<PollAccount> {
    accounts
        .into_iter()
        .filter_map(|(pubkey, account)| match Poll::try_from_slice(&account.data) {
            Ok(poll) => Some(PollAccount { poll, pubkey }),
            Err(err) => {
                warn!("Skipping undecodable poll account {pubkey}: {err}");
                None
            }
        })
        .collect()
}

/// Newest first, comparing timestamps numerically. Stable, so decode order
/// breaks ties.
pub(crate) fn sort_newest_first(polls: &mut [PollAccount]) {
    polls.sort_by_key(|p| Reverse(timestamp_secs(&p.poll)));
}

fn timestamp_secs(poll: &Poll) -> u64 {
    poll.timestamp.parse().unwrap_or(0)
}
