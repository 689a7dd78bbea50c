use borsh::{BorshDeserialize, BorshSerialize};
use rand::{distributions::Alphanumeric, thread_rng, Rng};
use solana_sdk::pubkey::Pubkey;

use crate::error::ClientError;

/// Owner tag recorded on polls that are not scoped to a particular user.
pub const DEFAULT_OWNER: &str = "anonymous";

/// Length of a client-generated poll identifier.
pub const POLL_ID_LEN: usize = 7;

/// Byte offset of the `id` field in a serialized [`Poll`]: the u32 length
/// prefix of `owner` plus the default owner tag itself. By-id lookups match
/// bytes at this offset and therefore only cover polls created with
/// [`DEFAULT_OWNER`].
pub const ID_FIELD_OFFSET: usize = 4 + DEFAULT_OWNER.len();

/// Client-side timestamp placeholder. Ten bytes so the serialized account
/// size matches the epoch-seconds string the program writes on creation.
pub const TIMESTAMP_PLACEHOLDER: &str = "0000000000";

pub const ACTION_CREATE_POLL: u8 = 0;
pub const ACTION_CAST_VOTE: u8 = 1;

/// Contents of an on-chain poll account. The program allocates the account
/// with exactly these bytes and later rewrites `timestamp` and the `votes`
/// counters, so the field order is part of the wire format.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Poll {
    pub owner: String,
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    /// `votes[i]` counts ballots for `options[i]`.
    pub votes: Vec<u32>,
    pub seed_bump: u8,
    pub timestamp: String,
}

impl Poll {
    pub fn new(
        owner: String,
        id: String,
        question: String,
        options: Vec<String>,
        seed_bump: u8,
    ) -> Self {
        let votes = vec![0; options.len()];
        Self {
            owner,
            id,
            question,
            options,
            votes,
            seed_bump,
            timestamp: TIMESTAMP_PLACEHOLDER.to_string(),
        }
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// A decoded poll together with the account that holds it.
#[derive(Clone, Debug)]
pub struct PollAccount {
    pub poll: Poll,
    pub pubkey: Pubkey,
}

/// Ballot payload, embedded in a cast-vote instruction. Never stored.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Vote {
    pub option: String,
}

/// Envelope for every write the program accepts. `space` and `lamports` are
/// only non-zero when a new account is being created.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct PollInstruction {
    pub action: u8,
    pub data: Vec<u8>,
    pub space: u64,
    pub lamports: u64,
}

/// Byte probe for memcmp scans at offset 0.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SearchByOwner {
    pub owner: String,
}

/// Byte probe for memcmp scans at [`ID_FIELD_OFFSET`].
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SearchById {
    pub id: String,
}

/// Generates a fresh 7-character alphanumeric poll identifier. Uniqueness is
/// probabilistic only; collisions surface at creation time as
/// [`ClientError::PollIdTaken`].
pub fn generate_poll_id() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(POLL_ID_LEN)
        .map(char::from)
        .collect()
}

/// Precondition checks for poll creation, run before any network call.
pub fn validate_poll_input(question: &str, options: &[String]) -> Result<(), ClientError> {
    if question.trim().is_empty() {
        return Err(ClientError::EmptyQuestion);
    }
    if options.is_empty() {
        return Err(ClientError::NoOptions);
    }
    if options.iter().any(|o| o.trim().is_empty()) {
        return Err(ClientError::EmptyOption);
    }
    Ok(())
}
