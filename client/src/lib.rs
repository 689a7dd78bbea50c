//! Client library for the BlockPoll program: borsh record schema, poll
//! address derivation, memcmp-filtered account queries and the create-poll /
//! cast-vote transaction builders.
//!
//! Polls live in program-derived accounts keyed by a 7-character id; they
//! are located without an index by scanning the program's accounts with byte
//! filters at fixed offsets of the serialized [`state::Poll`] layout.

pub mod client;
pub mod error;
pub mod instructions;
pub mod pda;
mod query;
pub mod state;

pub use client::PollClient;
pub use error::ClientError;
pub use state::{Poll, PollAccount, DEFAULT_OWNER};
