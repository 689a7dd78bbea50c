use solana_sdk::{pubkey::Pubkey, signature::Signature};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to derive an address for poll id {id}, pick a different id")]
    AddressDerivation { id: String },
    #[error("Poll id {id} is already taken")]
    PollIdTaken { id: String },
    #[error("No poll found with id {id}")]
    PollNotFound { id: String },
    #[error("Poll account {pubkey} failed to decode: {source}")]
    Decode {
        pubkey: Pubkey,
        source: std::io::Error,
    },
    #[error("A poll needs a question")]
    EmptyQuestion,
    #[error("A poll needs at least one option")]
    NoOptions,
    #[error("Poll options must not be empty")]
    EmptyOption,
    #[error("{option:?} is not one of the poll's options")]
    UnknownOption { option: String },
    #[error("No wallet connected")]
    WalletDisconnected,
    #[error("Transaction {signature} was not confirmed")]
    Unconfirmed { signature: Signature },
    #[error("Solana RPC error: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),
    /// Not `#[from]`: encode sites map into this explicitly so a decode
    /// failure's io::Error can never be mistaken for an encode failure.
    #[error("Failed to encode record: {0}")]
    Encode(std::io::Error),
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn test_decode_and_encode_errors_are_distinct() {
        let pubkey = Pubkey::new_unique();
        let source = io::Error::new(io::ErrorKind::InvalidData, "Unexpected length of input");
        let decode = ClientError::Decode { pubkey, source };
        assert!(decode.to_string().contains(&pubkey.to_string()));

        let encode = ClientError::Encode(io::Error::other("out of memory"));
        assert!(encode.to_string().starts_with("Failed to encode"));
    }
}
