use borsh::BorshDeserialize;
use solana_account_decoder::UiDataSliceConfig;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    instruction::Instruction,
    native_token::lamports_to_sol,
    pubkey::Pubkey,
    signature::Signature,
    signer::Signer,
    transaction::Transaction,
};
use tracing::{debug, warn};

use crate::{
    error::ClientError,
    instructions::{cast_vote_instruction, create_poll_instruction},
    pda::derive_poll_address,
    query,
    state::{generate_poll_id, Poll, PollAccount, DEFAULT_OWNER},
};

/// Client for the BlockPoll program. Reads run at confirmed commitment;
/// writes are fire-and-forget, pair them with [`Self::confirm_transaction`]
/// before re-querying or the read may be stale.
pub struct PollClient {
    rpc: RpcClient,
    program_id: Pubkey,
}

impl PollClient {
    pub fn new(rpc_url: String, program_id: Pubkey) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(rpc_url, CommitmentConfig::confirmed()),
            program_id,
        }
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    /// All polls tagged with `owner`, newest first.
    pub async fn fetch_polls_by_owner(
        &self,
        owner: &str,
    ) -> Result<Vec<PollAccount>, ClientError> {
        let config = query::scan_config(query::owner_filter(owner)?, None);
        let accounts = self
            .rpc
            .get_program_accounts_with_config(&self.program_id, config)
            .await?;
        let mut polls = query::decode_polls(accounts);
        query::sort_newest_first(&mut polls);
        Ok(polls)
    }

    /// Looks a poll up by its id. `None` when nothing matches; the first
    /// account wins if several do.
    pub async fn fetch_poll_by_id(&self, id: &str) -> Result<Option<PollAccount>, ClientError> {
        let config = query::scan_config(query::id_filter(id)?, None);
        let accounts = self
            .rpc
            .get_program_accounts_with_config(&self.program_id, config)
            .await?;
        match accounts.into_iter().next() {
            Some((pubkey, account)) => {
                let poll = Poll::try_from_slice(&account.data)
                    .map_err(|source| ClientError::Decode { pubkey, source })?;
                Ok(Some(PollAccount { poll, pubkey }))
            }
            None => Ok(None),
        }
    }

    /// Number of polls tagged with `owner`. Requests zero-length data slices
    /// so only the match count travels over the wire.
    pub async fn count_polls(&self, owner: &str) -> Result<usize, ClientError> {
        let config = query::scan_config(
            query::owner_filter(owner)?,
            Some(UiDataSliceConfig {
                offset: 0,
                length: 0,
            }),
        );
        let accounts = self
            .rpc
            .get_program_accounts_with_config(&self.program_id, config)
            .await?;
        Ok(accounts.len())
    }

    /// Creates a poll under a freshly generated id and returns the
    /// transaction signature together with that id. The caller validates the
    /// question and options first, see [`crate::state::validate_poll_input`].
    pub async fn create_poll(
        &self,
        wallet: &dyn Signer,
        question: &str,
        options: Vec<String>,
        owner: &str,
    ) -> Result<(Signature, String), ClientError> {
        let id = generate_poll_id();
        let (poll_pubkey, seed_bump) = derive_poll_address(&id, &self.program_id)?;
        if owner != DEFAULT_OWNER {
            warn!("Poll {id} is tagged {owner:?}; by-id lookup only covers {DEFAULT_OWNER:?}");
        }

        // A colliding id means someone already claimed the derived address.
        let existing = self
            .rpc
            .get_account_with_commitment(&poll_pubkey, CommitmentConfig::confirmed())
            .await?;
        if existing.value.is_some() {
            return Err(ClientError::PollIdTaken { id });
        }

        let poll = Poll::new(
            owner.to_string(),
            id.clone(),
            question.to_string(),
            options,
            seed_bump,
        );
        let poll_data = borsh::to_vec(&poll).map_err(ClientError::Encode)?;
        let lamports = self
            .rpc
            .get_minimum_balance_for_rent_exemption(poll_data.len())
            .await?;
        debug!(
            "Creating poll {id} at {poll_pubkey}: {} bytes, {lamports} lamports",
            poll_data.len()
        );

        let instruction = create_poll_instruction(
            &self.program_id,
            &wallet.pubkey(),
            &poll_pubkey,
            poll_data,
            lamports,
        )?;
        let signature = self.send(wallet, instruction).await?;
        Ok((signature, id))
    }

    /// Submits a vote for `option` on the poll account. The caller checks
    /// option membership against a freshly fetched poll before calling.
    pub async fn cast_vote(
        &self,
        wallet: &dyn Signer,
        poll_pubkey: &Pubkey,
        option: &str,
    ) -> Result<Signature, ClientError> {
        let instruction =
            cast_vote_instruction(&self.program_id, &wallet.pubkey(), poll_pubkey, option)?;
        self.send(wallet, instruction).await
    }

    /// Waits for the transaction to reach confirmed commitment. A failed
    /// confirmation is not retried here; signatures are single-use, so the
    /// caller must resubmit a fresh transaction instead.
    pub async fn confirm_transaction(&self, signature: &Signature) -> Result<(), ClientError> {
        let confirmed = self
            .rpc
            .confirm_transaction_with_commitment(signature, CommitmentConfig::confirmed())
            .await?;
        if confirmed.value {
            Ok(())
        } else {
            Err(ClientError::Unconfirmed {
                signature: *signature,
            })
        }
    }

    /// Account balance in SOL.
    pub async fn balance(&self, pubkey: &Pubkey) -> Result<f64, ClientError> {
        let lamports = self
            .rpc
            .get_balance_with_commitment(pubkey, CommitmentConfig::confirmed())
            .await?
            .value;
        Ok(lamports_to_sol(lamports))
    }

    /// Devnet faucet request.
    pub async fn request_airdrop(
        &self,
        pubkey: &Pubkey,
        lamports: u64,
    ) -> Result<Signature, ClientError> {
        Ok(self.rpc.request_airdrop(pubkey, lamports).await?)
    }

    async fn send(
        &self,
        wallet: &dyn Signer,
        instruction: Instruction,
    ) -> Result<Signature, ClientError> {
        let blockhash = self.rpc.get_latest_blockhash().await?;
        let signers: Vec<&dyn Signer> = vec![wallet];
        let transaction = Transaction::new_signed_with_payer(
            &[instruction],
            Some(&wallet.pubkey()),
            &signers,
            blockhash,
        );
        Ok(self.rpc.send_transaction(&transaction).await?)
    }
}
