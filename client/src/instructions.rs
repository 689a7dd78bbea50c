use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};

use crate::{
    error::ClientError,
    state::{PollInstruction, Vote, ACTION_CAST_VOTE, ACTION_CREATE_POLL},
};

/// Builds the create-poll instruction. `poll_data` is the serialized
/// [`crate::state::Poll`]; the new account is allocated with exactly that
/// many bytes and funded with `lamports` (the rent-exempt minimum for that
/// size, fetched by the caller).
pub fn create_poll_instruction(
    program_id: &Pubkey,
    wallet: &Pubkey,
    poll_pubkey: &Pubkey,
    poll_data: Vec<u8>,
    lamports: u64,
) -> Result<Instruction, ClientError> {
    let envelope = PollInstruction {
        action: ACTION_CREATE_POLL,
        space: poll_data.len() as u64,
        lamports,
        data: poll_data,
    };
    Ok(Instruction::new_with_bytes(
        *program_id,
        &borsh::to_vec(&envelope).map_err(ClientError::Encode)?,
        poll_account_metas(wallet, poll_pubkey),
    ))
}

/// Builds the cast-vote instruction. The increment of the matching vote
/// counter happens on-chain; this only carries the chosen option string.
/// Option membership is checked by the caller against a freshly fetched
/// poll, not here.
pub fn cast_vote_instruction(
    program_id: &Pubkey,
    wallet: &Pubkey,
    poll_pubkey: &Pubkey,
    option: &str,
) -> Result<Instruction, ClientError> {
    let vote = Vote {
        option: option.to_string(),
    };
    let envelope = PollInstruction {
        action: ACTION_CAST_VOTE,
        data: borsh::to_vec(&vote).map_err(ClientError::Encode)?,
        space: 0,
        lamports: 0,
    };
    Ok(Instruction::new_with_bytes(
        *program_id,
        &borsh::to_vec(&envelope).map_err(ClientError::Encode)?,
        poll_account_metas(wallet, poll_pubkey),
    ))
}

fn poll_account_metas(wallet: &Pubkey, poll_pubkey: &Pubkey) -> Vec<AccountMeta> {
    vec![
        AccountMeta::new(*wallet, true),
        AccountMeta::new(*poll_pubkey, false),
        AccountMeta::new_readonly(system_program::id(), false),
    ]
}

#[cfg(test)]
mod tests {
    use borsh::BorshDeserialize;

    use super::*;
    use crate::state::{Poll, DEFAULT_OWNER};

    #[test]
    fn test_create_poll_instruction() {
        let program_id = Pubkey::new_unique();
        let wallet = Pubkey::new_unique();
        let poll_pubkey = Pubkey::new_unique();
        let poll = Poll::new(
            DEFAULT_OWNER.to_string(),
            "AbC12z9".to_string(),
            "Favorite color?".to_string(),
            vec!["Red".to_string(), "Blue".to_string()],
            254,
        );
        let poll_data = borsh::to_vec(&poll).unwrap();

        let instruction = create_poll_instruction(
            &program_id,
            &wallet,
            &poll_pubkey,
            poll_data.clone(),
            890_880,
        )
        .unwrap();

        assert_eq!(instruction.program_id, program_id);
        let envelope = PollInstruction::try_from_slice(&instruction.data).unwrap();
        assert_eq!(envelope.action, ACTION_CREATE_POLL);
        assert_eq!(envelope.data, poll_data);
        assert_eq!(envelope.space, poll_data.len() as u64);
        assert_eq!(envelope.lamports, 890_880);
        assert_eq!(Poll::try_from_slice(&envelope.data).unwrap(), poll);
    }

    #[test]
    fn test_cast_vote_instruction() {
        let program_id = Pubkey::new_unique();
        let wallet = Pubkey::new_unique();
        let poll_pubkey = Pubkey::new_unique();

        let instruction =
            cast_vote_instruction(&program_id, &wallet, &poll_pubkey, "Blue").unwrap();

        let envelope = PollInstruction::try_from_slice(&instruction.data).unwrap();
        assert_eq!(envelope.action, ACTION_CAST_VOTE);
        assert_eq!(envelope.space, 0);
        assert_eq!(envelope.lamports, 0);
        let vote = Vote::try_from_slice(&envelope.data).unwrap();
        assert_eq!(vote.option, "Blue");
    }

    #[test]
    fn test_account_metas() {
        let wallet = Pubkey::new_unique();
        let poll_pubkey = Pubkey::new_unique();
        let metas = poll_account_metas(&wallet, &poll_pubkey);

        assert_eq!(metas.len(), 3);
        assert_eq!(metas[0].pubkey, wallet);
        assert!(metas[0].is_signer && metas[0].is_writable);
        assert_eq!(metas[1].pubkey, poll_pubkey);
        assert!(!metas[1].is_signer && metas[1].is_writable);
        assert_eq!(metas[2].pubkey, system_program::id());
        assert!(!metas[2].is_signer && !metas[2].is_writable);
    }
}
