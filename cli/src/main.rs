use blockpoll_client::{
    state::validate_poll_input, ClientError, PollAccount, PollClient,
};
use clap::{Parser, Subcommand};
use solana_sdk::{
    native_token::sol_to_lamports,
    signature::{read_keypair_file, Keypair},
    signer::Signer,
};
use std::{env, path::PathBuf};
use tracing::{debug, error};

use crate::{
    config::CliConfig,
    output::{format_timestamp, shorten, truncate_question, vote_bar},
};

mod config;
mod output;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(long, short, help = "Common config path")]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new poll
    Create {
        #[arg(long, short)]
        question: String,
        #[arg(long, short, help = "Repeat for each answer option")]
        option: Vec<String>,
    },
    /// Cast a vote on a poll
    Vote {
        id: String,
        #[arg(long, short)]
        option: String,
    },
    /// List polls under the configured owner tag
    List,
    /// Show a poll's question and results
    Show { id: String },
    /// Count polls under the configured owner tag
    Count,
    /// Show the wallet balance in SOL
    Balance,
    /// Request devnet funds for the wallet
    Airdrop {
        #[arg(long, default_value_t = 1.0)]
        sol: f64,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse_from(env::args());
    let config = CliConfig::from_path(cli.config);
    let client = PollClient::new(config.rpc_url.clone(), config.program_id);
    let wallet = read_keypair_file(&config.keypair_path).ok();

    if let Err(err) = run(cli.command, &client, &config, wallet.as_ref()).await {
        error!("{err}");
        std::process::exit(1);
    }
}

async fn run(
    command: Command,
    client: &PollClient,
    config: &CliConfig,
    wallet: Option<&Keypair>,
) -> Result<(), ClientError> {
    match command {
        Command::Create { question, option } => {
            let wallet = wallet.ok_or(ClientError::WalletDisconnected)?;
            validate_poll_input(&question, &option)?;

            let (signature, id) = client
                .create_poll(wallet, &question, option, &config.owner)
                .await?;
            println!("Submitted poll {id} in transaction {}", shorten(&signature.to_string(), 13));
            client.confirm_transaction(&signature).await?;
            println!("Poll {id} confirmed");
        }
        Command::Vote { id, option } => {
            let wallet = wallet.ok_or(ClientError::WalletDisconnected)?;
            let poll_account = client
                .fetch_poll_by_id(&id)
                .await?
                .ok_or(ClientError::PollNotFound { id })?;
            if !poll_account.poll.has_option(&option) {
                return Err(ClientError::UnknownOption { option });
            }

            let signature = client
                .cast_vote(wallet, &poll_account.pubkey, &option)
                .await?;
            println!("Submitted vote in transaction {}", shorten(&signature.to_string(), 13));
            client.confirm_transaction(&signature).await?;
            println!("Vote confirmed");
        }
        Command::List => {
            let polls = client.fetch_polls_by_owner(&config.owner).await?;
            if polls.is_empty() {
                println!("No polls found");
            }
            for PollAccount { poll, .. } in &polls {
                println!(
                    "{}  {:<28}  {:>4} votes  {}",
                    poll.id,
                    truncate_question(&poll.question, 25),
                    poll.votes.iter().map(|&v| u64::from(v)).sum::<u64>(),
                    format_timestamp(&poll.timestamp),
                );
            }
        }
        Command::Show { id } => {
            let Some(poll_account) = client.fetch_poll_by_id(&id).await? else {
                println!("No poll found with id {id}");
                return Ok(());
            };
            let poll = &poll_account.poll;
            debug!("Poll account {}", poll_account.pubkey);

            println!("{}", poll.question);
            println!("Created {}", format_timestamp(&poll.timestamp));
            let max = poll.votes.iter().copied().max().unwrap_or(0);
            for (option, &count) in poll.options.iter().zip(&poll.votes) {
                println!("  {:<20} {} {count}", option, vote_bar(count, max, 20));
            }
        }
        Command::Count => {
            println!("{}", client.count_polls(&config.owner).await?);
        }
        Command::Balance => {
            let wallet = wallet.ok_or(ClientError::WalletDisconnected)?;
            let sol = client.balance(&wallet.pubkey()).await?;
            println!("{sol} SOL");
        }
        Command::Airdrop { sol } => {
            let wallet = wallet.ok_or(ClientError::WalletDisconnected)?;
            let signature = client
                .request_airdrop(&wallet.pubkey(), sol_to_lamports(sol))
                .await?;
            println!("Airdrop requested in transaction {}", shorten(&signature.to_string(), 13));
            client.confirm_transaction(&signature).await?;
            println!("Airdrop confirmed");
        }
    }

    Ok(())
}
