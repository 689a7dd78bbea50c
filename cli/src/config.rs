use blockpoll_client::DEFAULT_OWNER;
use config::{Config, File};
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};
use solana_sdk::pubkey::Pubkey;
use std::path::PathBuf;
use tracing::debug;

#[serde_as]
#[derive(Debug, Deserialize)]
pub(crate) struct CliConfig {
    pub rpc_url: String,
    #[serde_as(as = "DisplayFromStr")]
    pub program_id: Pubkey,
    pub keypair_path: PathBuf,
    /// Grouping tag written to created polls. By-id lookup only covers the
    /// default tag.
    #[serde(default = "default_owner")]
    pub owner: String,
}

fn default_owner() -> String {
    DEFAULT_OWNER.to_string()
}

impl CliConfig {
    pub(super) fn from_path(config_path: PathBuf) -> Self {
        debug!("Reading config from path {:?}", config_path);
        let config = Config::builder()
            .add_source(File::from(config_path))
            // no nesting separator: the fields here are flat, so
            // BLOCKPOLL_RPC_URL must map to `rpc_url`, not `rpc.url`
            .add_source(config::Environment::with_prefix("BLOCKPOLL"))
            .build()
            .expect("Failed to build envs");

        config
            .try_deserialize()
            .expect("Failed to deserialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_overrides_multi_word_key() {
        let path = std::env::temp_dir().join("blockpoll-cli-config-test.toml");
        std::fs::write(
            &path,
            concat!(
                "rpc_url = \"https://file.example\"\n",
                "program_id = \"11111111111111111111111111111111\"\n",
                "keypair_path = \"/tmp/id.json\"\n",
            ),
        )
        .unwrap();

        std::env::set_var("BLOCKPOLL_RPC_URL", "https://env.example");
        let config = CliConfig::from_path(path);
        std::env::remove_var("BLOCKPOLL_RPC_URL");

        assert_eq!(config.rpc_url, "https://env.example");
        assert_eq!(config.keypair_path, PathBuf::from("/tmp/id.json"));
        assert_eq!(config.owner, DEFAULT_OWNER);
    }
}
