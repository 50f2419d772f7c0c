use crate::config::ClientConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "paperspace")]
#[command(about = "Command-line access to the Paperspace API")]
pub struct CliConfig {
    /// TOML file with an [api] table
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, env = "PAPERSPACE_APIKEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, global = true, env = "PAPERSPACE_BASEURL")]
    pub base_url: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    #[command(subcommand)]
    Machines(MachinesCommand),
    #[command(subcommand)]
    Clusters(ClustersCommand),
    #[command(subcommand)]
    Networks(NetworksCommand),
    #[command(subcommand)]
    SshKeys(SshKeysCommand),
}

#[derive(Debug, Clone, Subcommand)]
pub enum MachinesCommand {
    List {
        /// Filter as key=value, repeatable
        #[arg(long = "filter", value_parser = parse_key_value)]
        filters: Vec<(String, String)>,
    },
    Get { id: String },
    Delete { id: String },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ClustersCommand {
    List,
    Get { id: String },
}

#[derive(Debug, Clone, Subcommand)]
pub enum NetworksCommand {
    List,
    Get { id: String },
    Delete { id: String },
}

#[derive(Debug, Clone, Subcommand)]
pub enum SshKeysCommand {
    List,
    Get {
        name: String,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        public_key: String,
    },
    Delete {
        id: String,
    },
}

fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

impl CliConfig {
    /// Config file first, then flags/environment on top.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::from_env(),
        };

        if let Some(api_key) = &self.api_key {
            config.api_key = api_key.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if self.verbose {
            config.debug = true;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ssh_key_create() {
        let cli = CliConfig::try_parse_from([
            "paperspace",
            "ssh-keys",
            "create",
            "--name",
            "laptop",
            "--public-key",
            "ssh-ed25519 AAAA",
            "--api-key",
            "k",
        ])
        .unwrap();

        assert_eq!(cli.api_key.as_deref(), Some("k"));
        match cli.command {
            Command::SshKeys(SshKeysCommand::Create { name, public_key }) => {
                assert_eq!(name, "laptop");
                assert_eq!(public_key, "ssh-ed25519 AAAA");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_machine_filters() {
        let cli = CliConfig::try_parse_from([
            "paperspace",
            "machines",
            "list",
            "--filter",
            "state=running",
            "--filter",
            "region=East Coast (NY2)",
        ])
        .unwrap();

        match cli.command {
            Command::Machines(MachinesCommand::List { filters }) => {
                assert_eq!(filters.len(), 2);
                assert_eq!(filters[0], ("state".to_string(), "running".to_string()));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_key_value_rejects_garbage() {
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = CliConfig::try_parse_from([
            "paperspace",
            "--base-url",
            "http://localhost:9999",
            "--api-key",
            "flag-key",
            "--verbose",
            "clusters",
            "list",
        ])
        .unwrap();

        let config = cli.client_config().unwrap();
        assert_eq!(config.base_url, "http://localhost:9999");
        assert_eq!(config.api_key, "flag-key");
        assert!(config.debug);
    }
}
