use anyhow::Context;
use clap::Parser;
use paperspace_client::config::cli::{
    ClustersCommand, MachinesCommand, NetworksCommand, SshKeysCommand,
};
use paperspace_client::utils::{logger, validation::Validate};
use paperspace_client::{
    CliConfig, Client, ClusterGetParams, ClusterListParams, Command, CreateSshKeyInput,
    DeleteSshKeyInput, MachineListParams, NetworkDeleteParams, NetworkGetParams,
    NetworkListParams, PaperspaceError, RequestParams,
};

async fn run(client: &Client, command: Command) -> Result<(), PaperspaceError> {
    let rp = RequestParams::default();

    let output = match command {
        Command::Machines(MachinesCommand::List { filters }) => {
            let params = filters
                .into_iter()
                .fold(MachineListParams::new(), |p, (k, v)| p.with_filter(k, v));
            serde_json::to_value(client.get_machines(params, &rp).await?)?
        }
        Command::Machines(MachinesCommand::Get { id }) => {
            serde_json::to_value(client.get_machine(&id, &rp).await?)?
        }
        Command::Machines(MachinesCommand::Delete { id }) => {
            client.delete_machine(&id, &rp).await?;
            serde_json::json!({ "deleted": id })
        }
        Command::Clusters(ClustersCommand::List) => {
            serde_json::to_value(client.get_clusters(ClusterListParams::default(), &rp).await?)?
        }
        Command::Clusters(ClustersCommand::Get { id }) => serde_json::to_value(
            client
                .get_cluster(&id, ClusterGetParams::default(), &rp)
                .await?,
        )?,
        Command::Networks(NetworksCommand::List) => {
            serde_json::to_value(client.get_networks(NetworkListParams::default(), &rp).await?)?
        }
        Command::Networks(NetworksCommand::Get { id }) => serde_json::to_value(
            client
                .get_network(&id, NetworkGetParams::default(), &rp)
                .await?,
        )?,
        Command::Networks(NetworksCommand::Delete { id }) => {
            client
                .delete_network(&id, NetworkDeleteParams::default(), &rp)
                .await?;
            serde_json::json!({ "deleted": id })
        }
        Command::SshKeys(SshKeysCommand::List) => serde_json::to_value(client.list_ssh_keys().await?)?,
        Command::SshKeys(SshKeysCommand::Get { name }) => {
            serde_json::to_value(client.get_ssh_key(&name).await?)?
        }
        Command::SshKeys(SshKeysCommand::Create { name, public_key }) => serde_json::to_value(
            client
                .create_ssh_key(CreateSshKeyInput { name, public_key })
                .await?,
        )?,
        Command::SshKeys(SshKeysCommand::Delete { id }) => {
            serde_json::to_value(client.delete_ssh_key(DeleteSshKeyInput { id }).await?)?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::debug!("CLI config: {:?}", cli.command);

    let config = cli
        .client_config()
        .context("Failed to load client configuration")?;
    if let Err(e) = config.validate().and_then(|_| config.require_api_key().map(|_| ())) {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let mut client = Client::from_config(config);
    if cli.verbose {
        client.debug();
    }

    if let Err(e) = run(&client, cli.command).await {
        tracing::error!("Request failed: {} (status: {:?})", e, e.status());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(if e.is_not_found() { 4 } else { 1 });
    }

    Ok(())
}
