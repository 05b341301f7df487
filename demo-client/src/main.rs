use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use serde_derive::Serialize;
use serde_json::json;
use ssm_config::{
    Populator, SsmConfig,
    configs::{Configs, StoreBackend, StoreConfig},
    store::factory::StoreFactory,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Loads a sample service configuration from the configured parameter store
/// and prints it as JSON.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Overrides SSM_CONFIG_BACKEND (parameter_store, secrets_manager, environment, file)
    #[arg(long)]
    backend: Option<StoreBackend>,

    /// Print secret fields instead of masking them
    #[arg(long)]
    show_secrets: bool,
}

#[derive(Debug, Default, Serialize, SsmConfig)]
struct ServiceConfig {
    #[ssm("/demo/service/name")]
    name: String,
    #[ssm("/demo/service/port")]
    port: u16,
    #[ssm("/demo/service/max-connections")]
    max_connections: u32,
    #[ssm("/demo/service/debug")]
    debug: bool,
    #[ssm("/demo/service/api-key")]
    api_key: String,
    region: String,
}

fn setup_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()) // reads RUST_LOG
        .with_target(false)
        .with_level(true)
        .with_thread_ids(true)
        .try_init();
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mut store_config = StoreConfig::load()
        .await
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to load store configs")?;
    if let Some(backend) = args.backend {
        store_config.backend = backend;
    }

    let store = StoreFactory::new(store_config.clone())
        .create()
        .await
        .context("Failed to initialize parameter store")?;

    let mut config = ServiceConfig {
        region: store_config.region.unwrap_or_default(),
        ..Default::default()
    };
    Populator::new(store)
        .populate(&mut config)
        .await
        .context("Failed to populate service config")?;
    info!("Service config loaded for {}", config.name);

    let mut output = serde_json::to_value(&config)?;
    if !args.show_secrets {
        output["api_key"] = json!("***");
    }
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    setup_logging();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        error!("{:#}", e);
        return Err(e);
    }

    Ok(())
}
