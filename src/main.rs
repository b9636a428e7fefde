use anyhow::Result;
use clap::{Parser, Subcommand};
use once_cell::sync::OnceCell;

use sync_mapper::api::{CatalogService, GovernanceClient};
use sync_mapper::config::Config;
use sync_mapper::mapping::{Side, State};

// Global Config instance
static CONFIG: OnceCell<Config> = OnceCell::new();

/// Get a reference to the global Config
pub fn global_config() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

#[derive(Parser)]
#[command(name = "sync-mapper", about = "Inspect and run table synchronization models", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a sync model's tables and field mappings
    Show { id: String },
    /// Run the publish checks against a sync model
    Validate { id: String },
    /// Trigger an immediate synchronization run
    Execute { id: String },
    /// List the tables available on a data source
    Tables { datasource_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = Config::load()?;
    CONFIG.set(config).expect("Config already initialized");

    let api = global_config().api()?;
    let client = GovernanceClient::new(api.base_url.clone(), api.token.clone());

    let cli = Cli::parse();
    match cli.command {
        Commands::Show { id } => show_model(&client, &id).await,
        Commands::Validate { id } => validate_model(&client, &id).await,
        Commands::Execute { id } => {
            client.execute_sync_model(&id).await?;
            println!("Sync run triggered for model {}", id);
            Ok(())
        }
        Commands::Tables { datasource_id } => list_tables(&client, &datasource_id).await,
    }
}

async fn list_tables(client: &GovernanceClient, datasource_id: &str) -> Result<()> {
    let details = client.get_database_details(datasource_id).await?;
    let tables = client.get_forms_from_datasource(datasource_id).await?;

    println!("{} ({})", details.name, details.database_type);
    for table in &tables {
        println!("  {}", table);
    }
    Ok(())
}

async fn show_model(client: &GovernanceClient, id: &str) -> Result<()> {
    let state = State::load(client, id).await?;

    for side in [Side::Source, Side::Target] {
        let node = state.node(side);
        match &node.form_info {
            Some(info) => println!(
                "{}: {} ({} on datasource {})",
                side.label(),
                info.name,
                info.database_type,
                info.datasource_id
            ),
            None => println!("{}: not configured", side.label()),
        }
    }

    println!();
    for field in &state.target.items {
        let source_name = state
            .source
            .field(field.index_id)
            .map(|f| f.name.as_str())
            .unwrap_or("-");
        let marker = if field.unmapped { " (unmapped)" } else { "" };
        println!(
            "  {} -> {} [{}]{}",
            source_name, field.name, field.type_name, marker
        );
    }

    Ok(())
}

async fn validate_model(client: &GovernanceClient, id: &str) -> Result<()> {
    let mut state = State::load(client, id).await?;

    let errors = state.validate_for_publish();
    if errors.is_empty() {
        println!("Model {} passes all publish checks", id);
        return Ok(());
    }

    println!("Model {} has {} problem(s):", id, errors.len());
    for error in &errors {
        println!("  - {}", error);
    }
    std::process::exit(1);
}
