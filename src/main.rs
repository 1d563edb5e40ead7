use anyhow::Result;
use clap::Parser;
use log::{debug, info};

use note_options::cli::{Cli, Commands, commands};
use note_options::config::{self, AppConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let app_config = AppConfig::load()?;

    // Initialize logger to file (truncate on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(app_config.log_path())?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    info!("Starting note-options");
    if app_config.created_data_dir {
        info!("Created data directory: {:?}", app_config.data_dir);
    }
    debug!("Using data directory {:?}", app_config.data_dir);

    let store = config::open_store(&app_config.db_path()).await?;

    if !matches!(cli.command, Commands::Init(_) | Commands::Info) {
        commands::options::startup(&store, &app_config.overrides).await?;
    }

    match cli.command {
        Commands::Init(args) => commands::init_command(&app_config, &store, args).await?,
        Commands::Get(args) => commands::get_command(&store, args).await?,
        Commands::Set(args) => commands::set_command(&store, args).await?,
        Commands::List(args) => commands::list_command(&store, args).await?,
        Commands::Info => commands::info_command(&app_config, &store).await?,
    }

    Ok(())
}
