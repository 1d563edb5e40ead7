use crate::config::AppConfig;
use crate::config::db;
use crate::config::migrations::MigrationManager;
use crate::config::options::{
    BuiltinKeyboardActions, OptionName, OptionRecord, OptionStore, OptionValue, StartupOverrides,
    bootstrap_for_sync, bootstrap_new_instance, init_startup_options,
};
use anyhow::Result;
use clap::Args;
use log::info;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Prepare the instance to pull its options from the configured sync server
    #[arg(long)]
    pub sync: bool,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Option name
    pub name: String,
    /// Interpret the value as an integer
    #[arg(long, conflicts_with = "bool")]
    pub int: bool,
    /// Interpret the value as a boolean
    #[arg(long)]
    pub bool: bool,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Option name
    pub name: String,
    /// New value
    pub value: String,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only options replicated by sync
    #[arg(long, conflicts_with = "local")]
    pub synced: bool,
    /// Only device-local options
    #[arg(long)]
    pub local: bool,
}

/// Bootstrap the instance if needed, then run startup defaulting
pub async fn init_command(config: &AppConfig, store: &OptionStore, args: InitArgs) -> Result<()> {
    if store.is_initialized().await? {
        println!("Instance is already initialized");
        return startup(store, &config.overrides).await;
    }

    if store.get_option_or_null(OptionName::DocumentId.as_str()).await?.is_some() {
        anyhow::bail!("Instance was bootstrapped for sync and is waiting for the first sync to finish");
    }

    if args.sync {
        let opts = config.not_synced_options();
        if opts.sync_server_host.is_none() {
            anyhow::bail!("No sync server configured; set [sync].server_host in config.toml");
        }
        bootstrap_for_sync(store, &opts).await?;
        println!("Instance prepared for sync");
    } else {
        let report = bootstrap_new_instance(store, &BuiltinKeyboardActions).await?;
        println!("Instance initialized with {} default options", report.created.len());
    }
    Ok(())
}

/// Run startup defaulting before any command touches options
pub async fn startup(store: &OptionStore, overrides: &StartupOverrides) -> Result<()> {
    if !store.is_initialized().await? {
        anyhow::bail!("Instance is not initialized; run `note-options init` first");
    }

    let report = init_startup_options(store, &BuiltinKeyboardActions, overrides).await?;
    if !report.created.is_empty() {
        info!("Created {} missing default options", report.created.len());
    }
    Ok(())
}

pub async fn get_command(store: &OptionStore, args: GetArgs) -> Result<()> {
    println!("{}", read_value(store, &args).await?);
    Ok(())
}

async fn read_value(store: &OptionStore, args: &GetArgs) -> Result<String> {
    let value = if args.int {
        OptionValue::Int(store.get_option_int(&args.name, None).await?)
    } else if args.bool {
        OptionValue::Bool(store.get_option_bool(&args.name).await?)
    } else if let Ok(name) = args.name.parse::<OptionName>() {
        store.get(name).await?
    } else {
        OptionValue::String(store.get_option(&args.name).await?)
    };
    Ok(value.encode())
}

pub async fn set_command(store: &OptionStore, args: SetArgs) -> Result<()> {
    write_value(store, &args).await?;
    info!("Set option {} via CLI", args.name);
    println!("{} = {}", args.name, args.value);
    Ok(())
}

/// Known options are validated against their kind, unknown ones are stored verbatim
async fn write_value(store: &OptionStore, args: &SetArgs) -> Result<()> {
    match args.name.parse::<OptionName>() {
        Ok(name) => {
            let value = name.kind().parse(name.as_str(), &args.value)?;
            store.set(name, value).await?;
        }
        Err(_) => store.set_option(&args.name, args.value.as_str()).await?,
    }
    Ok(())
}

pub async fn list_command(store: &OptionStore, args: ListArgs) -> Result<()> {
    let options = if args.synced {
        store.get_options_by_sync(true).await?
    } else if args.local {
        store.get_options_by_sync(false).await?
    } else {
        store.get_options().await?
    };

    for option in &options {
        println!("{}", format_record(option));
    }
    Ok(())
}

fn format_record(option: &OptionRecord) -> String {
    format!(
        "{} = {} [{}] {}",
        option.name,
        option.value,
        if option.is_synced { "synced" } else { "local" },
        option.utc_date_modified.format("%Y-%m-%d %H:%M:%S")
    )
}

pub async fn info_command(config: &AppConfig, store: &OptionStore) -> Result<()> {
    let pool = store.pool();
    let info = db::get_db_info(pool).await?;
    println!("Database: {}", config.db_path().display());
    println!("  SQLite version: {}", info.sqlite_version);
    println!("  Journal mode: {}", info.journal_mode);
    println!("  Schema version: {}", info.schema_version);
    println!("  Options: {} ({} synced)", info.option_count, info.synced_count);
    println!();

    MigrationManager::new(pool).status().await?.print_status();
    Ok(())
}
