use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

mod cli;

use cli::Cli;
use cli::commands::{Commands, SquadsCommands};
use regressivos::api::AppContext;
use regressivos::config::Config;
use regressivos::domain::{SlaState, SquadsConfig, sla};

fn setup_logging(config: &Config) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("regressivos")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("regressivos.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    let default_level = config.log_level.as_deref().unwrap_or("info");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        eprintln!("{}", "Verbose mode enabled".yellow());
    }

    let ctx = AppContext::from_config(config).context("Failed to open storage")?;

    match &cli.command {
        Commands::Serve { bind } => handle_serve_command(bind.as_deref(), config, ctx).await,
        Commands::Invoke { event } => handle_invoke_command(event.as_ref(), &ctx).await,
        Commands::List { active } => handle_list_command(*active, &ctx),
        Commands::Squads { command } => handle_squads_command(command, &ctx),
    }
}

async fn handle_serve_command(bind: Option<&str>, config: &Config, ctx: AppContext) -> Result<()> {
    let addr = bind.unwrap_or(config.server.bind.as_str()).to_string();
    println!("{} {} on {}", "Serving:".green(), ctx.service_name, addr.cyan());
    regressivos::server::serve(&addr, Arc::new(ctx))
        .await
        .context(format!("Server on {} failed", addr))?;
    Ok(())
}

async fn handle_invoke_command(event: Option<&PathBuf>, ctx: &AppContext) -> Result<()> {
    let raw = match event {
        Some(path) if path.as_os_str() != "-" => {
            fs::read_to_string(path).context(format!("Failed to read event from {}", path.display()))?
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read event from stdin")?;
            buf
        }
    };

    let response = regressivos::lambda::handle_json(ctx, &raw).await?;
    println!("{}", response);
    Ok(())
}

fn handle_list_command(active: bool, ctx: &AppContext) -> Result<()> {
    info!("Listing cycles (active only: {})", active);
    let cycles = if active {
        ctx.manager.list_active_cycles()?
    } else {
        ctx.manager.list_cycles()?
    };

    if cycles.is_empty() {
        println!("{}", "No regressivos found".yellow());
        return Ok(());
    }

    let now = ctx.manager.now();
    for cycle in cycles {
        let state = match sla::state(&cycle, now) {
            SlaState::NotStarted => "not started".normal(),
            SlaState::Running => {
                let left = sla::remaining(&cycle, now).map(|r| r.to_string()).unwrap_or_default();
                format!("running ({} left)", left).green()
            }
            SlaState::Expired => "expired".red(),
            SlaState::Stopped => "stopped".dimmed(),
        };
        println!(
            "{}  {}  {}  {}",
            cycle.regressivo_id.dimmed(),
            cycle.release.bold(),
            cycle.status_geral.as_str(),
            state
        );
    }
    Ok(())
}

fn handle_squads_command(command: &SquadsCommands, ctx: &AppContext) -> Result<()> {
    match command {
        SquadsCommands::Show => {
            let config = ctx.manager.squads_config()?;
            for squad in &config.squads {
                println!("{}", squad.squad.green());
                for module in &squad.modules {
                    println!("  - {}", module);
                }
            }
        }
        SquadsCommands::Upload { file } => {
            let content = fs::read_to_string(file).context(format!("Failed to read {}", file.display()))?;
            let config: SquadsConfig =
                serde_json::from_str(&content).context(format!("Failed to parse {}", file.display()))?;
            let config = ctx.manager.replace_squads_config(config)?;
            println!("{} {} squads uploaded", "Uploaded:".green(), config.squads.len());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Setup logging
    setup_logging(&config).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
