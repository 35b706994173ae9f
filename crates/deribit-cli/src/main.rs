/*
[INPUT]:  CLI arguments, optional YAML configuration file, credential env vars
[OUTPUT]: Authenticated session driving the menu or a one-shot command
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or subcommands
*/

mod cli;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use deribit_adapter::dispatch::run_trading_loop;
use deribit_adapter::{
    AuthManager, DeribitClient, Dispatcher, OrderBookRequest, PlaceOrderRequest, Session,
};
use deribit_cli::config::default_config_path;
use deribit_cli::{AppConfig, render};

#[derive(Parser, Debug)]
#[command(name = "deribit-cli", version, about = "Deribit JSON-RPC trading client")]
struct Cli {
    /// YAML config; defaults to <config_dir>/deribit-cli/config.yaml when present
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    /// Overrides exchange.base_url from the config
    #[arg(long = "base-url", value_name = "URL")]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Menu-driven session (default)
    Interactive,
    /// Run the configured parallel task plan once
    Parallel,
    /// Place one order, then read the book, and report end-to-end latency
    TradingLoop {
        #[arg(long, default_value = "BTC-PERPETUAL")]
        instrument: String,
        #[arg(long, default_value = "92500")]
        price: Decimal,
        #[arg(long, default_value = "10")]
        amount: Decimal,
    },
    /// Write a config file interactively
    Init {
        #[arg(long = "output", value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let mut config = AppConfig::load(args.config_path.as_deref()).context("load config")?;
    if let Some(base_url) = &args.base_url {
        config.exchange.base_url = base_url.clone();
    }

    match args.command.unwrap_or(Command::Interactive) {
        Command::Init { output } => {
            let output = match output {
                Some(path) => path,
                None => default_config_path().context("no config directory on this platform")?,
            };
            cli::init::run_init(output)?;
        }
        Command::Interactive => {
            let (client, session) = connect(&config).await?;
            cli::interactive::run_interactive(client, session, &config).await?;
        }
        Command::Parallel => {
            let specs = config.parallel.task_specs()?;
            let (client, session) = connect(&config).await?;
            let report = Dispatcher::new(client)
                .run_parallel(session, specs)
                .await;
            render::print(&render::dispatch_report(&report));

            // Returning drops the runtime, which would cancel detached tasks mid-flight.
            if report.pending_detached() > 0 {
                info!(
                    pending = report.pending_detached(),
                    "waiting for detached tasks before exit"
                );
            }
            for task in report.detached {
                if let Err(err) = task.handle.await {
                    warn!(task = %task.label, error = %err, "detached task did not complete");
                }
            }
        }
        Command::TradingLoop {
            instrument,
            price,
            amount,
        } => {
            let (client, session) = connect(&config).await?;
            let report = run_trading_loop(
                client.as_ref(),
                &session,
                PlaceOrderRequest::limit(instrument.as_str(), price, amount),
                OrderBookRequest::new(instrument),
            )
            .await;
            render::print(&render::trading_loop(&report));
        }
    }

    Ok(())
}

/// Resolve credentials and authenticate once; any failure ends the process.
async fn connect(config: &AppConfig) -> Result<(Arc<DeribitClient>, Arc<Session>)> {
    info!(
        base_url = %config.exchange.base_url,
        parallel_tasks = config.parallel.tasks.len(),
        "configuration loaded"
    );

    let credentials = config
        .auth
        .resolve_credentials()
        .context("resolve credentials")?;
    let client = Arc::new(
        DeribitClient::with_config(config.exchange.client_config()).context("create client")?,
    );

    let session = AuthManager::with_scope(client.clone(), config.auth.scope())
        .authenticate(&credentials)
        .await
        .context("authentication failed")?;
    Ok((client, Arc::new(session)))
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}
