/*
[INPUT]:  Interactive user input via CLI
[OUTPUT]: Generated YAML configuration file
[POS]:    CLI initialization layer
[UPDATE]: When AppConfig schema changes
*/

use anyhow::{Context, Result};
use console::style;
use deribit_adapter::http::{MAINNET_BASE_URL, TESTNET_BASE_URL};
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use std::path::PathBuf;

use deribit_cli::config::{AppConfig, AuthConfig, ExchangeConfig, ParallelConfig};

pub fn run_init(output: PathBuf) -> Result<()> {
    println!("{}", style("Welcome to Deribit CLI Init").bold().cyan());
    println!(
        "{}",
        style("Credentials are read from the environment and never written to this file.").dim()
    );

    let theme = ColorfulTheme::default();

    println!("\n{}", style("--- Exchange ---").bold());
    let environments = vec!["testnet", "mainnet"];
    let env_selection = Select::with_theme(&theme)
        .with_prompt("Environment")
        .items(&environments)
        .default(0)
        .interact()?;
    let base_url = if env_selection == 0 {
        TESTNET_BASE_URL
    } else {
        MAINNET_BASE_URL
    };

    let connect_timeout_secs: u64 = Input::with_theme(&theme)
        .with_prompt("Connect timeout (seconds)")
        .default(10)
        .interact_text()?;

    println!("\n{}", style("--- Auth ---").bold());
    let defaults = AuthConfig::default();
    let session_name: String = Input::with_theme(&theme)
        .with_prompt("Session name")
        .default(defaults.session_name.clone())
        .interact_text()?;
    let client_id_env: String = Input::with_theme(&theme)
        .with_prompt("Client id variable")
        .default(defaults.client_id_env.clone())
        .interact_text()?;
    let client_secret_env: String = Input::with_theme(&theme)
        .with_prompt("Client secret variable")
        .default(defaults.client_secret_env.clone())
        .interact_text()?;

    let config = AppConfig {
        exchange: ExchangeConfig {
            base_url: base_url.to_string(),
            connect_timeout_secs,
            ..ExchangeConfig::default()
        },
        auth: AuthConfig {
            session_name,
            client_id_env,
            client_secret_env,
            ..defaults
        },
        parallel: ParallelConfig::default(),
    };

    if output.exists() {
        let overwrite = Confirm::with_theme(&theme)
            .with_prompt(format!("{} exists. Overwrite?", output.display()))
            .default(false)
            .interact()?;
        if !overwrite {
            println!("{}", style("Nothing written.").yellow());
            return Ok(());
        }
    }

    let yaml = serde_yaml::to_string(&config).context("failed to serialize config to YAML")?;

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(&output, yaml)
        .with_context(|| format!("failed to write config to {}", output.display()))?;

    println!("\n{}", style("SUCCESS!").bold().green());
    println!(
        "Configuration written to: {}",
        style(output.display()).cyan()
    );

    Ok(())
}
