/*
[INPUT]:  Optional YAML configuration file and process environment
[OUTPUT]: Client settings, auth scope, credentials, parallel task plan
[POS]:    Configuration layer - startup inputs for the CLI
[UPDATE]: When adding new configuration options
*/

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use deribit_adapter::http::TESTNET_BASE_URL;
use deribit_adapter::{
    AuthScope, ClientConfig, Credentials, Operation, OrderBookRequest, PlaceOrderRequest, TaskSpec,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const CLIENT_ID_ENV: &str = "DERIBIT_CLIENT_ID";
pub const CLIENT_SECRET_ENV: &str = "DERIBIT_CLIENT_SECRET";

/// Top-level configuration for the CLI; every section is optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub exchange: ExchangeConfig,
    pub auth: AuthConfig,
    pub parallel: ParallelConfig,
}

/// Endpoint and connection settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExchangeConfig {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub tcp_keepalive_secs: u64,
    pub keepalive_interval_secs: u64,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: TESTNET_BASE_URL.to_string(),
            connect_timeout_secs: 10,
            tcp_keepalive_secs: 60,
            keepalive_interval_secs: 30,
        }
    }
}

impl ExchangeConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            tcp_keepalive: Duration::from_secs(self.tcp_keepalive_secs),
            keepalive_interval: Duration::from_secs(self.keepalive_interval_secs),
        }
    }
}

/// Token scope plus the names of the variables holding the key pair.
///
/// Secrets themselves never live in the file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    pub session_name: String,
    pub expires_seconds: u64,
    pub client_id_env: String,
    pub client_secret_env: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        let scope = AuthScope::default();
        Self {
            session_name: scope.session_name,
            expires_seconds: scope.expires_seconds,
            client_id_env: CLIENT_ID_ENV.to_string(),
            client_secret_env: CLIENT_SECRET_ENV.to_string(),
        }
    }
}

impl AuthConfig {
    pub fn scope(&self) -> AuthScope {
        AuthScope {
            session_name: self.session_name.clone(),
            expires_seconds: self.expires_seconds,
        }
    }

    /// Read the key pair from the process environment
    pub fn resolve_credentials(&self) -> Result<Credentials> {
        self.resolve_credentials_with(|name| std::env::var(name).ok())
    }

    pub fn resolve_credentials_with<F>(&self, lookup: F) -> Result<Credentials>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client_id = lookup(&self.client_id_env)
            .filter(|value| !value.trim().is_empty())
            .with_context(|| format!("environment variable {} is not set", self.client_id_env))?;
        let client_secret = lookup(&self.client_secret_env)
            .filter(|value| !value.trim().is_empty())
            .with_context(|| {
                format!("environment variable {} is not set", self.client_secret_env)
            })?;
        Credentials::new(client_id, client_secret).context("invalid credentials")
    }
}

/// Tasks run by the parallel command
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ParallelConfig {
    pub tasks: Vec<ParallelTaskConfig>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        let buy = || TaskAction::Buy {
            instrument: "ETH-PERPETUAL".to_string(),
            price: Decimal::from(3300),
            amount: Decimal::from(10),
        };
        let book = || TaskAction::OrderBook {
            instrument: "BTC-PERPETUAL".to_string(),
            depth: None,
        };
        Self {
            tasks: vec![
                ParallelTaskConfig::new("buy-eth-1", buy(), true),
                ParallelTaskConfig::new("buy-eth-2", buy(), false),
                ParallelTaskConfig::new("book-btc-1", book(), true),
                ParallelTaskConfig::new("book-btc-2", book(), false),
            ],
        }
    }
}

impl ParallelConfig {
    pub fn task_specs(&self) -> Result<Vec<TaskSpec>> {
        if self.tasks.is_empty() {
            bail!("parallel plan has no tasks");
        }
        Ok(self.tasks.iter().map(ParallelTaskConfig::to_task_spec).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ParallelTaskConfig {
    pub label: String,
    #[serde(flatten)]
    pub action: TaskAction,
    /// Wait for this task before the command returns
    #[serde(default)]
    pub join: bool,
}

impl ParallelTaskConfig {
    pub fn new(label: impl Into<String>, action: TaskAction, join: bool) -> Self {
        Self {
            label: label.into(),
            action,
            join,
        }
    }

    pub fn to_task_spec(&self) -> TaskSpec {
        let operation = match &self.action {
            TaskAction::Buy {
                instrument,
                price,
                amount,
            } => Operation::PlaceOrder(PlaceOrderRequest::limit(
                instrument.as_str(),
                *price,
                *amount,
            )),
            TaskAction::OrderBook { instrument, depth } => {
                Operation::GetOrderBook(OrderBookRequest {
                    instrument_name: instrument.clone(),
                    depth: *depth,
                })
            }
        };
        if self.join {
            TaskSpec::awaited(self.label.as_str(), operation)
        } else {
            TaskSpec::detached(self.label.as_str(), operation)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TaskAction {
    Buy {
        instrument: String,
        price: Decimal,
        amount: Decimal,
    },
    OrderBook {
        instrument: String,
        #[serde(default)]
        depth: Option<u32>,
    },
}

impl AppConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("parse config {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Explicit path must exist; the default location is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }
}

/// `<config_dir>/deribit-cli/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("deribit-cli").join("config.yaml"))
}
