use clap::Parser;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Command-line flags.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "chat-service", version, about = "Post and read conversation messages")]
pub struct Cli {
    /// Server listen address, e.g. `:8080` or `127.0.0.1:8080`.
    #[arg(long = "listen-addr", env = "LISTEN_ADDR")]
    pub listen_addr: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub database: DatabaseConfig,
    pub timeouts: ServerTimeouts,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Fixed server timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerTimeouts {
    /// Upper bound on receiving a request body.
    pub read: Duration,
    /// Upper bound on producing a response, handler time included.
    pub write: Duration,
    /// How long in-flight requests may run once draining starts.
    pub grace_period: Duration,
}

impl Default for ServerTimeouts {
    fn default() -> Self {
        Self {
            read: Duration::from_secs(5),
            write: Duration::from_secs(10),
            grace_period: Duration::from_secs(30),
        }
    }
}

impl ChatConfig {
    /// Load from `.env`, the optional `configuration` file, `APP__*` and the
    /// service's own variables. The `--listen-addr` flag wins over all of them.
    pub fn load(cli: &Cli) -> Result<Self, AppError> {
        let mut common = core_config::Config::load()?;
        if let Some(addr) = &cli.listen_addr {
            common.listen_addr = addr.clone();
        }

        // Fail on a malformed address now rather than at bind time.
        common.socket_addr()?;

        Ok(ChatConfig {
            common,
            service_name: get_env("SERVICE_NAME", Some("chat-service"))?,
            log_level: get_env("LOG_LEVEL", Some("info"))?,
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|v| !v.is_empty()),
            database: DatabaseConfig {
                url: get_env("DB_CONNSTR", None)?,
                max_connections: get_env_parsed("DB_MAX_CONNECTIONS", 10)?,
                min_connections: get_env_parsed("DB_MIN_CONNECTIONS", 1)?,
            },
            timeouts: ServerTimeouts::default(),
        })
    }
}

fn get_env(key: &str, default: Option<&str>) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => match default {
            Some(def) => Ok(def.to_string()),
            None => Err(AppError::ConfigError(anyhow::anyhow!(
                "{} is required but not set",
                key
            ))),
        },
    }
}

fn get_env_parsed<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) => val.parse().map_err(|e: T::Err| {
            AppError::ConfigError(anyhow::anyhow!("{} has invalid value '{}': {}", key, val, e))
        }),
        Err(_) => Ok(default),
    }
}
