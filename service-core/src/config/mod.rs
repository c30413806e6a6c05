use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::net::{SocketAddr, ToSocketAddrs};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

fn default_listen_addr() -> String {
    ":8080".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        parse_listen_addr(&self.listen_addr)
    }
}

/// Resolve a listen address. A bare `:PORT` binds every interface.
pub fn parse_listen_addr(addr: &str) -> Result<SocketAddr, AppError> {
    let addr = addr.trim();
    let candidate = if addr.starts_with(':') {
        format!("0.0.0.0{}", addr)
    } else {
        addr.to_string()
    };

    if let Ok(parsed) = candidate.parse::<SocketAddr>() {
        return Ok(parsed);
    }

    candidate
        .to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.next())
        .ok_or_else(|| {
            AppError::ConfigError(anyhow::anyhow!("Invalid listen address: {}", addr))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_only_binds_all_interfaces() {
        let addr = parse_listen_addr(":8080").unwrap();
        assert_eq!(addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn explicit_host_is_kept() {
        let addr = parse_listen_addr("127.0.0.1:0").unwrap();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 0);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            parse_listen_addr("not an address"),
            Err(AppError::ConfigError(_))
        ));
    }

    #[test]
    fn default_listens_on_8080() {
        assert_eq!(Config::default().socket_addr().unwrap().port(), 8080);
    }
}
