//! Process configuration, read from flags with environment fallbacks.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;

use crate::cors::DEFAULT_ALLOWED_ORIGINS;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://./todos.db";

#[derive(Debug, Clone, Parser)]
#[command(name = "simpei-server", version, about = "Simpei todo list API")]
pub struct Config {
    /// SQLite connection string; the file is created if missing.
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Origins allowed to call the API from a browser.
    #[arg(
        long = "cors-origin",
        env = "CORS_ORIGINS",
        value_delimiter = ',',
        default_values = DEFAULT_ALLOWED_ORIGINS
    )]
    pub cors_origins: Vec<String>,

    /// Emit logs as JSON lines.
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,
}

impl Config {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "simpei-server",
            "--database-url",
            "sqlite::memory:",
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
            "--cors-origin",
            "http://a.test,http://b.test",
            "--log-json",
        ])
        .unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.bind_addr(), "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.cors_origins, ["http://a.test", "http://b.test"]);
        assert!(config.log_json);
    }

    #[test]
    fn rejects_invalid_port() {
        assert!(Config::try_parse_from(["simpei-server", "--port", "not-a-port"]).is_err());
    }
}
