//! Command-line and environment configuration.
//!
//! Every flag falls back to a `MENTORIZE_*` environment variable, then to a
//! built-in default.

use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "mentorize", version, about = "Mentorize productivity backend")]
pub struct ServerConfig {
    /// Interface to bind.
    #[arg(long, env = "MENTORIZE_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    #[arg(long, env = "MENTORIZE_PORT", default_value_t = 8080)]
    pub port: u16,

    /// SQLite database file; created on first start.
    #[arg(long, env = "MENTORIZE_DB_PATH", default_value = "mentorize.sqlite3")]
    pub db_path: PathBuf,

    /// trace|debug|info|warn|error. Defaults by build mode.
    #[arg(long, env = "MENTORIZE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rotating log files. Logs go to stderr when unset.
    #[arg(long, env = "MENTORIZE_LOG_DIR")]
    pub log_dir: Option<String>,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn effective_log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or(mentorize_core::default_log_level())
    }
}

#[cfg(test)]
mod tests {
    use super::ServerConfig;
    use clap::Parser;

    #[test]
    fn flags_override_defaults() {
        let config = ServerConfig::try_parse_from([
            "mentorize",
            "--host",
            "127.0.0.1",
            "--port",
            "9090",
            "--db-path",
            "/tmp/m.sqlite3",
            "--log-level",
            "warn",
        ])
        .unwrap();

        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:9090");
        assert_eq!(config.db_path.to_str(), Some("/tmp/m.sqlite3"));
        assert_eq!(config.effective_log_level(), "warn");
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn missing_log_level_falls_back_to_build_default() {
        let config = ServerConfig::try_parse_from(["mentorize", "--port", "9091"]).unwrap();

        assert_eq!(config.log_level, None);
        assert_eq!(
            config.effective_log_level(),
            mentorize_core::default_log_level()
        );
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert!(ServerConfig::try_parse_from(["mentorize", "--port", "http"]).is_err());
    }
}
