use burrow_telemetry::LogFormat;
use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const LISTEN_ADDR_ENV: &str = "BURROW_LISTEN_ADDR";
pub const STORAGE_PATH_ENV: &str = "BURROW_STORAGE_PATH";
pub const REQUEST_TIMEOUT_ENV: &str = "BURROW_REQUEST_TIMEOUT_SECS";
pub const HTTP_USER_ENV: &str = "BURROW_HTTP_USER";
pub const HTTP_PASSWORD_ENV: &str = "BURROW_HTTP_PASSWORD";
pub const LOG_FORMAT_ENV: &str = "BURROW_LOG_FORMAT";
pub const LOG_LEVEL_ENV: &str = "BURROW_LOG_LEVEL";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8082";
pub const DEFAULT_STORAGE_PATH: &str = "./storage/storage.db";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 4;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    #[value(name = "pretty")]
    Pretty,
    #[value(name = "compact")]
    Compact,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormatArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormatArg::Pretty => write!(f, "pretty"),
            LogFormatArg::Compact => write!(f, "compact"),
            LogFormatArg::Json => write!(f, "json"),
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "burrow", about = "URL shortener HTTP server")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// SQLite database file; created together with its directory if missing.
    #[arg(long, env = STORAGE_PATH_ENV, default_value = DEFAULT_STORAGE_PATH)]
    pub storage_path: PathBuf,

    #[arg(long, env = REQUEST_TIMEOUT_ENV, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,

    /// Basic auth user for `POST /url` and `DELETE /url/{alias}`.
    #[arg(long, env = HTTP_USER_ENV, requires = "http_password")]
    pub http_user: Option<String>,

    #[arg(long, env = HTTP_PASSWORD_ENV, requires = "http_user", hide_env_values = true)]
    pub http_password: Option<String>,

    #[arg(
        long,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormatArg::Pretty
    )]
    pub log_format: LogFormatArg,

    /// Filter directives, overridden by `RUST_LOG`.
    #[arg(long, env = LOG_LEVEL_ENV, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = CLI::try_parse_from(["burrow"]).unwrap();

        assert_eq!(cli.listen_addr.to_string(), DEFAULT_LISTEN_ADDR);
        assert_eq!(cli.storage_path, PathBuf::from(DEFAULT_STORAGE_PATH));
        assert_eq!(cli.request_timeout_secs, 4);
        assert_eq!(cli.log_format, LogFormatArg::Pretty);
        assert!(cli.http_user.is_none());
    }

    #[test]
    fn user_requires_password() {
        let result = CLI::try_parse_from(["burrow", "--http-user", "admin"]);
        assert!(result.is_err());

        let cli = CLI::try_parse_from([
            "burrow",
            "--http-user",
            "admin",
            "--http-password",
            "s3cret",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.http_user.as_deref(), Some("admin"));
        assert_eq!(LogFormat::from(cli.log_format), LogFormat::Json);
    }
}
