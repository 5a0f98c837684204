//! Command-line and environment configuration.

use clap::{Parser, ValueEnum};
use resource_actor::tracing::LogFormat;

/// Which [`UserStore`](crate::store::UserStore) backs the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// Actor-owned, lost on restart.
    #[default]
    Memory,
    /// SQLite database at `--database-url`.
    Sqlite,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogOutput {
    #[default]
    Pretty,
    Json,
}

/// `user-api` server settings.
#[derive(Debug, Clone, Parser)]
#[command(name = "user-api", about = "CRUD REST API for users", version)]
pub struct Settings {
    /// Address to listen on.
    #[arg(long, env = "USER_API_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "USER_API_PORT", default_value_t = 8080)]
    pub port: u16,

    #[arg(long, env = "USER_API_STORE", value_enum, default_value_t = StoreKind::Memory)]
    pub store: StoreKind,

    /// Only read when `--store sqlite`.
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://users.db?mode=rwc")]
    pub database_url: String,

    #[arg(long, env = "USER_API_LOG_FORMAT", value_enum, default_value_t = LogOutput::Pretty)]
    pub log_format: LogOutput,

    /// Capacity of the in-memory store's request channel.
    #[arg(long, default_value_t = 32, value_parser = clap::value_parser!(u16).range(1..))]
    pub actor_buffer: u16,
}

impl Settings {
    pub fn log_format(&self) -> LogFormat {
        match self.log_format {
            LogOutput::Pretty => LogFormat::Compact,
            LogOutput::Json => LogFormat::Json,
        }
    }
}
