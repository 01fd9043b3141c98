use std::path::PathBuf;

use clap::Parser;
use roster_core::settings::{
    DEFAULT_DATABASE, DEFAULT_HOST, DEFAULT_MIGRATIONS_DIR, DEFAULT_PORT, DEFAULT_USER,
};
use roster_core::ConnectionSettings;

/// Apply `.sql` scripts to Postgres in file-name order, stopping at the
/// first failure.
#[derive(Debug, Parser)]
#[command(name = "roster-migrate", version)]
pub struct Cli {
    /// Directory holding the `.sql` scripts
    #[arg(env = "MIGRATIONS_DIR", default_value = DEFAULT_MIGRATIONS_DIR)]
    pub dir: PathBuf,

    /// Database host
    #[arg(long, env = "PGHOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Database port
    #[arg(long, env = "PGPORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Database name
    #[arg(long, env = "PGDATABASE", default_value = DEFAULT_DATABASE)]
    pub dbname: String,

    /// Database user
    #[arg(long, env = "PGUSER", default_value = DEFAULT_USER)]
    pub user: String,

    /// Database password (environment only)
    #[arg(long, env = "PGPASSWORD", hide = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Full connection URL; overrides host, port, dbname and user
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Leave out a script by file name (repeatable)
    #[arg(long = "skip", value_name = "FILE")]
    pub skip: Vec<String>,

    /// Print the execution order without connecting
    #[arg(long)]
    pub dry_run: bool,

    /// After applying, fail if any roster table is missing
    #[arg(long)]
    pub verify: bool,

    /// Print the result as JSON
    #[arg(long, short = 'j')]
    pub json: bool,
}

impl Cli {
    pub fn settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            host: self.host.clone(),
            port: self.port,
            database: self.dbname.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            database_url: self.database_url.clone(),
        }
    }
}
