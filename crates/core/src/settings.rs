use std::fmt;

use crate::error::MigrateError;

/// Default database host.
pub const DEFAULT_HOST: &str = "localhost";
/// Default database port.
pub const DEFAULT_PORT: u16 = 5432;
/// Default database name.
pub const DEFAULT_DATABASE: &str = "postgres";
/// Default database user.
pub const DEFAULT_USER: &str = "postgres";
/// Default directory holding the scripts, relative to the working directory.
pub const DEFAULT_MIGRATIONS_DIR: &str = "db/migrations";

/// Target database connection parameters.
///
/// | Field          | Env var        | Default     |
/// |----------------|----------------|-------------|
/// | `host`         | `PGHOST`       | `localhost` |
/// | `port`         | `PGPORT`       | `5432`      |
/// | `database`     | `PGDATABASE`   | `postgres`  |
/// | `user`         | `PGUSER`       | `postgres`  |
/// | `password`     | `PGPASSWORD`   | none        |
/// | `database_url` | `DATABASE_URL` | none        |
///
/// When `database_url` is set it takes precedence over the other fields.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: Option<String>,
    pub database_url: Option<String>,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            database: DEFAULT_DATABASE.into(),
            user: DEFAULT_USER.into(),
            password: None,
            database_url: None,
        }
    }
}

impl ConnectionSettings {
    /// Reject settings that cannot name a database.
    pub fn validate(&self) -> Result<(), MigrateError> {
        if let Some(url) = &self.database_url {
            if url.trim().is_empty() {
                return Err(MigrateError::Config("database URL is empty".into()));
            }
            return Ok(());
        }
        if self.host.trim().is_empty() {
            return Err(MigrateError::Config("host is empty".into()));
        }
        if self.port == 0 {
            return Err(MigrateError::Config("port must be non-zero".into()));
        }
        if self.database.trim().is_empty() {
            return Err(MigrateError::Config("database name is empty".into()));
        }
        if self.user.trim().is_empty() {
            return Err(MigrateError::Config("user is empty".into()));
        }
        Ok(())
    }
}

// Hand-written so the password never reaches logs.
impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("database_url", &self.database_url.as_ref().map(|_| "***"))
            .finish()
    }
}

impl fmt::Display for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.database_url.is_some() {
            return write!(f, "<DATABASE_URL>");
        }
        write!(
            f,
            "{}@{}:{}/{}",
            self.user, self.host, self.port, self.database
        )
    }
}
