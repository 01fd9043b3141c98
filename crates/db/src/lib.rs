use std::str::FromStr;
use std::time::Duration;

use roster_core::{ConnectionSettings, MigrateError};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

pub mod executor;
pub mod schema;

pub use executor::PgScriptExecutor;

pub type DbPool = sqlx::PgPool;

/// Application name reported to the server in `pg_stat_activity`.
const APPLICATION_NAME: &str = "roster-migrate";

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Settings(#[from] MigrateError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Build connect options from settings; a database URL wins over the fields.
pub fn connect_options(settings: &ConnectionSettings) -> Result<PgConnectOptions, DbError> {
    settings.validate()?;

    let options = match &settings.database_url {
        Some(url) => PgConnectOptions::from_str(url)?,
        None => {
            let options = PgConnectOptions::new()
                .host(&settings.host)
                .port(settings.port)
                .database(&settings.database)
                .username(&settings.user);
            match &settings.password {
                Some(password) => options.password(password),
                None => options,
            }
        }
    };

    Ok(options.application_name(APPLICATION_NAME))
}

/// Create a single-connection pool; scripts are applied by one caller.
pub async fn create_pool(settings: &ConnectionSettings) -> Result<DbPool, DbError> {
    let options = connect_options(settings)?;
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Round-trip a trivial query to confirm the connection works.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
