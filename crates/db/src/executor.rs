//! Postgres implementation of [`ScriptExecutor`].
//!
//! A script's whole content is sent as one simple-protocol query, so files
//! may hold any number of statements. By default the script runs inside a
//! transaction and either fully applies or leaves nothing behind.
//!
//! A script whose first line is `-- no-transaction` is sent as-is. Postgres
//! still wraps a multi-statement query in an implicit transaction, so
//! statements that refuse to run in one (`CREATE INDEX CONCURRENTLY`,
//! `VACUUM`) must be alone in their file.

use roster_core::{ExecutorError, Script, ScriptExecutor};
use sqlx::Executor;

use crate::DbPool;

/// First-line marker that disables the wrapping transaction.
pub const NO_TRANSACTION_DIRECTIVE: &str = "-- no-transaction";

/// Applies scripts over a Postgres pool.
#[derive(Debug, Clone)]
pub struct PgScriptExecutor {
    pool: DbPool,
}

impl PgScriptExecutor {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Returns `true` if the script opts out of the wrapping transaction.
pub fn wants_no_transaction(sql: &str) -> bool {
    sql.lines()
        .next()
        .is_some_and(|line| line.trim() == NO_TRANSACTION_DIRECTIVE)
}

impl ScriptExecutor for PgScriptExecutor {
    async fn execute(&self, script: &Script, sql: &str) -> Result<(), ExecutorError> {
        if sql.trim().is_empty() {
            tracing::warn!(script = %script.name, "Script is empty");
            return Ok(());
        }

        if wants_no_transaction(sql) {
            tracing::debug!(script = %script.name, "Executing without transaction");
            sqlx::raw_sql(sql).execute(&self.pool).await?;
            return Ok(());
        }

        // Via the trait: inherent `RawSql::execute` on `&mut *tx` breaks the `Send` bound.
        let mut tx = self.pool.begin().await?;
        Executor::execute(&mut *tx, sqlx::raw_sql(sql)).await?;
        tx.commit().await?;
        Ok(())
    }
}
