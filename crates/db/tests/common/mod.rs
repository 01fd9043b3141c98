#![allow(dead_code)]

use std::path::{Path, PathBuf};

use roster_core::{discover_scripts, exclude_scripts, MigrateError, RunReport, Runner};
use roster_db::PgScriptExecutor;
use sqlx::PgPool;

/// Script that needs pgvector, left out so tests run on a stock server.
pub const EMBEDDING_SCRIPT: &str = "0008_inmate_embedding.sql";

/// The bundled migrations directory at the workspace root.
pub fn bundled_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../db/migrations")
}

/// Write `(name, sql)` pairs into a fresh temp directory.
pub fn script_dir(scripts: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    for (name, sql) in scripts {
        std::fs::write(dir.path().join(name), sql).expect("write script");
    }
    dir
}

/// Discover and apply every script in `dir`; returns the started names too.
pub async fn apply_dir(
    pool: &PgPool,
    dir: &Path,
    skip: &[String],
) -> (Result<RunReport, MigrateError>, Vec<String>) {
    let scripts = exclude_scripts(discover_scripts(dir).expect("discover"), skip);
    let runner = Runner::new(PgScriptExecutor::new(pool.clone()));
    let mut started = Vec::new();
    let result = runner
        .run(&scripts, |s| started.push(s.name.clone()))
        .await;
    (result, started)
}

/// Apply the bundled schema without the pgvector script.
pub async fn apply_bundled(pool: &PgPool) -> RunReport {
    let (result, _) = apply_dir(pool, &bundled_dir(), &[EMBEDDING_SCRIPT.to_string()]).await;
    result.expect("bundled scripts apply")
}

pub async fn table_exists(pool: &PgPool, table: &str) -> bool {
    let (exists,): (bool,) = sqlx::query_as(
        "SELECT EXISTS (
            SELECT 1 FROM information_schema.tables
            WHERE table_schema = 'public' AND table_name = $1
        )",
    )
    .bind(table)
    .fetch_one(pool)
    .await
    .expect("table lookup");
    exists
}
