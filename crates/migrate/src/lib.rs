//! `roster-migrate` -- applies the roster schema scripts to Postgres.
//!
//! Scripts are discovered in a directory, ordered by file name, and applied
//! one at a time. The first failure aborts the run and the process exits
//! non-zero.

use std::io::Write;

use anyhow::Context;
use roster_core::{
    discover_scripts, exclude_scripts, ConnectionSettings, MigrateError, RunReport, Runner, Script,
};
use roster_db::{schema, DbPool, PgScriptExecutor};

pub mod cli;
pub mod output;

pub use cli::Cli;

/// Exit status for a successful invocation.
pub const EXIT_SUCCESS: u8 = 0;
/// Exit status for any failure.
pub const EXIT_FAILURE: u8 = 1;

/// What a successful invocation did.
#[derive(Debug)]
pub enum Outcome {
    /// `--dry-run`: the scripts that would run, in order.
    Planned(Vec<Script>),
    /// Every script was applied.
    Applied(RunReport),
}

/// Run one invocation described by `cli`.
///
/// Progress lines go to `out` unless `--json` was given.
pub async fn execute(cli: &Cli, out: &mut impl Write) -> anyhow::Result<Outcome> {
    let scripts = plan(cli)?;
    if cli.dry_run {
        return Ok(Outcome::Planned(scripts));
    }

    let pool = connect(&cli.settings()).await?;
    let result = apply(cli, &scripts, &pool, out).await;
    pool.close().await;
    result.map(Outcome::Applied)
}

/// Discover the scripts in `cli.dir`, minus the skipped ones.
pub fn plan(cli: &Cli) -> anyhow::Result<Vec<Script>> {
    let scripts = exclude_scripts(discover_scripts(&cli.dir)?, &cli.skip);
    tracing::info!(dir = %cli.dir.display(), count = scripts.len(), "Scripts discovered");
    Ok(scripts)
}

pub async fn connect(settings: &ConnectionSettings) -> anyhow::Result<DbPool> {
    tracing::info!(target_db = %settings, "Connecting to database");
    roster_db::create_pool(settings)
        .await
        .with_context(|| format!("Failed to connect to {settings}"))
}

/// Health-check `pool`, apply `scripts`, then verify if `--verify` was given.
pub async fn apply(
    cli: &Cli,
    scripts: &[Script],
    pool: &DbPool,
    out: &mut impl Write,
) -> anyhow::Result<RunReport> {
    roster_db::health_check(pool)
        .await
        .context("Database health check failed")?;

    let runner = Runner::new(PgScriptExecutor::new(pool.clone()));
    let json = cli.json;
    let report = runner
        .run(scripts, |script| {
            if json {
                return;
            }
            if let Err(err) = output::write_progress(&mut *out, script) {
                tracing::warn!(error = %err, "Failed to write progress line");
            }
        })
        .await?;

    if cli.verify {
        let missing = schema::missing_roster_tables(pool)
            .await
            .context("Schema verification query failed")?;
        if !missing.is_empty() {
            anyhow::bail!("Roster tables missing after apply: {}", missing.join(", "));
        }
        tracing::info!("Roster schema verified");
    }

    Ok(report)
}

/// Print the result of an invocation and return the process exit status.
pub fn report(
    result: &anyhow::Result<Outcome>,
    json: bool,
    out: &mut impl Write,
    err_out: &mut impl Write,
) -> u8 {
    let written = match result {
        Ok(Outcome::Planned(scripts)) => output::write_plan(out, scripts, json),
        Ok(Outcome::Applied(report)) => output::write_success(out, report, json),
        Err(err) => {
            let script = failed_script(err);
            tracing::error!(
                script = script.unwrap_or("-"),
                error = %output::describe(err),
                "Run failed",
            );
            if let Err(write_err) = output::write_failure(out, err_out, script, err, json) {
                tracing::error!(error = %write_err, "Failed to write result");
            }
            return EXIT_FAILURE;
        }
    };

    match written {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Failed to write result");
            EXIT_FAILURE
        }
    }
}

/// Name of the script that caused `err`, if a script did.
pub fn failed_script(err: &anyhow::Error) -> Option<&str> {
    err.downcast_ref::<MigrateError>().and_then(MigrateError::script)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::Parser;

    use super::*;

    fn cli_for(dir: &Path, extra: &[&str]) -> Cli {
        let mut args = vec!["roster-migrate".to_string(), dir.display().to_string()];
        args.extend(extra.iter().map(|s| s.to_string()));
        Cli::try_parse_from(args).expect("parse")
    }

    fn text(buf: Vec<u8>) -> String {
        String::from_utf8(buf).expect("utf-8 output")
    }

    #[test]
    fn failed_script_from_execution_error() {
        let err: anyhow::Error = MigrateError::Execution {
            script: "a_bad.sql".into(),
            source: "syntax error".into(),
        }
        .into();
        assert_eq!(failed_script(&err), Some("a_bad.sql"));

        let err = anyhow::anyhow!("Failed to connect");
        assert_eq!(failed_script(&err), None);
    }

    #[tokio::test]
    async fn dry_run_lists_order_without_connecting() {
        let dir = tempfile::tempdir().expect("create temp dir");
        for name in ["0002_b.sql", "0001_a.sql", "0003_c.sql"] {
            std::fs::write(dir.path().join(name), "SELECT 1;").expect("write script");
        }

        let cli = cli_for(dir.path(), &["--dry-run", "--skip", "0003_c.sql"]);
        let mut progress = Vec::new();
        let result = execute(&cli, &mut progress).await;
        assert!(progress.is_empty());

        let (mut out, mut err_out) = (Vec::new(), Vec::new());
        assert_eq!(report(&result, false, &mut out, &mut err_out), EXIT_SUCCESS);
        assert_eq!(
            text(out),
            "  1. 0001_a.sql\n  2. 0002_b.sql\n2 script(s) would run\n"
        );
        assert!(err_out.is_empty());
    }

    #[tokio::test]
    async fn missing_directory_fails_before_connecting() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let cli = cli_for(&dir.path().join("missing"), &[]);

        let result = execute(&cli, &mut Vec::new()).await;
        let err = result.as_ref().unwrap_err();
        assert_matches::assert_matches!(
            err.downcast_ref::<MigrateError>(),
            Some(MigrateError::Directory { .. })
        );
        assert_eq!(failed_script(err), None);

        let (mut out, mut err_out) = (Vec::new(), Vec::new());
        assert_eq!(report(&result, false, &mut out, &mut err_out), EXIT_FAILURE);
        assert!(out.is_empty());
        assert!(text(err_out).starts_with("Error: Cannot read script directory "));
    }
}
