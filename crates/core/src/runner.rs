//! Sequential script runner.
//!
//! [`Runner`] applies an ordered list of scripts through a
//! [`ScriptExecutor`], one at a time, and stops at the first failure.
//! The executor is passed in explicitly, so the runner itself has no
//! database access and can be driven by a fake in tests.

use std::future::Future;
use std::time::Instant;

use serde::Serialize;

use crate::error::{ExecutorError, MigrateError};
use crate::script::Script;

/// Seam between the runner and a database.
pub trait ScriptExecutor: Send + Sync {
    /// Apply the statements in `sql` (the content of `script`) as one step.
    fn execute(
        &self,
        script: &Script,
        sql: &str,
    ) -> impl Future<Output = Result<(), ExecutorError>> + Send;
}

/// A script that was applied successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedScript {
    pub name: String,
    pub duration_ms: u64,
}

/// Outcome of a run in which every script succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Applied scripts, in execution order.
    pub applied: Vec<AppliedScript>,
    pub total_duration_ms: u64,
}

impl RunReport {
    pub fn count(&self) -> usize {
        self.applied.len()
    }
}

/// Applies scripts in the order given, halting on the first error.
pub struct Runner<E> {
    executor: E,
}

impl<E: ScriptExecutor> Runner<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Apply `scripts` in slice order.
    ///
    /// `on_start` is called with each script right before it executes.
    /// Scripts after a failing one are neither read nor executed.
    pub async fn run<F>(
        &self,
        scripts: &[Script],
        mut on_start: F,
    ) -> Result<RunReport, MigrateError>
    where
        F: FnMut(&Script),
    {
        let started = Instant::now();
        let mut report = RunReport::default();

        for script in scripts {
            on_start(script);
            tracing::info!(script = %script.name, "Applying script");

            let sql = tokio::fs::read_to_string(&script.path)
                .await
                .map_err(|source| MigrateError::ReadScript {
                    script: script.name.clone(),
                    source,
                })?;

            let script_started = Instant::now();
            if let Err(source) = self.executor.execute(script, &sql).await {
                tracing::error!(script = %script.name, error = %source, "Script failed");
                return Err(MigrateError::Execution {
                    script: script.name.clone(),
                    source,
                });
            }

            let duration_ms = elapsed_ms(script_started);
            tracing::info!(script = %script.name, duration_ms, "Script applied");
            report.applied.push(AppliedScript {
                name: script.name.clone(),
                duration_ms,
            });
        }

        report.total_duration_ms = elapsed_ms(started);
        tracing::info!(
            count = report.count(),
            duration_ms = report.total_duration_ms,
            "All scripts applied",
        );
        Ok(report)
    }
}

fn elapsed_ms(since: Instant) -> u64 {
    u64::try_from(since.elapsed().as_millis()).unwrap_or(u64::MAX)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
