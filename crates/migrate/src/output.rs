//! Human and JSON rendering of run results.

use std::io::{self, Write};

use roster_core::{MigrateError, RunReport, Script};
use serde_json::json;

pub fn write_progress(out: &mut impl Write, script: &Script) -> io::Result<()> {
    writeln!(out, "Running {}...", script.name)
}

pub fn write_plan(out: &mut impl Write, scripts: &[Script], json: bool) -> io::Result<()> {
    if json {
        return writeln!(out, "{}", plan_json(scripts));
    }
    for (idx, script) in scripts.iter().enumerate() {
        writeln!(out, "{:>3}. {}", idx + 1, script.name)?;
    }
    writeln!(out, "{} script(s) would run", scripts.len())
}

pub fn write_success(out: &mut impl Write, report: &RunReport, json: bool) -> io::Result<()> {
    if json {
        writeln!(out, "{}", success_json(report))
    } else {
        writeln!(out, "Applied {} script(s) successfully", report.count())
    }
}

/// Failure line for humans; with `json` the object goes to `out` instead.
pub fn write_failure(
    out: &mut impl Write,
    err_out: &mut impl Write,
    script: Option<&str>,
    err: &anyhow::Error,
    json: bool,
) -> io::Result<()> {
    if json {
        return writeln!(out, "{}", failure_json(script, err));
    }
    match script {
        Some(name) => writeln!(err_out, "Failed on {name}: {}", describe(err)),
        None => writeln!(err_out, "Error: {}", describe(err)),
    }
}

/// One-line description of `err`. Script failures are reduced to their
/// cause since the script name is reported alongside.
pub fn describe(err: &anyhow::Error) -> String {
    match err.downcast_ref::<MigrateError>() {
        Some(MigrateError::Execution { source, .. }) => source.to_string(),
        Some(MigrateError::ReadScript { source, .. }) => source.to_string(),
        Some(other) => other.to_string(),
        None => format!("{err:#}"),
    }
}

pub fn plan_json(scripts: &[Script]) -> serde_json::Value {
    json!({
        "status": "planned",
        "scripts": scripts,
    })
}

pub fn success_json(report: &RunReport) -> serde_json::Value {
    json!({
        "status": "succeeded",
        "applied": report.applied,
        "total_duration_ms": report.total_duration_ms,
    })
}

pub fn failure_json(script: Option<&str>, err: &anyhow::Error) -> serde_json::Value {
    json!({
        "status": "failed",
        "script": script,
        "error": describe(err),
    })
}
