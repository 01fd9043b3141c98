//! Domain logic for applying the roster schema scripts.
//!
//! Everything here is independent of a concrete database: discovery and
//! ordering of scripts, the sequential [`runner::Runner`], connection
//! settings, and the error taxonomy. Postgres access lives in `roster-db`.

pub mod error;
pub mod runner;
pub mod script;
pub mod settings;

pub use error::{ExecutorError, MigrateError};
pub use runner::{AppliedScript, RunReport, Runner, ScriptExecutor};
pub use script::{discover_scripts, exclude_scripts, Script};
pub use settings::ConnectionSettings;
