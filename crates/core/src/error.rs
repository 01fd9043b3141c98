use std::path::PathBuf;

/// Boxed error produced by a [`ScriptExecutor`](crate::runner::ScriptExecutor).
pub type ExecutorError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    #[error("Cannot read script directory {}: {source}", path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read script {script}: {source}")]
    ReadScript {
        script: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Script {script} failed: {source}")]
    Execution {
        script: String,
        #[source]
        source: ExecutorError,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl MigrateError {
    /// File name of the script this error belongs to, if any.
    pub fn script(&self) -> Option<&str> {
        match self {
            Self::ReadScript { script, .. } | Self::Execution { script, .. } => Some(script),
            Self::Directory { .. } | Self::Config(_) => None,
        }
    }
}
