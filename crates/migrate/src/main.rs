//! `roster-migrate` binary.
//!
//! # Environment variables
//!
//! | Variable         | Default         | Description                       |
//! |------------------|-----------------|-----------------------------------|
//! | `MIGRATIONS_DIR` | `db/migrations` | Directory holding the scripts     |
//! | `PGHOST`         | `localhost`     | Database host                     |
//! | `PGPORT`         | `5432`          | Database port                     |
//! | `PGDATABASE`     | `postgres`      | Database name                     |
//! | `PGUSER`         | `postgres`      | Database user                     |
//! | `PGPASSWORD`     | --              | Database password                 |
//! | `DATABASE_URL`   | --              | Full URL, overrides the PG* vars  |
//! | `RUST_LOG`       | `roster_migrate=info,...` | Log filter (logs go to stderr) |

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roster_migrate::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roster_migrate=info,roster_db=info,roster_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut stdout = std::io::stdout();
    let result = roster_migrate::execute(&cli, &mut stdout).await;
    let status = roster_migrate::report(&result, cli.json, &mut stdout, &mut std::io::stderr());
    ExitCode::from(status)
}
