//! Post-apply checks on the roster schema.

use crate::DbPool;

/// Tables the bundled scripts create, in dependency order.
pub const ROSTER_TABLES: [&str; 6] = ["inmate", "alias", "inmate_alias", "charge", "img", "bond"];

/// Return the roster tables absent from the `public` schema.
pub async fn missing_roster_tables(pool: &DbPool) -> Result<Vec<&'static str>, sqlx::Error> {
    let wanted: Vec<String> = ROSTER_TABLES.iter().map(|t| t.to_string()).collect();

    let present: Vec<String> = sqlx::query_scalar(
        "SELECT table_name::text
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name::text = ANY($1)",
    )
    .bind(&wanted)
    .fetch_all(pool)
    .await?;

    let missing: Vec<&'static str> = ROSTER_TABLES
        .into_iter()
        .filter(|table| !present.iter().any(|p| p == table))
        .collect();

    if !missing.is_empty() {
        tracing::warn!(?missing, "Roster tables missing");
    }
    Ok(missing)
}
