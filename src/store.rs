//! PostgreSQL bootstrap: pool, database existence, and the `student` table DDL.

use crate::config::ServerConfig;
use crate::error::{AppError, ConfigError};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;
use std::time::Duration;

/// Name of the single table this service owns.
pub const STUDENT_TABLE: &str = "student";

/// True for identifiers we are willing to splice into DDL: ASCII letters, digits and
/// underscores, not starting with a digit, at most 63 bytes (PostgreSQL NAMEDATALEN - 1).
pub fn is_plain_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    s.len() <= 63 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Schema-qualified, quoted table name (e.g. `"public"."student"`).
pub fn qualified_student_table(schema: &str) -> String {
    format!("{}.{}", quote_ident(schema), quote_ident(STUDENT_TABLE))
}

/// Open the connection pool described by `config`.
pub async fn connect(config: &ServerConfig) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}

/// Create the schema, the `student` table and its name index if they do not exist.
/// `inserted_seq` only orders name lookups; it never leaves the repository.
pub async fn ensure_student_table(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    if !is_plain_identifier(schema) {
        return Err(ConfigError::InvalidValue {
            key: "STUDENT_SCHEMA",
            value: schema.to_string(),
            reason: "must be a plain SQL identifier".into(),
        }
        .into());
    }
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(schema)))
        .execute(pool)
        .await?;

    let table = qualified_student_table(schema);
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            roll_no INTEGER NOT NULL,
            address TEXT NOT NULL,
            inserted_seq BIGSERIAL NOT NULL
        )
        "#,
        table
    );
    sqlx::query(&ddl).execute(pool).await?;

    let index = quote_ident(&format!("{}_name_idx", STUDENT_TABLE));
    sqlx::query(&format!(
        "CREATE INDEX IF NOT EXISTS {} ON {} (name)",
        index, table
    ))
    .execute(pool)
    .await?;

    tracing::info!(schema = %schema, "student table ready");
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
/// A URL that names no database (or `postgres` itself) has nothing to create.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin, db_name) = admin_options(database_url)?;
    let Some(db_name) = db_name else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Options for the `postgres` admin database, plus the target database when one needs checking.
fn admin_options(database_url: &str) -> Result<(PgConnectOptions, Option<String>), ConfigError> {
    let opts = PgConnectOptions::from_str(database_url).map_err(|e| ConfigError::InvalidValue {
        key: "DATABASE_URL",
        value: database_url.to_string(),
        reason: e.to_string(),
    })?;
    let db_name = opts
        .get_database()
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "postgres")
        .map(String::from);
    Ok((opts.database("postgres"), db_name))
}
