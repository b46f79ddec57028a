use anyhow::Result;
use sqlx::{
    migrate::MigrateDatabase,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Sqlite, SqlitePool,
};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Owns the SQLite pool shared by handlers, the scheduler and the health server.
#[derive(Clone)]
pub struct DatabaseManager {
    /// Connection pool for the streak database.
    pub pool: SqlitePool,
}

impl DatabaseManager {
    /// Creates the database file (and its directory) if needed and connects eagerly.
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_parent_dir(database_url)?;

        // Create database if it doesn't exist
        if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
            info!("Creating database {}", database_url);
            Sqlite::create_database(database_url).await?;
        }

        let pool = SqlitePool::connect(database_url).await?;

        Ok(Self { pool })
    }

    /// Builds a pool that only opens connections on first use.
    ///
    /// Used when the eager connection fails at startup: the bot keeps running and
    /// every data operation reports its own error until the store comes back.
    pub fn connect_lazy(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_lazy_with(options);
        Ok(Self { pool })
    }

    /// Applies the embedded migrations from `./migrations`.
    pub async fn run_migrations(&self) -> Result<()> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Keeps trying to migrate until it succeeds, sleeping `interval` between attempts.
    ///
    /// Paired with [`DatabaseManager::connect_lazy`]: once the store is reachable
    /// again the schema is put in place and normal operations start working.
    pub async fn run_migrations_with_retry(&self, interval: Duration) {
        let mut attempt: u64 = 1;
        loop {
            match self.run_migrations().await {
                Ok(()) => {
                    info!("Database migrations applied after {} attempt(s)", attempt);
                    return;
                }
                Err(e) => {
                    warn!("Migration attempt {} failed: {}; retrying in {:?}", attempt, e, interval);
                    attempt += 1;
                    tokio::time::sleep(interval).await;
                }
            }
        }
    }

    /// Cheapest possible round trip to the store.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}

/// Checks that `database_url` is a SQLite URL sqlx can parse.
pub fn validate_database_url(database_url: &str) -> Result<(), sqlx::Error> {
    SqliteConnectOptions::from_str(database_url).map(|_| ())
}

/// SQLite can create the file but not its directory.
fn ensure_parent_dir(database_url: &str) -> Result<()> {
    let Some(path) = database_url.strip_prefix("sqlite:") else {
        return Ok(());
    };
    let path = path.trim_start_matches("//");
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path == ":memory:" {
        return Ok(());
    }

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating directory {}", parent.display());
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
