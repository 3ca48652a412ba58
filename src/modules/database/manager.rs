// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::context::Initialize;
use crate::modules::database::schema::initialize_schema;
use crate::modules::error::{code::ErrorCode, MailSiftResult};
use crate::modules::settings::cli::SETTINGS;
use crate::modules::settings::dir::DATA_DIR_MANAGER;
use crate::raise_error;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{info, warn};

static DB_MANAGER: OnceLock<DatabaseManager> = OnceLock::new();

/// Owns the connection pool. Every query acquires a connection for its own
/// duration and hands it back on success and failure alike.
pub struct DatabaseManager {
    pool: SqlitePool,
}

impl Initialize for DatabaseManager {
    async fn initialize() -> MailSiftResult<()> {
        let url = DATA_DIR_MANAGER.database_url();
        let manager = Self::open(
            &url,
            SETTINGS.mailsift_db_max_connections,
            Duration::from_secs(SETTINGS.mailsift_db_acquire_timeout_secs),
        )
        .await?;
        DB_MANAGER.set(manager).map_err(|_| {
            raise_error!(
                "Database manager initialized twice".into(),
                ErrorCode::InternalError
            )
        })?;
        info!("Database ready at {}", url);
        Ok(())
    }
}

impl DatabaseManager {
    /// Opens the database at `url`. An in-memory URL gets a single-connection
    /// pool, since every SQLite connection to `:memory:` is a separate database.
    pub async fn open(
        url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> MailSiftResult<Self> {
        if is_memory_url(url) {
            if max_connections > 1 {
                warn!(
                    "In-memory database requested; ignoring max connections {} and using 1",
                    max_connections
                );
            }
            return Self::in_memory().await;
        }
        Self::connect(url, max_connections, acquire_timeout).await
    }

    /// Opens (creating if missing) the database at `url` and prepares the schema.
    pub async fn connect(
        url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> MailSiftResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect_with(options)
            .await?;
        initialize_schema(&pool).await?;
        Ok(Self { pool })
    }

    /// A single-connection in-memory database, for tests and throwaway runs.
    pub async fn in_memory() -> MailSiftResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;
        initialize_schema(&pool).await?;
        Ok(Self { pool })
    }

    pub fn get() -> MailSiftResult<&'static DatabaseManager> {
        DB_MANAGER.get().ok_or_else(|| {
            raise_error!(
                "Database manager is not initialized".into(),
                ErrorCode::InternalError
            )
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Waits for checked-out connections to return, then closes the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}
