use sea_orm::{DatabaseConnection, SqlxSqliteConnector};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::time::Duration;

pub const MEMORY: &str = ":memory:";

fn database_url(db_path: &str) -> String {
    if db_path == MEMORY {
        "sqlite::memory:".to_string()
    } else {
        format!("sqlite:{}?mode=rwc", db_path)
    }
}

pub async fn init_pool(db_path: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let mut options = SqlitePoolOptions::new().max_connections(max_connections);

    if db_path == MEMORY {
        // Every connection to :memory: is its own database, keep exactly one alive.
        options = options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(Option::<Duration>::None)
            .max_lifetime(Option::<Duration>::None);
    } else {
        let abs_path = std::fs::canonicalize(db_path)
            .unwrap_or_else(|_| std::path::PathBuf::from(db_path));
        tracing::info!("Database absolute path: {:?}", abs_path);

        // Ensure parent directory exists
        if let Some(parent) = Path::new(db_path).parent() {
            tokio::fs::create_dir_all(parent).await.ok();
        }
    }

    let pool = options.connect(&database_url(db_path)).await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    if let Err(e) = sqlx::migrate!("./migrations").run(pool).await {
        tracing::error!("Database migration failed: {}", e);
        return Err(e.into());
    }

    tracing::info!("Database migrations applied successfully");
    Ok(())
}

/// Opens (and migrates) the database and hands the pool to sea-orm.
pub async fn connect(db_path: &str, max_connections: u32) -> Result<DatabaseConnection, sqlx::Error> {
    let pool = init_pool(db_path, max_connections).await?;
    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// A fresh migrated in-memory database.
    pub async fn memory_db() -> DatabaseConnection {
        connect(MEMORY, 1).await.expect("in-memory database")
    }

    /// A migrated on-disk database behind a multi-connection pool, so writers
    /// can actually overlap. Keep the `TempDir` alive for the test's duration.
    pub async fn file_db(max_connections: u32) -> (DatabaseConnection, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("profiles.db");
        let db = connect(path.to_str().expect("utf-8 temp path"), max_connections)
            .await
            .expect("file database");
        (db, dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnectionTrait, DbBackend, Statement};

    #[test]
    fn test_database_url() {
        assert_eq!(database_url(MEMORY), "sqlite::memory:");
        assert_eq!(database_url("data/profiles.db"), "sqlite:data/profiles.db?mode=rwc");
    }

    #[tokio::test]
    async fn test_migrations_create_tables() {
        let db = testing::memory_db().await;
        for table in ["users", "follows", "social_ids", "members"] {
            let row = db
                .query_one(Statement::from_sql_and_values(
                    DbBackend::Sqlite,
                    "SELECT COUNT(*) AS n FROM sqlite_master WHERE type = 'table' AND name = ?",
                    [table.into()],
                ))
                .await
                .unwrap()
                .unwrap();
            let n: i64 = row.try_get("", "n").unwrap();
            assert_eq!(n, 1, "missing table {table}");
        }
    }

    #[tokio::test]
    async fn test_column_defaults_apply_on_bare_insert() {
        let db = testing::memory_db().await;
        db.execute_unprepared("INSERT INTO users DEFAULT VALUES")
            .await
            .unwrap();
        let row = db
            .query_one(Statement::from_string(
                DbBackend::Sqlite,
                "SELECT username, avatar, bio FROM users",
            ))
            .await
            .unwrap()
            .unwrap();
        let username: String = row.try_get("", "username").unwrap();
        let avatar: String = row.try_get("", "avatar").unwrap();
        let bio: String = row.try_get("", "bio").unwrap();
        assert_eq!(username, "Anonymous");
        assert_eq!(avatar, "");
        assert_eq!(bio, "Hello Dogehouse");
    }

    #[tokio::test]
    async fn test_check_constraint_rejects_overlong_username() {
        let db = testing::memory_db().await;
        let res = db
            .execute_unprepared("INSERT INTO users (username) VALUES ('thirteenchars')")
            .await;
        assert!(res.is_err());
    }
}
