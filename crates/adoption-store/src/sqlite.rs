use std::str::FromStr;

use async_trait::async_trait;
use common::timestamp;
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};

use crate::{
    AdoptionApplication, AdoptionId, AdoptionStore, AdoptionStoreError, AnimalId, NewAdoption,
    Result,
};

/// SQLite-backed adoption store implementation.
#[derive(Clone)]
pub struct SqliteAdoptionStore {
    pool: SqlitePool,
}

impl SqliteAdoptionStore {
    /// Creates a new SQLite adoption store on an existing pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if missing) the database at `url`.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Ok(Self::new(pool))
    }

    /// Opens a private in-memory database on a single, never recycled
    /// connection.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Ok(Self::new(pool))
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the adoptions table if it does not exist yet.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations/adoptions").run(&self.pool).await?;
        Ok(())
    }

    /// Closes the pool, waiting for in-flight queries to finish.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    fn row_to_application(row: SqliteRow) -> Result<AdoptionApplication> {
        let created_at: String = row.try_get("created_at")?;

        Ok(AdoptionApplication {
            id: AdoptionId::new(row.try_get("id")?),
            animal_id: AnimalId::new(row.try_get("animal_id")?),
            applicant_name: row.try_get("applicant_name")?,
            applicant_email: row.try_get("applicant_email")?,
            message: row.try_get("message")?,
            created_at: timestamp::parse(&created_at)?,
        })
    }
}

#[async_trait]
impl AdoptionStore for SqliteAdoptionStore {
    async fn find_by_animal(&self, animal_id: AnimalId) -> Result<Option<AdoptionApplication>> {
        let row = sqlx::query(
            r#"
            SELECT id, animal_id, applicant_name, applicant_email, message, created_at
            FROM adoptions
            WHERE animal_id = ?
            "#,
        )
        .bind(animal_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_application).transpose()
    }

    async fn insert(&self, adoption: NewAdoption) -> Result<AdoptionApplication> {
        let animal_id = adoption.animal_id;
        let created_at = timestamp::now();

        let result = sqlx::query(
            r#"
            INSERT INTO adoptions (animal_id, applicant_name, applicant_email, message, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(animal_id.as_i64())
        .bind(&adoption.applicant_name)
        .bind(&adoption.applicant_email)
        .bind(&adoption.message)
        .bind(timestamp::format(&created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // The unique constraint on animal_id is what settles concurrent inserts
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return AdoptionStoreError::AlreadyExists(animal_id);
            }
            AdoptionStoreError::Database(e)
        })?;

        let id = AdoptionId::new(result.last_insert_rowid());
        Ok(adoption.into_application(id, created_at))
    }

    async fn count_adoptions(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM adoptions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count as u64)
    }
}
