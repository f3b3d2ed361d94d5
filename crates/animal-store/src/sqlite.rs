use std::str::FromStr;

use async_trait::async_trait;
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};

use crate::{Animal, AnimalId, AnimalStatus, AnimalStore, AnimalStoreError, NewAnimal, Result};

const SELECT_COLUMNS: &str =
    "SELECT id, name, type, age, breed, description, image_url, status FROM animals";

/// SQLite-backed animal store implementation.
#[derive(Clone)]
pub struct SqliteAnimalStore {
    pool: SqlitePool,
}

impl SqliteAnimalStore {
    /// Creates a new SQLite animal store on an existing pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if missing) the database at `url`.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Ok(Self::new(pool))
    }

    /// Opens a private in-memory database.
    ///
    /// The pool holds a single connection that is never recycled, since
    /// every SQLite memory connection sees its own database.
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

    /// Creates the animals table if it does not exist yet.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations/animals").run(&self.pool).await?;
        Ok(())
    }

    /// Closes the pool, waiting for in-flight queries to finish.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    fn row_to_animal(row: SqliteRow) -> Result<Animal> {
        let status: String = row.try_get("status")?;

        Ok(Animal {
            id: AnimalId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            species: row.try_get("type")?,
            age: row.try_get("age")?,
            breed: row.try_get("breed")?,
            description: row.try_get("description")?,
            image_url: row.try_get("image_url")?,
            status: AnimalStatus::from_str(&status)?,
        })
    }
}

#[async_trait]
impl AnimalStore for SqliteAnimalStore {
    async fn list_animals(&self) -> Result<Vec<Animal>> {
        let rows = sqlx::query(&format!("{SELECT_COLUMNS} ORDER BY id ASC"))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Self::row_to_animal).collect()
    }

    async fn get_animal(&self, id: AnimalId) -> Result<Option<Animal>> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_animal).transpose()
    }

    async fn mark_adopted(&self, id: AnimalId) -> Result<()> {
        let result = sqlx::query("UPDATE animals SET status = ? WHERE id = ?")
            .bind(AnimalStatus::Adopted.as_str())
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AnimalStoreError::AnimalNotFound(id));
        }
        Ok(())
    }

    async fn count_animals(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM animals")
            .fetch_one(&self.pool)
            .await?;

        Ok(count as u64)
    }

    async fn insert_animal(&self, animal: NewAnimal) -> Result<Animal> {
        let result = sqlx::query(
            r#"
            INSERT INTO animals (name, type, age, breed, description, image_url, status)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&animal.name)
        .bind(&animal.species)
        .bind(animal.age)
        .bind(animal.breed.as_deref())
        .bind(animal.description.as_deref())
        .bind(animal.image_url.as_deref())
        .bind(AnimalStatus::Available.as_str())
        .execute(&self.pool)
        .await?;

        Ok(animal.into_animal(AnimalId::new(result.last_insert_rowid())))
    }
}
