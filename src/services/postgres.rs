use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use thiserror::Error;

use crate::models::{Address, BoundingBox, GeoPoint};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

/// PostgreSQL-backed address store
///
/// Soft-deleted rows stay in the table with `is_deleted = TRUE` and are
/// invisible to every query here.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Connect, then run the embedded migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Build a client whose pool only connects on first use
    ///
    /// No migrations are run. Useful for exercising request handling that
    /// never reaches the database.
    pub fn connect_lazy(database_url: &str) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_secs(1))
            .connect_lazy(database_url)?;

        Ok(Self { pool })
    }

    /// Insert a new address
    pub async fn create_address(&self, location: GeoPoint) -> Result<Address, PostgresError> {
        let query = r#"
            INSERT INTO addresses (latitude, longitude)
            VALUES ($1, $2)
            RETURNING id, latitude, longitude
        "#;

        let address = sqlx::query_as::<_, Address>(query)
            .bind(location.latitude())
            .bind(location.longitude())
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!("Created address #{}", address.id);

        Ok(address)
    }

    /// Fetch a non-deleted address by id
    pub async fn get_address(&self, id: i64) -> Result<Option<Address>, PostgresError> {
        let query = r#"
            SELECT id, latitude, longitude
            FROM addresses
            WHERE id = $1 AND is_deleted = FALSE
        "#;

        let address = sqlx::query_as::<_, Address>(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(address)
    }

    /// List non-deleted addresses ordered by id
    pub async fn list_addresses(&self, skip: u32, limit: u32) -> Result<Vec<Address>, PostgresError> {
        let query = r#"
            SELECT id, latitude, longitude
            FROM addresses
            WHERE is_deleted = FALSE
            ORDER BY id
            LIMIT $1 OFFSET $2
        "#;

        let addresses = sqlx::query_as::<_, Address>(query)
            .bind(i64::from(limit))
            .bind(i64::from(skip))
            .fetch_all(&self.pool)
            .await?;

        Ok(addresses)
    }

    /// Apply a partial update; `None` fields keep their stored value
    ///
    /// Returns `None` when the address does not exist or was deleted.
    pub async fn update_address(
        &self,
        id: i64,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Option<Address>, PostgresError> {
        let query = r#"
            UPDATE addresses
            SET latitude = COALESCE($2, latitude),
                longitude = COALESCE($3, longitude),
                updated_at = NOW()
            WHERE id = $1 AND is_deleted = FALSE
            RETURNING id, latitude, longitude
        "#;

        let address = sqlx::query_as::<_, Address>(query)
            .bind(id)
            .bind(latitude)
            .bind(longitude)
            .fetch_optional(&self.pool)
            .await?;

        Ok(address)
    }

    /// Mark an address as deleted
    ///
    /// Returns `false` when there was no live address with that id.
    pub async fn soft_delete_address(&self, id: i64) -> Result<bool, PostgresError> {
        let query = r#"
            UPDATE addresses
            SET is_deleted = TRUE, updated_at = NOW()
            WHERE id = $1 AND is_deleted = FALSE
        "#;

        let result = sqlx::query(query).bind(id).execute(&self.pool).await?;

        Ok(result.rows_affected() > 0)
    }

    /// Non-deleted addresses whose coordinates fall inside the box
    ///
    /// A wrapped box matches `longitude >= min_lon OR longitude <= max_lon`.
    pub async fn addresses_in_bounding_box(
        &self,
        bbox: &BoundingBox,
    ) -> Result<Vec<Address>, PostgresError> {
        let query = r#"
            SELECT id, latitude, longitude
            FROM addresses
            WHERE is_deleted = FALSE
              AND latitude BETWEEN $1 AND $2
              AND (
                    (NOT $5 AND longitude BETWEEN $3 AND $4)
                 OR ($5 AND (longitude >= $3 OR longitude <= $4))
              )
            ORDER BY id
        "#;

        let addresses = sqlx::query_as::<_, Address>(query)
            .bind(bbox.min_lat)
            .bind(bbox.max_lat)
            .bind(bbox.min_lon)
            .bind(bbox.max_lon)
            .bind(bbox.is_wrapped())
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(
            "Bounding box [{:.4}, {:.4}] x [{:.4}, {:.4}] matched {} addresses",
            bbox.min_lat,
            bbox.max_lat,
            bbox.min_lon,
            bbox.max_lon,
            addresses.len()
        );

        Ok(addresses)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
