//! PostgreSQL gateway for chat-service.

use crate::models::{Message, NewMessage};
use crate::services::metrics::record_db_query;
use crate::services::store::MessageStore;
use async_trait::async_trait;
use service_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::{Duration, Instant};
use tracing::{info, instrument};

const CREATE_MESSAGES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS messages (
        id SERIAL PRIMARY KEY,
        sender VARCHAR(32) NOT NULL,
        conversation_id INTEGER NOT NULL,
        message TEXT NOT NULL,
        created TIMESTAMP DEFAULT(CURRENT_TIMESTAMP)
    )
"#;

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    ///
    /// Fails if no connection can be established; there is no retry.
    #[instrument(skip(database_url), fields(service = "chat-service"))]
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the messages table if it is missing.
    #[instrument(skip(self))]
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        sqlx::query(CREATE_MESSAGES_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to create schema: {}", e))
            })?;

        info!("Messages schema ready");
        Ok(())
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl MessageStore for Database {
    #[instrument(skip(self, message), fields(conversation_id = message.conversation_id))]
    async fn insert_message(&self, message: &NewMessage) -> Result<(), AppError> {
        let start = Instant::now();

        sqlx::query(
            r#"
            INSERT INTO messages (sender, conversation_id, message)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&message.sender)
        .bind(message.conversation_id)
        .bind(&message.message)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to insert message: {}", e)))?;

        record_db_query("insert_message", start.elapsed());

        Ok(())
    }

    #[instrument(skip(self))]
    async fn messages_by_conversation(
        &self,
        conversation_id: i32,
    ) -> Result<Vec<Message>, AppError> {
        let start = Instant::now();

        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT sender, message, created
            FROM messages
            WHERE conversation_id = $1
            ORDER BY created ASC, id ASC
            "#,
        )
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to select messages: {}", e))
        })?;

        record_db_query("messages_by_conversation", start.elapsed());

        Ok(messages)
    }
}
