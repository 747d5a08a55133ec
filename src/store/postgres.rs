use std::time::Duration;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use super::{Model, ModelPage, ModelStore, StoreError};
use crate::config::DatabaseConfig;
use crate::listing::ListingQuery;

/// Postgres-backed model store over a `models` table:
/// id UUID PK, name TEXT, file_url TEXT, tags TEXT[],
/// created_at/updated_at TIMESTAMPTZ.
pub struct PgModelStore {
    pool: PgPool,
}

impl PgModelStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a store from DATABASE_URL. The pool is lazy: the process boots
    /// without a reachable database and failures surface per query.
    pub fn from_env(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
            tracing::warn!("DATABASE_URL not set, falling back to local default");
            "postgres://localhost:5432/modelhub".to_string()
        });

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_lazy(&url)?;

        Ok(Self { pool })
    }

    /// WHERE fragment and the $n positions its two optional binds occupy.
    fn where_clause(query: &ListingQuery) -> String {
        let mut conditions = Vec::new();
        let mut arg = 0;

        if !query.tags.is_empty() {
            arg += 1;
            conditions.push(format!("tags && ${}", arg));
        }
        if query.search.is_some() {
            arg += 1;
            conditions.push(format!("name ILIKE ${}", arg));
        }

        if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        }
    }
}

#[async_trait]
impl ModelStore for PgModelStore {
    async fn find_page(&self, query: &ListingQuery) -> Result<ModelPage, StoreError> {
        let where_sql = Self::where_clause(query);
        let search_pattern = query.search.as_deref().map(|s| format!("%{}%", s));

        let count_sql = format!("SELECT COUNT(*) FROM models{}", where_sql);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if !query.tags.is_empty() {
            count_query = count_query.bind(&query.tags);
        }
        if let Some(ref pattern) = search_pattern {
            count_query = count_query.bind(pattern);
        }
        let total_matches = count_query.fetch_one(&self.pool).await?;

        let bind_base = [!query.tags.is_empty(), search_pattern.is_some()]
            .iter()
            .filter(|&&b| b)
            .count();
        let page_sql = format!(
            "SELECT id, name, file_url, tags, created_at, updated_at \
             FROM models{} ORDER BY {} LIMIT ${} OFFSET ${}",
            where_sql,
            query.order_by.to_sql(),
            bind_base + 1,
            bind_base + 2,
        );

        let mut page_query = sqlx::query_as::<_, Model>(&page_sql);
        if !query.tags.is_empty() {
            page_query = page_query.bind(&query.tags);
        }
        if let Some(ref pattern) = search_pattern {
            page_query = page_query.bind(pattern);
        }
        let items = page_query
            .bind(i64::from(query.per_page))
            .bind(query.offset() as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok(ModelPage {
            items,
            total_pages: query.total_pages(total_matches as u64),
            current_page: query.page,
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Model>, StoreError> {
        let model = sqlx::query_as::<_, Model>(
            "SELECT id, name, file_url, tags, created_at, updated_at FROM models WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(model)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
