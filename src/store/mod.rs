pub mod model;
pub mod postgres;

#[cfg(test)]
pub mod memory;

pub use model::Model;
pub use postgres::PgModelStore;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::listing::ListingQuery;

/// Errors from the storage collaborator
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database connection error: {0}")]
    Connection(String),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                StoreError::Connection(err.to_string())
            }
            sqlx::Error::Io(e) => StoreError::Connection(e.to_string()),
            other => StoreError::Sqlx(other),
        }
    }
}

/// One page of models plus the pagination facts callers need to render a
/// pager. `current_page` is echoed from the query even when it lies past
/// `total_pages`; out-of-range pages yield an empty `items`, never an error
/// and never a clamped page number.
#[derive(Debug, Clone, Serialize)]
pub struct ModelPage {
    pub items: Vec<Model>,
    pub total_pages: u32,
    pub current_page: u32,
}

/// Paginated find-by-filter capability over the models collection.
#[async_trait]
pub trait ModelStore: Send + Sync {
    /// At most `per_page` items matching the descriptor's tags/search,
    /// ordered per `order_by`, plus the true total page count.
    async fn find_page(&self, query: &ListingQuery) -> Result<ModelPage, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Model>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
