pub mod mongo_repository;
pub mod test_repository;

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};

use crate::inner_error::{InnerError, Result};

/// Schema-less record store addressed by `_id`.
///
/// Identifiers cross this boundary as strings; an implementation reports an
/// identifier it cannot parse as [`InnerError::MalformedId`].
#[async_trait]
pub trait Repository<T>: Send + Sync {
    async fn insert(&self, record: Document) -> Result<ObjectId>;
    async fn find_many(&self, filter: Document) -> Result<Vec<T>>;
    async fn find_by_id(&self, id: &str) -> Result<Option<T>>;
    /// Merges `changes` into the record. Returns `false` when no record matched.
    async fn update_by_id(&self, id: &str, changes: Document) -> Result<bool>;
    async fn delete_by_id(&self, id: &str) -> Result<Option<T>>;
}

pub type RepositoryObject<T> = Arc<dyn Repository<T>>;

pub fn parse_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| InnerError::MalformedId(id.to_string()))
}
