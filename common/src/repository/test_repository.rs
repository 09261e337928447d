use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex, MutexGuard,
};

use async_trait::async_trait;
use mongodb::bson::{self, oid::ObjectId, Document};
use serde::de::DeserializeOwned;

use crate::inner_error::{InnerError, Result};

use super::{parse_id, Repository};

/// In-memory record store keeping documents in insertion order.
pub struct TestRepository<T> {
    _t: std::marker::PhantomData<T>,
    pub db: Mutex<Vec<Document>>,
    failing: AtomicBool,
}

impl<T> Default for TestRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TestRepository<T> {
    pub fn new() -> Self {
        Self {
            _t: std::marker::PhantomData,
            db: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    /// While set, every operation fails as an unreachable store would.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.db.lock().map(|db| db.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Document>>> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(InnerError::Store("test repository is failing".to_string()));
        }
        self.db
            .lock()
            .map_err(|_| InnerError::Store("test repository lock poisoned".to_string()))
    }
}

fn matches(record: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(field, value)| record.get(field) == Some(value))
}

fn has_id(record: &Document, id: &ObjectId) -> bool {
    record.get_object_id("_id").ok().as_ref() == Some(id)
}

#[async_trait]
impl<T> Repository<T> for TestRepository<T>
where
    T: DeserializeOwned + Send + Sync,
{
    async fn insert(&self, mut record: Document) -> Result<ObjectId> {
        let mut db = self.lock()?;
        let id = ObjectId::new();
        record.insert("_id", id);
        db.push(record);
        Ok(id)
    }

    async fn find_many(&self, filter: Document) -> Result<Vec<T>> {
        let db = self.lock()?;
        db.iter()
            .filter(|record| matches(record, &filter))
            .map(|record| -> Result<T> { Ok(bson::from_document(record.clone())?) })
            .collect()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<T>> {
        let id = parse_id(id)?;
        let db = self.lock()?;
        db.iter()
            .find(|record| has_id(record, &id))
            .map(|record| -> Result<T> { Ok(bson::from_document(record.clone())?) })
            .transpose()
    }

    async fn update_by_id(&self, id: &str, changes: Document) -> Result<bool> {
        let id = parse_id(id)?;
        let mut db = self.lock()?;
        let Some(record) = db.iter_mut().find(|record| has_id(record, &id)) else {
            return Ok(false);
        };
        record.extend(changes);
        Ok(true)
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<T>> {
        let id = parse_id(id)?;
        let mut db = self.lock()?;
        let Some(position) = db.iter().position(|record| has_id(record, &id)) else {
            return Ok(None);
        };
        let record = db.remove(position);
        Ok(Some(bson::from_document(record)?))
    }
}
