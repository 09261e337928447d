use async_trait::async_trait;
use futures::StreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    IndexModel,
};
use serde::de::DeserializeOwned;

use crate::inner_error::{InnerError, Result};

use super::{parse_id, Repository};

pub struct MongoRepository<T> {
    pub collection: mongodb::Collection<T>,
}

impl<T> MongoRepository<T>
where
    T: Send + Sync,
{
    pub async fn new(mongo_uri: &str, database: &str, collection: &str) -> Result<Self> {
        let collection = mongodb::Client::with_uri_str(mongo_uri)
            .await?
            .database(database)
            .collection(collection);
        Ok(Self { collection })
    }

    pub async fn ensure_index(&self, field: &str) -> Result<()> {
        let index = IndexModel::builder().keys(doc! {field: 1}).build();
        self.collection.create_index(index, None).await?;
        Ok(())
    }
}

#[async_trait]
impl<T> Repository<T> for MongoRepository<T>
where
    T: DeserializeOwned + Unpin + Send + Sync,
{
    async fn insert(&self, record: Document) -> Result<ObjectId> {
        let result = self
            .collection
            .clone_with_type::<Document>()
            .insert_one(record, None)
            .await?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| InnerError::Store("inserted record has no object id".to_string()))
    }

    async fn find_many(&self, filter: Document) -> Result<Vec<T>> {
        let result: Vec<mongodb::error::Result<T>> =
            self.collection.find(filter, None).await?.collect().await;
        Ok(result.into_iter().collect::<mongodb::error::Result<_>>()?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<T>> {
        let id = parse_id(id)?;
        let result = self.collection.find_one(doc! {"_id": id}, None).await?;
        Ok(result)
    }

    async fn update_by_id(&self, id: &str, changes: Document) -> Result<bool> {
        let id = parse_id(id)?;
        let result = self
            .collection
            .update_one(doc! {"_id": id}, doc! {"$set": changes}, None)
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<T>> {
        let id = parse_id(id)?;
        let result = self
            .collection
            .find_one_and_delete(doc! {"_id": id}, None)
            .await?;
        Ok(result)
    }
}
