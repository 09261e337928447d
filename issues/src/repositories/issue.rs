use std::sync::Arc;

use common::{
    entities::issue::{Issue, NewIssue},
    inner_error::Result,
    repository::{Repository, RepositoryObject},
};
use mongodb::bson::{oid::ObjectId, to_document, Document};

#[derive(Clone)]
pub struct IssueRepo(RepositoryObject<Issue<ObjectId>>);

impl IssueRepo {
    pub fn new<T>(repo: T) -> Self
    where
        T: Repository<Issue<ObjectId>> + 'static,
    {
        Self(Arc::new(repo))
    }

    pub fn shared(repo: RepositoryObject<Issue<ObjectId>>) -> Self {
        Self(repo)
    }

    pub async fn create(&self, issue: &NewIssue) -> Result<ObjectId> {
        self.0.insert(to_document(issue)?).await
    }

    pub async fn find_many(&self, filter: Document) -> Result<Vec<Issue<ObjectId>>> {
        self.0.find_many(filter).await
    }

    pub async fn find(&self, id: &str) -> Result<Option<Issue<ObjectId>>> {
        self.0.find_by_id(id).await
    }

    pub async fn update(&self, id: &str, changes: Document) -> Result<bool> {
        self.0.update_by_id(id, changes).await
    }

    pub async fn delete(&self, id: &str) -> Result<Option<Issue<ObjectId>>> {
        self.0.delete_by_id(id).await
    }
}
