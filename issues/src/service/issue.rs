use common::{
    current_timestamp,
    entities::issue::{
        Issue, NewIssue, ASSIGNED_TO, CREATED_BY, ID, ISSUE_TEXT, ISSUE_TITLE, STATUS_TEXT,
        UPDATABLE_FIELDS, UPDATED_ON,
    },
};
use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{OuterError, Result},
    repositories::issue::IssueRepo,
};

use super::{
    fields::{self, Fields},
    filter::build_filter,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ResultResponse {
    pub result: String,
    #[serde(rename = "_id")]
    pub id: String,
}

impl ResultResponse {
    pub fn updated(id: String) -> Self {
        Self {
            result: "successfully updated".to_string(),
            id,
        }
    }

    pub fn deleted(id: String) -> Self {
        Self {
            result: "successfully deleted".to_string(),
            id,
        }
    }
}

pub struct IssueService {
    repo: IssueRepo,
}

impl IssueService {
    pub fn new(repo: IssueRepo) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        project: &str,
        query: Vec<(String, String)>,
    ) -> Result<Vec<Issue<String>>> {
        let Some(filter) = build_filter(project, query) else {
            return Ok(Vec::new());
        };

        let issues = self.repo.find_many(filter).await.map_err(|err| {
            log::error!("Failed to list issues of project {}: {}", project, err);
            err
        })?;

        Ok(Issue::stringify_map(issues))
    }

    pub async fn create(&self, project: &str, body: &Fields) -> Result<Issue<String>> {
        let (Some(issue_title), Some(issue_text), Some(created_by)) = (
            fields::non_empty_text(body, ISSUE_TITLE),
            fields::non_empty_text(body, ISSUE_TEXT),
            fields::non_empty_text(body, CREATED_BY),
        ) else {
            return Err(OuterError::RequiredFieldsMissing.into());
        };

        let now = current_timestamp();
        let issue = NewIssue {
            project_name: project.to_string(),
            issue_title,
            issue_text,
            created_by,
            assigned_to: fields::non_empty_text(body, ASSIGNED_TO).unwrap_or_default(),
            status_text: fields::non_empty_text(body, STATUS_TEXT).unwrap_or_default(),
            open: true,
            created_on: now.clone(),
            updated_on: now,
        };

        let id = self.repo.create(&issue).await.map_err(|err| {
            log::error!("Failed to create issue in project {}: {}", project, err);
            OuterError::PostFailed(err)
        })?;

        log::info!("Created issue {} in project {}", id, project);
        Ok(issue.with_id(id).stringify())
    }

    pub async fn change(&self, body: &Fields) -> Result<ResultResponse> {
        let Some(id) = request_id(body) else {
            return Err(OuterError::MissingId.into());
        };

        if body.len() == 1 {
            return Err(OuterError::NoUpdateFields { id }.into());
        }

        let issue = match self.repo.find(&id).await {
            Ok(Some(issue)) => issue,
            Ok(None) => return Err(OuterError::CouldNotUpdate { id }.into()),
            Err(err) => {
                log::warn!("Failed to load issue {} for update: {}", id, err);
                return Err(OuterError::CouldNotUpdate { id }.into());
            }
        };

        let mut changes = match collect_changes(body) {
            Ok(changes) => changes,
            Err(field) => {
                log::warn!("Rejected value of {} for issue {}", field, id);
                return Err(OuterError::CouldNotUpdate { id }.into());
            }
        };

        if changes.is_empty() {
            return Err(OuterError::NoUpdateFields { id }.into());
        }

        changes.insert(UPDATED_ON, update_time(&issue.created_on));

        match self.repo.update(&id, changes).await {
            Ok(true) => {
                log::info!("Updated issue {}", id);
                Ok(ResultResponse::updated(id))
            }
            Ok(false) => Err(OuterError::CouldNotUpdate { id }.into()),
            Err(err) => {
                log::error!("Failed to update issue {}: {}", id, err);
                Err(OuterError::CouldNotUpdate { id }.into())
            }
        }
    }

    pub async fn delete(&self, body: &Fields) -> Result<ResultResponse> {
        let Some(id) = request_id(body) else {
            return Err(OuterError::MissingId.into());
        };

        match self.repo.delete(&id).await {
            Ok(Some(_)) => {
                log::info!("Deleted issue {}", id);
                Ok(ResultResponse::deleted(id))
            }
            Ok(None) => Err(OuterError::CouldNotDelete { id }.into()),
            Err(err) => {
                if err.is_malformed_id() {
                    log::warn!("Failed to delete issue {}: {}", id, err);
                } else {
                    log::error!("Failed to delete issue {}: {}", id, err);
                }
                Err(OuterError::CouldNotDelete { id }.into())
            }
        }
    }
}

fn request_id(body: &Fields) -> Option<String> {
    body.get(ID)
        .and_then(fields::text)
        .filter(|id| !id.is_empty())
}

/// Supplied updatable fields converted to their stored form. Fails with the
/// name of the first field whose value the field cannot hold.
fn collect_changes(body: &Fields) -> std::result::Result<Document, &'static str> {
    let mut changes = Document::new();
    for field in UPDATABLE_FIELDS {
        let Some(value) = body.get(field).filter(|value| fields::is_supplied(value)) else {
            continue;
        };
        let Some(value) = fields::stored_value(field, value) else {
            return Err(field);
        };
        changes.insert(field, value);
    }
    Ok(changes)
}

/// `updated_on` never precedes `created_on`.
fn update_time(created_on: &str) -> String {
    let now = current_timestamp();
    if now.as_str() < created_on {
        created_on.to_string()
    } else {
        now
    }
}
