use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const PROJECT_NAME: &str = "project_name";
pub const ISSUE_TITLE: &str = "issue_title";
pub const ISSUE_TEXT: &str = "issue_text";
pub const CREATED_BY: &str = "created_by";
pub const ASSIGNED_TO: &str = "assigned_to";
pub const STATUS_TEXT: &str = "status_text";
pub const OPEN: &str = "open";
pub const CREATED_ON: &str = "created_on";
pub const UPDATED_ON: &str = "updated_on";
pub const ID: &str = "_id";

/// Fields a client may change through a partial update, in merge order.
pub const UPDATABLE_FIELDS: [&str; 6] = [
    ISSUE_TITLE,
    ISSUE_TEXT,
    CREATED_BY,
    ASSIGNED_TO,
    STATUS_TEXT,
    OPEN,
];

fn default_open() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[aliases(PublicIssue = Issue<String>)]
pub struct Issue<Id> {
    #[serde(rename = "_id")]
    pub id: Id,
    pub issue_title: String,
    pub issue_text: String,
    pub created_on: String,
    pub updated_on: String,
    pub created_by: String,
    #[serde(default)]
    pub assigned_to: String,
    #[serde(default = "default_open")]
    pub open: bool,
    #[serde(default)]
    pub status_text: String,
    pub project_name: String,
}

impl Issue<ObjectId> {
    pub fn stringify(self) -> Issue<String> {
        Issue {
            id: self.id.to_hex(),
            issue_title: self.issue_title,
            issue_text: self.issue_text,
            created_on: self.created_on,
            updated_on: self.updated_on,
            created_by: self.created_by,
            assigned_to: self.assigned_to,
            open: self.open,
            status_text: self.status_text,
            project_name: self.project_name,
        }
    }

    pub fn stringify_map(issues: Vec<Self>) -> Vec<Issue<String>> {
        issues.into_iter().map(Issue::stringify).collect()
    }
}

/// An issue before the record store has assigned it an identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewIssue {
    pub project_name: String,
    pub issue_title: String,
    pub issue_text: String,
    pub created_by: String,
    pub assigned_to: String,
    pub status_text: String,
    pub open: bool,
    pub created_on: String,
    pub updated_on: String,
}

impl NewIssue {
    pub fn with_id<Id>(self, id: Id) -> Issue<Id> {
        Issue {
            id,
            issue_title: self.issue_title,
            issue_text: self.issue_text,
            created_on: self.created_on,
            updated_on: self.updated_on,
            created_by: self.created_by,
            assigned_to: self.assigned_to,
            open: self.open,
            status_text: self.status_text,
            project_name: self.project_name,
        }
    }
}
