use actix_web::{
    delete, get, post, put,
    web::{self, Json},
};
use common::entities::issue::{Issue, PublicIssue};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{ErrorResponse, Result},
    handlers::{into_fields, RequestBody},
    repositories::issue::IssueRepo,
    service::issue::{IssueService, ResultResponse},
};

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PostIssueRequest {
    pub issue_title: String,
    pub issue_text: String,
    pub created_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PutIssueRequest {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct DeleteIssueRequest {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[utoipa::path(
    params(
        ("project" = String, Path, description = "Project name"),
    ),
    responses(
        (status = 200, body = [PublicIssue]),
        (status = 500, body = ErrorResponse)
    )
)]
#[get("/api/issues/{project}")]
pub async fn get_issues(
    project: web::Path<String>,
    query: web::Query<Vec<(String, String)>>,
    repo: web::Data<IssueRepo>,
) -> Result<Json<Vec<Issue<String>>>> {
    let issues = IssueService::new(repo.get_ref().clone())
        .list(&project, query.into_inner())
        .await?;
    Ok(Json(issues))
}

#[utoipa::path(
    params(
        ("project" = String, Path, description = "Project name"),
    ),
    request_body(
        content = PostIssueRequest
    ),
    responses(
        (status = 200, description = "Created issue, or an `error` payload", body = PublicIssue)
    )
)]
#[post("/api/issues/{project}")]
pub async fn post_issue(
    project: web::Path<String>,
    body: RequestBody,
    repo: web::Data<IssueRepo>,
) -> Result<Json<Issue<String>>> {
    let issue = IssueService::new(repo.get_ref().clone())
        .create(&project, &into_fields(body))
        .await?;
    Ok(Json(issue))
}

#[utoipa::path(
    params(
        ("project" = String, Path, description = "Project name"),
    ),
    request_body(
        content = PutIssueRequest
    ),
    responses(
        (status = 200, description = "Result, or an `error` payload echoing `_id`", body = ResultResponse)
    )
)]
#[put("/api/issues/{project}")]
pub async fn put_issue(
    body: RequestBody,
    repo: web::Data<IssueRepo>,
) -> Result<Json<ResultResponse>> {
    let result = IssueService::new(repo.get_ref().clone())
        .change(&into_fields(body))
        .await?;
    Ok(Json(result))
}

#[utoipa::path(
    params(
        ("project" = String, Path, description = "Project name"),
    ),
    request_body(
        content = DeleteIssueRequest
    ),
    responses(
        (status = 200, description = "Result, or an `error` payload echoing `_id`", body = ResultResponse)
    )
)]
#[delete("/api/issues/{project}")]
pub async fn delete_issue(
    body: RequestBody,
    repo: web::Data<IssueRepo>,
) -> Result<Json<ResultResponse>> {
    let result = IssueService::new(repo.get_ref().clone())
        .delete(&into_fields(body))
        .await?;
    Ok(Json(result))
}
