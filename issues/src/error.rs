use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use common::inner_error::InnerError;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Display, Error)]
pub enum Error {
    Inner(InnerError),
    Outer(OuterError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Client-correctable outcomes. They travel as a `200 OK` body, never as a
/// transport status.
#[derive(Debug, Display, Error)]
pub enum OuterError {
    #[display(fmt = "required field(s) missing")]
    RequiredFieldsMissing,
    #[display(fmt = "post failed")]
    PostFailed(InnerError),
    #[display(fmt = "missing _id")]
    MissingId,
    #[display(fmt = "no update field(s) sent")]
    NoUpdateFields { id: String },
    #[display(fmt = "could not update")]
    CouldNotUpdate { id: String },
    #[display(fmt = "could not delete")]
    CouldNotDelete { id: String },
}

impl OuterError {
    pub fn id(&self) -> Option<&str> {
        match self {
            OuterError::NoUpdateFields { id }
            | OuterError::CouldNotUpdate { id }
            | OuterError::CouldNotDelete { id } => Some(id),
            OuterError::RequiredFieldsMissing
            | OuterError::PostFailed(_)
            | OuterError::MissingId => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl From<InnerError> for Error {
    fn from(value: InnerError) -> Self {
        Error::Inner(value)
    }
}

impl From<OuterError> for Error {
    fn from(value: OuterError) -> Self {
        Error::Outer(value)
    }
}

impl ResponseError for Error {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            Error::Inner(_) => ErrorResponse {
                error: "Internal server error".to_string(),
                id: None,
            },
            Error::Outer(err) => ErrorResponse {
                error: err.to_string(),
                id: err.id().map(str::to_string),
            },
        };
        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            Error::Inner(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Outer(_) => StatusCode::OK,
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;

    use super::*;

    async fn body_of(err: Error) -> (StatusCode, serde_json::Value) {
        let response = err.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn business_errors_are_ok_status_with_exact_message() {
        let (status, body) = body_of(OuterError::MissingId.into()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"error": "missing _id"}));

        let (status, body) = body_of(
            OuterError::CouldNotDelete {
                id: "abc".to_string(),
            }
            .into(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({"error": "could not delete", "_id": "abc"})
        );
    }

    #[actix_web::test]
    async fn post_failure_hides_its_cause() {
        let cause = InnerError::Store("connection reset".to_string());
        let (status, body) = body_of(OuterError::PostFailed(cause).into()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"error": "post failed"}));
    }

    #[actix_web::test]
    async fn store_errors_are_internal() {
        let err: Error = InnerError::Store("down".to_string()).into();
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({"error": "Internal server error"}));
    }
}
