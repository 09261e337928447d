pub mod config;
pub mod error;
pub mod handlers;
pub mod repositories;
pub mod service;

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::ServiceFactory;
use actix_web::dev::ServiceRequest;
use actix_web::dev::ServiceResponse;
use actix_web::middleware;
use actix_web::web;
use actix_web::App;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::repository::test_repository::TestRepository;
pub use handlers::issue::*;
use repositories::issue::IssueRepo;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::issue::get_issues,
        handlers::issue::post_issue,
        handlers::issue::put_issue,
        handlers::issue::delete_issue,
    ),
    components(schemas(
        handlers::issue::PostIssueRequest,
        handlers::issue::PutIssueRequest,
        handlers::issue::DeleteIssueRequest,
        service::issue::ResultResponse,
        error::ErrorResponse,
        common::entities::issue::PublicIssue
    ))
)]
pub struct IssuesServiceDoc;

pub fn create_app(
    issue_repo: IssueRepo,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<impl MessageBody>,
        Config = (),
        InitError = (),
        Error = actix_web::Error,
    >,
> {
    let cors = Cors::permissive();
    let app = App::new()
        .wrap(cors)
        .wrap(middleware::Logger::default())
        .app_data(web::Data::new(issue_repo))
        .service(get_issues)
        .service(post_issue)
        .service(put_issue)
        .service(delete_issue)
        .service(
            SwaggerUi::new("/swagger-ui/{_:.*}")
                .url("/api-docs/openapi.json", IssuesServiceDoc::openapi()),
        );
    app
}

pub fn create_test_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<impl MessageBody>,
        Config = (),
        InitError = (),
        Error = actix_web::Error,
    >,
> {
    create_app(IssueRepo::new(TestRepository::new()))
}

#[cfg(test)]
mod tests {
    use actix_web::test::{self, init_service};
    use serde_json::Value;

    use super::*;

    #[actix_web::test]
    async fn openapi_document_lists_issue_routes() {
        let app = init_service(create_test_app()).await;
        let req = test::TestRequest::get()
            .uri("/api-docs/openapi.json")
            .to_request();
        let doc: Value = test::call_and_read_body_json(&app, req).await;
        assert!(doc["paths"]["/api/issues/{project}"]["get"].is_object());
        assert!(doc["paths"]["/api/issues/{project}"]["delete"].is_object());
    }
}
