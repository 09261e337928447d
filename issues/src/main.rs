use actix_web::HttpServer;
use mongodb::bson::oid::ObjectId;

use common::{
    entities::issue::{Issue, PROJECT_NAME},
    repository::mongo_repository::MongoRepository,
    verification::verify,
};
use issues::{config::Config, create_app, repositories::issue::IssueRepo};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;

    let issue_repo: MongoRepository<Issue<ObjectId>> =
        MongoRepository::new(&config.mongo_uri, &config.database, &config.collection).await?;

    verify(&issue_repo.collection, false).await?;
    issue_repo.ensure_index(PROJECT_NAME).await?;

    let issue_repo = IssueRepo::new(issue_repo);

    log::info!("Issue service listening on {}:{}", config.host, config.port);
    HttpServer::new(move || create_app(issue_repo.clone()))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await?;

    Ok(())
}
