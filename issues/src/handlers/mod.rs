use actix_web::{
    web::{Form, Json},
    Either,
};

use crate::service::fields::{self, Fields};

pub mod issue;

/// A JSON object or an urlencoded form. A body that is neither reads as empty.
pub type RequestBody = Option<Either<Json<Fields>, Form<Vec<(String, String)>>>>;

pub fn into_fields(body: RequestBody) -> Fields {
    match body {
        Some(Either::Left(Json(fields))) => fields,
        Some(Either::Right(Form(pairs))) => fields::from_pairs(pairs),
        None => Fields::new(),
    }
}
