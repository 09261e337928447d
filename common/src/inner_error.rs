use derive_more::{Display, Error};

#[derive(Debug, Display, Error)]
pub enum InnerError {
    MongoError(mongodb::error::Error),
    SerializeError(mongodb::bson::ser::Error),
    DeserializeError(mongodb::bson::de::Error),
    #[display(fmt = "Malformed identifier: {}", _0)]
    MalformedId(#[error(not(source))] String),
    #[display(fmt = "Record store failure: {}", _0)]
    Store(#[error(not(source))] String),
}

impl InnerError {
    pub fn is_malformed_id(&self) -> bool {
        matches!(self, InnerError::MalformedId(_))
    }
}

impl From<mongodb::error::Error> for InnerError {
    fn from(err: mongodb::error::Error) -> Self {
        InnerError::MongoError(err)
    }
}

impl From<mongodb::bson::ser::Error> for InnerError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        InnerError::SerializeError(err)
    }
}

impl From<mongodb::bson::de::Error> for InnerError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        InnerError::DeserializeError(err)
    }
}

pub type Result<T> = std::result::Result<T, InnerError>;
