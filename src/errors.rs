use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildingGraphError {
    #[error("connection error: {0}")]
    ConnectionError(String),
    #[error("schema error: {0}")]
    SchemaError(String),
    #[error("query error: {0}")]
    QueryError(String),
    #[error("element not found: {0}")]
    NotFound(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("graph integrity violation: {0}")]
    GraphIntegrity(String),
    #[error("load error: {0}")]
    LoadError(String),
}

impl BuildingGraphError {
    pub fn connection<T: Into<String>>(msg: T) -> Self {
        BuildingGraphError::ConnectionError(msg.into())
    }

    pub fn schema<T: Into<String>>(msg: T) -> Self {
        BuildingGraphError::SchemaError(msg.into())
    }

    pub fn query<T: Into<String>>(msg: T) -> Self {
        BuildingGraphError::QueryError(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        BuildingGraphError::NotFound(msg.into())
    }

    pub fn invalid_argument<T: Into<String>>(msg: T) -> Self {
        BuildingGraphError::InvalidArgument(msg.into())
    }

    pub fn integrity<T: Into<String>>(msg: T) -> Self {
        BuildingGraphError::GraphIntegrity(msg.into())
    }

    pub fn load<T: Into<String>>(msg: T) -> Self {
        BuildingGraphError::LoadError(msg.into())
    }
}
