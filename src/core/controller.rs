use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use sqlx::SqlitePool;
use crate::core::command::CommandError;
use crate::core::domain::Configuration;
use crate::core::library::LibraryError;

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Configuration,
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(config: Configuration, pool: SqlitePool) -> AppState {
        AppState {
            config,
            pool,
        }
    }
}

// ServerError is the only place where error kinds become HTTP statuses
#[derive(Debug, PartialEq)]
pub struct ServerError {
    pub status: StatusCode,
    pub message: String,
}

impl ServerError {
    pub fn new(status: StatusCode, message: &str) -> Self {
        ServerError { status, message: message.to_string() }
    }
}

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    ServerError::new(StatusCode::BAD_REQUEST, format!("{}", err).as_str())
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Database { .. } | CommandError::Runtime { .. } => {
                tracing::error!(error = ?err, "request failed");
                ServerError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            CommandError::DuplicateKey { .. } => {
                ServerError::new(StatusCode::BAD_REQUEST, err.message())
            }
            CommandError::NotFound { .. } => {
                ServerError::new(StatusCode::NOT_FOUND, err.message())
            }
            CommandError::Serialization { .. } => {
                ServerError::new(StatusCode::BAD_REQUEST, err.message())
            }
            CommandError::Validation { .. } => {
                ServerError::new(StatusCode::BAD_REQUEST, err.message())
            }
        }
    }
}

impl From<LibraryError> for ServerError {
    fn from(err: LibraryError) -> Self {
        ServerError::from(CommandError::from(err))
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": {
                "message": self.message,
                "status": self.status.as_u16(),
            }
        });
        (self.status, Json(body)).into_response()
    }
}
