use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// The store file itself is absent. Carries the file name for the message.
    #[error("{0} file not found")]
    StoreMissing(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BadRequest(String),

    /// Form body missing a field or carrying a value of the wrong type.
    #[error("{0}")]
    Unprocessable(String),

    #[error("No medicines available to calculate the average")]
    NoMedicines,

    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store document is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::Unprocessable(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::StoreMissing(_) | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            // Duplicate names are reported as 400, like any other rejected create.
            AppError::Conflict(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NoMedicines => {
                return (StatusCode::OK, Json(json!({ "error": self.to_string() })))
                    .into_response();
            }
            AppError::Io(_) | AppError::Json(_) => {
                error!(error = %self, "Internal store error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
