use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Could not reach the OpenAI API: {0}. Check network connectivity and proxy/firewall settings")]
    BackendUnavailable(String),

    #[error("OpenAI rejected the API key. Check the OPENAI_API_KEY environment variable")]
    AuthenticationError,

    #[error("Model '{0}' was not found. Check the OPENAI_MODEL setting")]
    ModelNotFound(String),

    #[error("The model returned an empty answer. The completion token budget may be too small to hold the quiz schema")]
    EmptyResponse,

    #[error("OpenAI API error (status {status}): {body}")]
    GenerationError { status: u16, body: String },

    #[error("The model output did not decode into a quiz: {raw}")]
    MalformedQuiz { raw: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Failed to load the video catalog: {0}")]
    CatalogError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::BackendUnavailable(_) => "BACKEND_UNAVAILABLE",
            AppError::AuthenticationError => "AUTHENTICATION_ERROR",
            AppError::ModelNotFound(_) => "MODEL_NOT_FOUND",
            AppError::EmptyResponse => "EMPTY_RESPONSE",
            AppError::GenerationError { .. } => "GENERATION_ERROR",
            AppError::MalformedQuiz { .. } => "MALFORMED_QUIZ",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::CatalogError(_) => "CATALOG_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BackendUnavailable(_)
            | AppError::GenerationError { .. }
            | AppError::EmptyResponse
            | AppError::MalformedQuiz { .. } => StatusCode::BAD_GATEWAY,
            AppError::AuthenticationError | AppError::ModelNotFound(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::CatalogError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.status_code().as_u16(),
        })
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::CatalogError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
