//! HTTP error type for the web server.
//!
//! Maps domain errors into HTTP responses. Every variant produces a JSON
//! body with a machine-readable `error` field and a human-readable `message`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use researchai_assistant::ConversationError;
use researchai_common::error::ResearchError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Client sent invalid input.
    #[error("{0}")]
    BadRequest(String),
    /// Requested record or page does not exist.
    #[error("{0}")]
    NotFound(String),
    /// The target is in a state that rejects the action (e.g. a closed chat).
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "conflict",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        let body = ErrorBody { error: self.kind(), message: self.to_string() };
        (status, axum::Json(body)).into_response()
    }
}

impl From<ResearchError> for ApiError {
    fn from(err: ResearchError) -> Self {
        match err {
            ResearchError::Validation(msg) => Self::BadRequest(msg),
            ResearchError::NotFound(msg) => Self::NotFound(msg),
            ResearchError::Serialization(err) => Self::Internal(err.to_string()),
        }
    }
}

impl From<ConversationError> for ApiError {
    fn from(err: ConversationError) -> Self {
        match err {
            ConversationError::EmptyMessage => Self::BadRequest(err.to_string()),
            ConversationError::Closed => Self::Conflict(err.to_string()),
        }
    }
}

impl From<minijinja::Error> for ApiError {
    fn from(err: minijinja::Error) -> Self {
        Self::Internal(format!("template error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_research_errors_map_to_status() {
        let cases = [
            (ResearchError::Validation("title is required".into()), StatusCode::BAD_REQUEST),
            (ResearchError::NotFound("reference 9".into()), StatusCode::NOT_FOUND),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }

        let broken = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ApiError::from(ResearchError::from(broken));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_conversation_errors() {
        assert_eq!(ApiError::from(ConversationError::EmptyMessage).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(ConversationError::Closed).status(), StatusCode::CONFLICT);
    }
}
