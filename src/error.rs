use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum PollError {
    #[error("Invalid question: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("Question not found")]
    QuestionNotFound,
    #[error("Option not found")]
    OptionNotFound,
    #[error("Option does not belong to this question")]
    InvalidOption,
    #[error("Already voted on this question from this address")]
    AlreadyVoted,
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} is not valid: {value}")]
    InvalidValue { name: &'static str, value: String },
}

impl IntoResponse for PollError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            PollError::Validation(messages) => {
                let body = Json(json!({
                    "error": "Invalid question",
                    "details": messages,
                }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
            PollError::QuestionNotFound => (StatusCode::NOT_FOUND, "Question not found"),
            PollError::OptionNotFound => (StatusCode::NOT_FOUND, "Option not found"),
            PollError::InvalidOption => (StatusCode::BAD_REQUEST, "Invalid option"),
            PollError::AlreadyVoted => (StatusCode::CONFLICT, "Already voted"),
            PollError::DatabaseError(msg) => {
                error!("database error: {}", msg);
                let body = Json(json!({
                    "error": "Database error",
                    "details": "internal error"
                }));
                return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
            }
        };

        let body = Json(json!({
            "error": error_message,
            "details": self.to_string()
        }));

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for PollError {
    fn from(error: sqlx::Error) -> Self {
        PollError::DatabaseError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_of(err: PollError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn database_errors_hide_driver_messages() {
        let (status, body) = body_of(PollError::DatabaseError(
            "no such table: votes".to_string(),
        ))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["details"], "internal error");
        assert!(!body.to_string().contains("votes"));
    }

    #[tokio::test]
    async fn duplicate_votes_are_conflicts() {
        let (status, body) = body_of(PollError::AlreadyVoted).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Already voted");
    }
}
