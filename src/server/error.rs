use super::types::ErrorResponse;
use crate::Error;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{error, warn};

impl Error {
    /// HTTP status and body this error is answered with.
    pub fn to_response_parts(&self) -> (StatusCode, ErrorResponse) {
        let (status, error, details) = match self {
            Error::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            Error::MissingApiKey => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string(), None),
            Error::Upstream { status, message } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                message.clone(),
                None,
            ),
            Error::Network(e) => (
                StatusCode::BAD_GATEWAY,
                "Failed to reach completion API".to_string(),
                Some(e.to_string()),
            ),
            Error::EmptyCompletion => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string(), None),
            Error::MalformedCompletion { details, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to parse model response".to_string(),
                Some(details.clone()),
            ),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
                Some(other.to_string()),
            ),
        };

        (status, ErrorResponse { error, details })
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, body) = self.to_response_parts();

        if status.is_server_error() {
            error!("Request failed with {}: {}", status, self);
        } else {
            warn!("Request rejected with {}: {}", status, self);
        }

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::invalid_input(format!("Invalid request body: {}", rejection.body_text()))
    }
}
