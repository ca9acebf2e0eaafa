//! HTTP mapping for [`DesklineError`]
//!
//! Handlers return `Result<_, DesklineError>` and this impl turns each
//! error kind into a status code and a JSON body. The mapping is purely
//! mechanical; no handler inspects error contents to pick a code.

use crate::error::DesklineError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

impl DesklineError {
    /// The status code this error maps to at the HTTP boundary.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::TicketNotFound { .. } | Self::UnknownDepartment { .. } => StatusCode::NOT_FOUND,
            Self::InvalidTransition { .. } | Self::DuplicateTicket { .. } => StatusCode::CONFLICT,
            Self::SequenceExhausted { .. } | Self::InvalidRequest { .. } => {
                StatusCode::BAD_REQUEST
            },
            Self::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Config { .. } | Self::Io(_) | Self::Custom(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }
}

impl IntoResponse for DesklineError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "request failed");
        }

        // Rejected transitions carry the observed state so staff consoles
        // can refresh the stale row instead of guessing.
        let body = match &self {
            Self::InvalidTransition { state, .. } => json!({
                "error": self.user_message(),
                "state": state,
            }),
            _ => json!({ "error": self.user_message() }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Department, TicketState};

    #[test]
    fn test_status_codes_per_kind() {
        let cases = [
            (
                DesklineError::TicketNotFound {
                    id: "x".to_string(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                DesklineError::UnknownDepartment {
                    value: "registrar".to_string(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                DesklineError::InvalidTransition {
                    action: "call",
                    state: TicketState::Completed,
                },
                StatusCode::CONFLICT,
            ),
            (
                DesklineError::DuplicateTicket {
                    id: "x".to_string(),
                },
                StatusCode::CONFLICT,
            ),
            (
                DesklineError::SequenceExhausted {
                    department: Department::Dean,
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                DesklineError::InvalidRequest {
                    reason: "bad".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                DesklineError::StoreUnavailable {
                    reason: "poisoned".to_string(),
                },
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.status_code(), expected, "{err}");
        }
    }
}
