//! HTTP response handling for errors

use super::types::AdminError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

/// Standard error response format
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AdminError {
    /// Message safe to show to any client
    pub fn public_message(&self) -> String {
        match self {
            AdminError::MissingToken => "Access token required".to_string(),
            AdminError::InvalidToken(_) => "Invalid token".to_string(),
            AdminError::Forbidden { .. } => "Insufficient permissions".to_string(),
            AdminError::AuthorizationCheckFailed(_) => "Permission check failed".to_string(),
            AdminError::InvalidCredentials => "Invalid credentials".to_string(),
            AdminError::InvalidOrExpiredToken => "Invalid or expired reset token".to_string(),
            AdminError::NotFound(message)
            | AdminError::Conflict(message)
            | AdminError::Validation(message)
            | AdminError::BadRequest(message) => message.clone(),
            AdminError::Timeout(_) => "Request timed out".to_string(),
            _ => "Internal server error".to_string(),
        }
    }

    /// Build the JSON body, optionally carrying the internal error text
    pub fn to_body(&self, with_details: bool) -> ErrorBody {
        ErrorBody {
            success: false,
            message: self.public_message(),
            error: with_details.then(|| self.to_string()),
        }
    }
}

impl ResponseError for AdminError {
    fn status_code(&self) -> StatusCode {
        match self {
            AdminError::MissingToken
            | AdminError::InvalidToken(_)
            | AdminError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AdminError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AdminError::InvalidOrExpiredToken
            | AdminError::Validation(_)
            | AdminError::BadRequest(_)
            | AdminError::Conflict(_) => StatusCode::BAD_REQUEST,
            AdminError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Public body only; development servers add details in `with_error_details`
    fn error_response(&self) -> HttpResponse {
        let body = self.to_body(false);
        HttpResponse::build(self.status_code()).json(body)
    }
}
