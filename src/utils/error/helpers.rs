//! Helper functions for creating specific error types

use super::types::AdminError;

impl AdminError {
    pub fn invalid_token<S: Into<String>>(message: S) -> Self {
        Self::InvalidToken(message.into())
    }

    pub fn forbidden<M: Into<String>, A: Into<String>>(module: M, action: A) -> Self {
        Self::Forbidden {
            module: module.into(),
            action: action.into(),
        }
    }

    pub fn authorization_check_failed<S: Into<String>>(message: S) -> Self {
        Self::AuthorizationCheckFailed(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage(message.into())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn crypto<S: Into<String>>(message: S) -> Self {
        Self::Crypto(message.into())
    }

    pub fn email<S: Into<String>>(message: S) -> Self {
        Self::Email(message.into())
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Whether this error is a system fault rather than a decision about the caller
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            Self::AuthorizationCheckFailed(_)
                | Self::Database(_)
                | Self::Storage(_)
                | Self::Jwt(_)
                | Self::Config(_)
                | Self::Crypto(_)
                | Self::Email(_)
                | Self::Timeout(_)
                | Self::Serialization(_)
                | Self::Yaml(_)
                | Self::Io(_)
                | Self::Internal(_)
        )
    }
}
