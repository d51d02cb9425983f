//! Core JWT handler implementation

use super::types::{Claims, JwtHandler, TokenIdentity};
use crate::config::AuthConfig;
use crate::utils::current_timestamp;
use crate::utils::error::{AdminError, Result};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;
use uuid::Uuid;

impl JwtHandler {
    /// Create a new JWT handler
    pub fn new(config: &AuthConfig) -> Result<Self> {
        if config.jwt_secret.is_empty() {
            return Err(AdminError::config("JWT secret must not be empty"));
        }
        let secret = config.jwt_secret.as_bytes();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            expiration: config.jwt_expiration,
            issuer: config.jwt_issuer.clone(),
        })
    }

    /// Issue a session token valid for the configured lifetime
    pub fn issue(&self, identity: &TokenIdentity) -> Result<String> {
        self.issue_at(identity, current_timestamp())
    }

    /// Issue a token as if it had been created at `issued_at` (unix seconds)
    pub(crate) fn issue_at(&self, identity: &TokenIdentity, issued_at: u64) -> Result<String> {
        let claims = Claims {
            admin_id: identity.admin_id,
            email: identity.email.clone(),
            is_super_admin: identity.is_super_admin,
            iat: issued_at,
            exp: issued_at + self.expiration,
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        let header = Header::new(self.algorithm);
        let token = encode(&header, &claims, &self.encoding_key).map_err(AdminError::Jwt)?;

        debug!("Issued session token for admin: {}", identity.admin_id);
        Ok(token)
    }

    /// Verify signature, issuer and expiry
    ///
    /// Any failure is reported as `InvalidToken`; the reason is kept for logs.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iat", "iss"]);
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            debug!("JWT verification failed: {}", e);
            AdminError::invalid_token(e.to_string())
        })?;

        Ok(token_data.claims)
    }
}
