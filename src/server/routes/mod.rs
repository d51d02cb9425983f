//! HTTP route modules
//!
//! Everything below `/api` runs behind [`AuthMiddleware`]; the login and
//! password reset endpoints are listed as public routes and pass through it.

pub mod admins;
pub mod auth;
pub mod permissions;
pub mod roles;

use crate::server::middleware::AuthMiddleware;
use actix_web::{HttpResponse, web};
use serde::Serialize;

/// Standard API response structure
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Human-readable outcome
    pub message: String,
    /// Response data (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Create a successful response carrying data
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// 200 with this body
    pub fn ok(self) -> HttpResponse {
        HttpResponse::Ok().json(self)
    }

    /// 201 with this body
    pub fn created(self) -> HttpResponse {
        HttpResponse::Created().json(self)
    }
}

impl ApiResponse<()> {
    /// Create a successful response without data
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

/// Configure all `/api` routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .wrap(AuthMiddleware)
            .configure(auth::configure_routes)
            .service(
                web::scope("/admin")
                    .configure(admins::configure_routes)
                    .configure(roles::configure_routes)
                    .configure(permissions::configure_routes),
            ),
    );
}
