//! Helper functions for middleware

use crate::auth::jwt::JwtHandler;
use crate::utils::error::AdminError;
use actix_web::body::EitherBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::ErrorHandlerResponse;
use actix_web::{HttpResponse, ResponseError};
use actix_web::http::header::{AUTHORIZATION, HeaderMap};

/// Token from an `Authorization: Bearer <token>` header
///
/// A missing header, a non-UTF-8 value or another scheme all yield `None`.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(JwtHandler::extract_token_from_header)
}

/// Check if a route is public (doesn't require authentication)
pub fn is_public_route(path: &str) -> bool {
    const PUBLIC_ROUTES: &[&str] = &[
        "/health",
        "/api/auth/login",
        "/api/auth/forgot-password",
        "/api/auth/reset-password",
    ];

    PUBLIC_ROUTES.contains(&path)
}

/// Answer the request with the error's JSON body instead of calling the inner service
pub(super) fn reject<B>(req: ServiceRequest, error: AdminError) -> ServiceResponse<EitherBody<B>> {
    let response = HttpResponse::from_error(error);
    req.into_response(response).map_into_right_body()
}

/// Error handler that rebuilds `AdminError` responses with the internal error text
///
/// Other error responses pass through untouched.
pub fn with_error_details<B>(
    res: ServiceResponse<B>,
) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let detailed = res
        .response()
        .error()
        .and_then(|error| error.as_error::<AdminError>())
        .map(|error| HttpResponse::build(error.status_code()).json(error.to_body(true)));

    let res = match detailed {
        Some(response) => {
            let (req, _) = res.into_parts();
            ServiceResponse::new(req, response).map_into_right_body()
        }
        None => res.map_into_left_body(),
    };
    Ok(ErrorHandlerResponse::Response(res))
}
