//! Authentication endpoints

use crate::server::middleware::authenticated_admin;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::AdminError;
use crate::utils::validation::validate_email;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub email: String,
    pub password: String,
}

/// Configure authentication routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(login))
            .route("/forgot-password", web::post().to(forgot_password))
            .route("/reset-password", web::post().to(reset_password))
            .route("/me", web::get().to(me)),
    );
}

/// Admin login endpoint
pub async fn login(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    validate_email(request.email.trim())?;
    if request.password.is_empty() {
        return Err(AdminError::validation("Password is required").into());
    }

    let ip = req.peer_addr().map(|addr| addr.ip().to_string());
    let outcome = state.auth.login(&request.email, &request.password, ip).await?;

    Ok(ApiResponse::success("Login successful", outcome).ok())
}

/// Start a password reset; the answer is the same whether or not the email is known
pub async fn forgot_password(
    state: web::Data<AppState>,
    request: web::Json<ForgotPasswordRequest>,
) -> ActixResult<HttpResponse> {
    validate_email(request.email.trim())?;
    state.auth.forgot_password(&request.email).await?;

    Ok(ApiResponse::message("If the email exists, a password reset link has been sent").ok())
}

/// Redeem a reset ticket
pub async fn reset_password(
    state: web::Data<AppState>,
    request: web::Json<ResetPasswordRequest>,
) -> ActixResult<HttpResponse> {
    validate_email(request.email.trim())?;
    if request.token.trim().is_empty() {
        return Err(AdminError::validation("Token is required").into());
    }

    state
        .auth
        .reset_password(&request.email, request.token.trim(), &request.password)
        .await?;

    Ok(ApiResponse::message("Password reset successful").ok())
}

/// Profile of the authenticated admin
pub async fn me(state: web::Data<AppState>, req: HttpRequest) -> ActixResult<HttpResponse> {
    let admin = authenticated_admin(&req)?;
    let profile = state.auth.profile(admin).await?;

    Ok(ApiResponse::success("Profile retrieved successfully", profile).ok())
}
