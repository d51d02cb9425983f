//! Role management endpoints

use crate::auth::management::{CreateRoleRequest, UpdateRoleRequest};
use crate::server::middleware::RequirePermission;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde_json::json;

/// Configure role routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/roles")
            .route(
                web::get()
                    .to(list_roles)
                    .wrap(RequirePermission::new("role", "view")),
            )
            .route(
                web::post()
                    .to(create_role)
                    .wrap(RequirePermission::new("role", "create")),
            ),
    )
    .service(
        web::resource("/roles/{id}").route(
            web::put()
                .to(update_role)
                .wrap(RequirePermission::new("role", "edit")),
        ),
    );
}

pub async fn list_roles(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let roles = state.auth.management().list_roles().await?;

    Ok(ApiResponse::success("Roles retrieved successfully", roles).ok())
}

pub async fn create_role(
    state: web::Data<AppState>,
    request: web::Json<CreateRoleRequest>,
) -> ActixResult<HttpResponse> {
    let id = state
        .auth
        .management()
        .create_role(request.into_inner())
        .await?;

    Ok(ApiResponse::success("Role created successfully", json!({ "roleId": id })).created())
}

pub async fn update_role(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    request: web::Json<UpdateRoleRequest>,
) -> ActixResult<HttpResponse> {
    state
        .auth
        .management()
        .update_role(path.into_inner(), request.into_inner())
        .await?;

    Ok(ApiResponse::message("Role updated successfully").ok())
}
