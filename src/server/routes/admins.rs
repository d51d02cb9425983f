//! Admin management endpoints

use crate::auth::management::{AdminListQuery, CreateAdminRequest, UpdateAdminRequest};
use crate::server::middleware::{RequirePermission, authenticated_admin};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde_json::json;

/// Configure admin routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/admins")
            .route(
                web::get()
                    .to(list_admins)
                    .wrap(RequirePermission::new("admin", "view")),
            )
            .route(
                web::post()
                    .to(create_admin)
                    .wrap(RequirePermission::new("admin", "create")),
            ),
    )
    .service(
        web::resource("/admins/{id}")
            .route(
                web::get()
                    .to(get_admin)
                    .wrap(RequirePermission::new("admin", "view")),
            )
            .route(
                web::put()
                    .to(update_admin)
                    .wrap(RequirePermission::new("admin", "edit")),
            )
            .route(
                web::delete()
                    .to(delete_admin)
                    .wrap(RequirePermission::new("admin", "delete")),
            ),
    );
}

pub async fn list_admins(
    state: web::Data<AppState>,
    query: web::Query<AdminListQuery>,
) -> ActixResult<HttpResponse> {
    let listing = state
        .auth
        .management()
        .list_admins(query.into_inner())
        .await?;

    Ok(ApiResponse::success("Admins retrieved successfully", listing).ok())
}

pub async fn create_admin(
    state: web::Data<AppState>,
    request: web::Json<CreateAdminRequest>,
) -> ActixResult<HttpResponse> {
    let id = state
        .auth
        .management()
        .create_admin(request.into_inner())
        .await?;

    Ok(ApiResponse::success("Admin created successfully", json!({ "adminId": id })).created())
}

pub async fn get_admin(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> ActixResult<HttpResponse> {
    let admin = state.auth.management().get_admin(path.into_inner()).await?;

    Ok(ApiResponse::success("Admin retrieved successfully", admin).ok())
}

pub async fn update_admin(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    request: web::Json<UpdateAdminRequest>,
) -> ActixResult<HttpResponse> {
    state
        .auth
        .management()
        .update_admin(path.into_inner(), request.into_inner())
        .await?;

    Ok(ApiResponse::message("Admin updated successfully").ok())
}

pub async fn delete_admin(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> ActixResult<HttpResponse> {
    let actor = authenticated_admin(&req)?;
    state
        .auth
        .management()
        .delete_admin(path.into_inner(), actor.id)
        .await?;

    Ok(ApiResponse::message("Admin deleted successfully").ok())
}
