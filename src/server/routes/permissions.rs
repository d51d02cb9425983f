//! Permission catalogue endpoints

use crate::auth::management::CreatePermissionRequest;
use crate::server::middleware::RequirePermission;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde_json::json;

/// Configure permission routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/permissions")
            .route(
                web::get()
                    .to(list_permissions)
                    .wrap(RequirePermission::new("permission", "view")),
            )
            .route(
                web::post()
                    .to(create_permission)
                    .wrap(RequirePermission::new("permission", "create")),
            ),
    );
}

pub async fn list_permissions(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let permissions = state.auth.management().list_permissions().await?;

    Ok(ApiResponse::success("Permissions retrieved successfully", permissions).ok())
}

pub async fn create_permission(
    state: web::Data<AppState>,
    request: web::Json<CreatePermissionRequest>,
) -> ActixResult<HttpResponse> {
    let id = state
        .auth
        .management()
        .create_permission(request.into_inner())
        .await?;

    Ok(
        ApiResponse::success("Permission created successfully", json!({ "permissionId": id }))
            .created(),
    )
}
