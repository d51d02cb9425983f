//! Authentication middleware

use crate::auth::AuthenticatedAdmin;
use crate::server::AppState;
use crate::server::middleware::helpers::{extract_bearer_token, is_public_route, reject};
use crate::utils::error::AdminError;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{HttpMessage, HttpRequest, web};
use futures::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::debug;

/// Runs the authentication guard and attaches the admin to the request
///
/// Public routes pass through untouched. Every other request needs a bearer
/// token for an admin that is still active at the time of the request.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

/// Service implementation for auth middleware
pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if is_public_route(req.path()) {
                return service.call(req).await.map(ServiceResponse::map_into_left_body);
            }

            match authenticate(&req).await {
                Ok(admin) => {
                    debug!(admin_id = admin.id, path = %req.path(), "Admin attached to request");
                    req.extensions_mut().insert(admin);
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                Err(e) => Ok(reject(req, e)),
            }
        })
    }
}

async fn authenticate(req: &ServiceRequest) -> Result<AuthenticatedAdmin, AdminError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| AdminError::internal("Application state not configured"))?;

    state.auth.authenticate(extract_bearer_token(req.headers())).await
}

/// The admin the authentication guard attached to this request
pub fn authenticated_admin(req: &HttpRequest) -> Result<AuthenticatedAdmin, AdminError> {
    req.extensions()
        .get::<AuthenticatedAdmin>()
        .cloned()
        .ok_or(AdminError::MissingToken)
}
