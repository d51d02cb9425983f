//! Authorization middleware

use crate::auth::AuthenticatedAdmin;
use crate::auth::rbac::Capability;
use crate::server::AppState;
use crate::utils::error::AdminError;
use super::helpers::reject;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{HttpMessage, web};
use futures::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;

/// Requires one capability of the admin attached by [`super::AuthMiddleware`]
///
/// The check runs before the handler, so a denied or failed check leaves no
/// side effects behind.
#[derive(Debug, Clone)]
pub struct RequirePermission {
    capability: Rc<Capability>,
}

impl RequirePermission {
    pub fn new(module: &str, action: &str) -> Self {
        Self {
            capability: Rc::new(Capability::new(module, action)),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequirePermission
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequirePermissionService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequirePermissionService {
            service: Rc::new(service),
            capability: Rc::clone(&self.capability),
        }))
    }
}

/// Service implementation for the permission middleware
pub struct RequirePermissionService<S> {
    service: Rc<S>,
    capability: Rc<Capability>,
}

impl<S, B> Service<ServiceRequest> for RequirePermissionService<S>
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
        let capability = Rc::clone(&self.capability);

        Box::pin(async move {
            match authorize(&req, &capability).await {
                Ok(()) => service.call(req).await.map(ServiceResponse::map_into_left_body),
                Err(e) => Ok(reject(req, e)),
            }
        })
    }
}

async fn authorize(req: &ServiceRequest, capability: &Capability) -> Result<(), AdminError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| AdminError::internal("Application state not configured"))?;

    let admin = req
        .extensions()
        .get::<AuthenticatedAdmin>()
        .cloned()
        .ok_or(AdminError::MissingToken)?;

    state.auth.authorize(&admin, capability).await?;
    Ok(())
}
