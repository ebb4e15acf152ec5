//! Role authorization middleware.
//!
//! Must be wrapped inside `JwtExtract` (registered before it with `.wrap`).
//! Looks up the account for the verified identity and lets the request
//! through only when that account holds the admin role.

use std::rc::Rc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::claims::IdentityClaims;
use crate::auth::gate::authorize_admin;
use crate::error::AppError;
use crate::logging::security;
use crate::state::app_state::AppState;

pub struct RequireAdmin;

impl<S, B> Transform<S, ServiceRequest> for RequireAdmin
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireAdminMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAdminMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireAdminMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireAdminMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            // Running without the credential stage is a wiring bug, never a pass.
            let claims = req
                .extensions()
                .get::<IdentityClaims>()
                .cloned()
                .ok_or_else(|| AppError::internal("role check ran without verified claims"))?;

            let app_state = req
                .app_data::<web::Data<AppState>>()
                .cloned()
                .ok_or_else(|| AppError::internal("AppState not available"))?;

            if let Err(err) = authorize_admin(app_state.store(), &claims).await {
                if err.is_forbidden() {
                    security::role_denied(&claims.email, req.path());
                }
                return Err(err.into());
            }

            service.call(req).await
        })
    }
}
