//! 인증 미들웨어
//!
//! `Authorization: Bearer <jwt>` 헤더가 유효하면 [`AuthenticatedUser`]를 요청 확장에
//! 넣습니다. 헤더가 없거나 토큰이 잘못되어도 요청은 그대로 진행되며,
//! 인증이 필요한 핸들러가 `AuthenticatedUser` 추출자로 401을 반환합니다.
//!
//! [`AuthenticatedUser`]: crate::domain::models::AuthenticatedUser

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::middlewares::auth_inner::AuthMiddlewareService;

#[derive(Debug, Clone, Default)]
pub struct AuthMiddleware;

impl AuthMiddleware {
    pub fn optional() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}
