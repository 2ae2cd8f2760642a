//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::LocalBoxFuture;

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::models::AuthenticatedUser;
use crate::services::TokenService;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let identity = match req.app_data::<web::Data<AppState>>() {
                Some(state) => extract_user(&req, &state.tokens),
                None => Err(AppError::InternalError("AppState가 등록되지 않았습니다".to_string())),
            };

            match identity {
                Ok(user) => {
                    log::debug!("인증 성공: 사용자 ID {}", user.user_id);
                    req.extensions_mut().insert(user);
                }
                Err(err) => log::debug!("익명 요청으로 진행: {}", err),
            }

            service.call(req).await
        })
    }
}

/// 요청에서 JWT 토큰을 추출하고 검증
fn extract_user(req: &ServiceRequest, tokens: &TokenService) -> Result<AuthenticatedUser, AppError> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Authorization 헤더가 없습니다".to_string()))?;

    let token = tokens.extract_bearer_token(auth_header)?;
    let claims = tokens.verify_token(token)?;

    Ok(AuthenticatedUser {
        user_id: claims.sub,
        rol: claims.rol,
    })
}
