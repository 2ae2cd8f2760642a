//! 인증된 사용자 정보
//!
//! `AuthMiddleware`가 유효한 Bearer 토큰을 확인하면 요청 확장(extensions)에
//! [`AuthenticatedUser`]를 넣어 둡니다. 인증이 필요한 핸들러는 이 타입을
//! 인자로 받기만 하면 되고, 토큰이 없거나 유효하지 않으면 401이 반환됩니다.
//!
//! ```rust,ignore
//! #[post("")]
//! pub async fn create_guide(
//!     state: web::Data<AppState>,
//!     caller: AuthenticatedUser,
//!     payload: web::Json<CreateGuideRequest>,
//! ) -> Result<HttpResponse, AppError> { ... }
//! ```

use std::future::{ready, Ready};

use actix_web::{FromRequest, HttpMessage, HttpRequest};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::core::errors::{parse_object_id, AppError, AppResult};
use crate::domain::entities::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub rol: Role,
}

impl AuthenticatedUser {
    pub fn object_id(&self) -> AppResult<ObjectId> {
        parse_object_id(&self.user_id)
            .map_err(|_| AppError::AuthenticationError("Token no válido".to_string()))
    }

    pub fn has_role(&self, rol: Role) -> bool {
        self.rol == rol
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "No hay token, autorización denegada".to_string(),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_missing_identity_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        let result = AuthenticatedUser::extract(&req).await;
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[actix_web::test]
    async fn test_identity_from_extensions() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(AuthenticatedUser {
            user_id: ObjectId::new().to_hex(),
            rol: Role::Admin,
        });

        let user = AuthenticatedUser::extract(&req).await.unwrap();
        assert!(user.has_role(Role::Admin));
        assert!(user.object_id().is_ok());
    }
}
