//! # 인증 서비스
//!
//! 로그인, 회원 가입, 현재 사용자 조회를 처리합니다.
//! 계정 저장과 비밀번호 검증은 [`UserService`]에, 토큰 발급은
//! [`TokenService`]에 위임합니다.

use std::sync::Arc;

use validator::Validate;

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
use crate::domain::models::AuthenticatedUser;
use crate::services::auth::TokenService;
use crate::services::users::UserService;

pub const USER_ALREADY_EXISTS: &str = "El usuario ya existe";

pub struct AuthService {
    users: Arc<UserService>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(users: Arc<UserService>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        request.validate()?;

        let user = self.users.verify_credentials(&request.correo, &request.password).await?;
        let token = self.tokens.generate_token(&user)?;

        log::info!("🔑 로그인 성공: {}", user.correo_institucional);
        Ok(AuthResponse {
            user: UserResponse::from(user),
            token,
        })
    }

    /// 문서 번호 또는 이메일이 이미 등록되어 있으면 400입니다.
    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        request.validate()?;

        if self.users.exists(&request).await? {
            return Err(AppError::ValidationError(USER_ALREADY_EXISTS.to_string()));
        }

        let user = self.users.create(request).await?;
        let token = self.tokens.issue(&user.id, user.rol)?;

        Ok(AuthResponse { user, token })
    }

    pub async fn profile(&self, caller: &AuthenticatedUser) -> AppResult<UserResponse> {
        let id = caller.object_id()?;
        self.users
            .find_entity(&id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))
    }
}
