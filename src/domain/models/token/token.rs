//! JWT 클레임

use serde::{Deserialize, Serialize};

use crate::domain::entities::Role;

/// 액세스 토큰 클레임
///
/// `sub`는 사용자 ObjectId(16진수), `rol`은 발급 시점의 역할입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub rol: Role,
    pub iat: i64,
    pub exp: i64,
}
