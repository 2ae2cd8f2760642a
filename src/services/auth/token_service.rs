//! # JWT 토큰 서비스
//!
//! HS256 서명 액세스 토큰을 발급하고 검증합니다. 서명 키와 만료 시간은
//! 생성 시 주입되므로 테스트에서는 고정 값을 사용할 수 있습니다.
//!
//! ```rust,ignore
//! let tokens = TokenService::new(JwtConfig::secret(), JwtConfig::expiration_hours());
//! let token = tokens.generate_token(&user)?;
//! let claims = tokens.verify_token(&token)?;
//! assert_eq!(claims.sub, user.id_string().unwrap());
//! ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};

use crate::config::JwtConfig;
use crate::core::errors::AppError;
use crate::domain::entities::{Role, User};
use crate::domain::models::TokenClaims;

pub struct TokenService {
    secret: String,
    expiration_hours: i64,
}

impl TokenService {
    pub fn new(secret: impl Into<String>, expiration_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }

    /// 환경 변수(`JWT_SECRET`, `JWT_EXPIRATION_HOURS`)로 생성
    pub fn from_env() -> Self {
        Self::new(JwtConfig::secret(), JwtConfig::expiration_hours())
    }

    pub fn generate_token(&self, user: &User) -> Result<String, AppError> {
        let user_id = user.id_string().ok_or_else(|| {
            AppError::InternalError("사용자 ID가 없습니다".to_string())
        })?;
        self.issue(&user_id, user.rol)
    }

    /// `sub`와 `rol`로 토큰을 발급합니다.
    pub fn issue(&self, user_id: &str, rol: Role) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::hours(self.expiration_hours);

        let claims = TokenClaims {
            sub: user_id.to_string(),
            rol,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_ref());

        encode(&Header::default(), &claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_ref());

        decode::<TokenClaims>(token, &decoding_key, &Validation::default())
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("El token ha expirado".to_string())
                }
                _ => {
                    log::debug!("토큰 검증 실패: {}", e);
                    AppError::AuthenticationError("Token no válido".to_string())
                }
            })
    }

    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, AppError> {
        auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::AuthenticationError("Formato de autorización inválido".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::DocumentType;
    use mongodb::bson::oid::ObjectId;

    fn user() -> User {
        let mut user = User::new(
            "Ana".into(),
            DocumentType::CC,
            "1".into(),
            "ana@sena.edu.co".into(),
            "ana@gmail.com".into(),
            "hash".into(),
            Role::Coordinacion,
            vec![],
            None,
        );
        user.id = Some(ObjectId::new());
        user
    }

    #[test]
    fn test_generate_and_verify() {
        let service = TokenService::new("secreto-de-prueba", 24);
        let user = user();

        let token = service.generate_token(&user).unwrap();
        let claims = service.verify_token(&token).unwrap();

        assert_eq!(claims.sub, user.id_string().unwrap());
        assert_eq!(claims.rol, Role::Coordinacion);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = TokenService::new("a", 1).generate_token(&user()).unwrap();
        let result = TokenService::new("b", 1).verify_token(&token);
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_expired_token() {
        let service = TokenService::new("secreto", -1);
        let token = service.generate_token(&user()).unwrap();
        let err = service.verify_token(&token).unwrap_err();
        assert_eq!(err.to_string(), "El token ha expirado");
    }

    #[test]
    fn test_extract_bearer_token() {
        let service = TokenService::new("s", 1);
        assert_eq!(service.extract_bearer_token("Bearer abc.def").unwrap(), "abc.def");
        assert!(service.extract_bearer_token("Basic abc").is_err());
        assert!(service.extract_bearer_token("Bearer ").is_err());
    }
}
