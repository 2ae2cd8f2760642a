//! 인증 관련 설정
//!
//! JWT 서명 키와 만료 시간을 환경 변수에서 읽습니다.

use std::env;

/// JWT 설정
pub struct JwtConfig;

impl JwtConfig {
    /// 서명 비밀 키
    ///
    /// 설정되지 않으면 경고를 남기고 개발용 기본값을 사용합니다.
    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                "senacloud-dev-secret".to_string()
            })
    }

    /// 액세스 토큰 만료 시간 (시간 단위)
    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|h: &i64| *h > 0)
            .unwrap_or(24)
    }
}
