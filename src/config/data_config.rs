//! 실행 환경, 서버, 저장소 및 트래픽 관련 설정
//!
//! 모든 값은 환경 변수에서 읽으며, 파싱에 실패하면 경고 로그를 남기고
//! 기본값을 사용합니다.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT`, 없으면 `NODE_ENV`를 확인하며 둘 다 없으면 `Production`입니다.
    pub fn current() -> Self {
        let raw = env::var("ENVIRONMENT")
            .or_else(|_| env::var("NODE_ENV"))
            .unwrap_or_else(|_| "production".to_string());

        Self::parse(&raw)
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    /// 상태 응답에 노출하는 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

/// 비밀번호 해싱 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// bcrypt 해싱 비용
    ///
    /// `BCRYPT_COST`가 4~15 범위면 그 값을, 아니면 환경별 기본값을 사용합니다.
    pub fn bcrypt_cost() -> u32 {
        if let Ok(cost_str) = env::var("BCRYPT_COST") {
            match cost_str.parse::<u32>() {
                Ok(cost) if (4..=15).contains(&cost) => return cost,
                _ => log::warn!("BCRYPT_COST 값이 유효하지 않습니다: {}", cost_str),
            }
        }

        Self::bcrypt_cost_for_env(&Environment::current())
    }

    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// HTTP 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        read_or("PORT", 3000)
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }
}

/// 저장소 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    Memory,
}

/// MongoDB 연결 설정
pub struct DatabaseConfig;

impl DatabaseConfig {
    pub fn uri() -> String {
        env::var("MONGO_URI")
            .or_else(|_| env::var("MONGODB_URI"))
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
    }

    pub fn name() -> String {
        env::var("DATABASE_NAME").unwrap_or_else(|_| "senacloud".to_string())
    }

    pub fn backend() -> StoreBackend {
        match env::var("DATA_STORE") {
            Ok(value) => Self::parse_backend(&value),
            Err(_) => StoreBackend::Mongo,
        }
    }

    pub fn parse_backend(value: &str) -> StoreBackend {
        match value.trim().to_lowercase().as_str() {
            "memory" | "mem" | "in-memory" => StoreBackend::Memory,
            "mongo" | "mongodb" => StoreBackend::Mongo,
            other => {
                log::warn!("알 수 없는 DATA_STORE 값 '{}', mongo 사용", other);
                StoreBackend::Mongo
            }
        }
    }
}

/// Rate Limiting 설정
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    pub fn load() -> Self {
        let config = Self {
            per_second: read_or("RATE_LIMIT_PER_SECOND", 100),
            burst_size: read_or("RATE_LIMIT_BURST_SIZE", 200),
        };
        log::info!("Rate Limiting 설정 로드됨: {:?}", config);
        config
    }
}

/// CORS 허용 출처
#[derive(Debug, Clone, PartialEq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

pub struct CorsConfig;

impl CorsConfig {
    /// `CORS_ORIGINS` (쉼표 구분). 비어 있거나 `*`이면 모든 출처를 허용합니다.
    pub fn allowed_origins() -> AllowedOrigins {
        Self::parse_origins(&env::var("CORS_ORIGINS").unwrap_or_default())
    }

    pub fn parse_origins(raw: &str) -> AllowedOrigins {
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            AllowedOrigins::Any
        } else {
            AllowedOrigins::List(origins)
        }
    }
}

/// 실시간 브로드캐스트 설정
pub struct RealtimeConfig;

impl RealtimeConfig {
    /// 네임스페이스별 브로드캐스트 채널 버퍼 크기
    pub fn channel_capacity() -> usize {
        read_or("BROADCAST_CAPACITY", 256usize).max(16)
    }

    /// 루트 네임스페이스 `api-status` 주기
    pub fn status_interval() -> Duration {
        Duration::from_secs(read_or("STATUS_INTERVAL_SECS", 5u64).max(1))
    }
}

fn read_or<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display + Copy,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or_else(|_| {
            log::error!("{} 파싱 실패: '{}'. 기본값 {} 사용", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}
