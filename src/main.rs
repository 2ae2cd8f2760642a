//! SenaCloud API 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP/WebSocket 서버를 구동합니다.
//! 저장소를 연결하고 `AppState`를 한 번 만든 뒤 모든 워커에 공유합니다.

use std::io;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, rt, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use senacloud_api::config::{
    AllowedOrigins, CorsConfig, DatabaseConfig, RateLimitConfig, RealtimeConfig, ServerConfig,
    StoreBackend,
};
use senacloud_api::core::errors::route_not_found;
use senacloud_api::core::state::{AppSettings, AppState, Stores};
use senacloud_api::db::Database;
use senacloud_api::middlewares::AuthMiddleware;
use senacloud_api::realtime::heartbeat;
use senacloud_api::routes::configure_app;

#[actix_web::main]
async fn main() -> io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 SenaCloud API 시작중...");

    let stores = initialize_data_stores().await;
    let state = AppState::new(stores, AppSettings::from_env());

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    rt::spawn(heartbeat::run(state.clone(), RealtimeConfig::status_interval()));

    start_http_server(state).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// 미들웨어 순서: Rate Limiting → CORS → 요청 로그 → 경로 정규화 → 토큰 확인
async fn start_http_server(state: AppState) -> io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 API 상태: http://{}/", bind_address);
    info!("📍 API 문서: http://{}/doc", bind_address);
    info!("📍 WebSocket: ws://{}/ws/{{namespace}}", bind_address);

    let rate_limit_config = RateLimitConfig::load();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "잘못된 Rate Limiting 설정"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    let origins = CorsConfig::allowed_origins();

    HttpServer::new(move || {
        App::new()
            .wrap(AuthMiddleware::optional())
            .wrap(middleware::NormalizePath::trim())
            .wrap(middleware::Logger::default())
            .wrap(configure_cors(&origins))
            .wrap(Governor::new(&governor_conf))
            .configure(configure_app(state.clone()))
            .default_service(web::route().to(route_not_found))
    })
    .bind(bind_address)?
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// `RUST_LOG` 기본값: "info,actix_web=debug"
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// `DATA_STORE`에 따라 저장소를 준비합니다
///
/// MongoDB 연결에 실패하면 경고를 남기고 메모리 저장소로 계속 실행합니다.
async fn initialize_data_stores() -> Stores {
    let stores = match DatabaseConfig::backend() {
        StoreBackend::Memory => {
            info!("🧠 메모리 저장소 사용");
            Stores::memory()
        }
        StoreBackend::Mongo => {
            info!("📡 데이터베이스 연결 중...");
            match Database::new().await {
                Ok(database) => Stores::mongo(&database),
                Err(e) => {
                    warn!("⚠️ MongoDB 연결 실패, 메모리 저장소로 실행합니다: {}", e);
                    Stores::memory()
                }
            }
        }
    };

    if let Err(e) = stores.ensure_indexes().await {
        warn!("⚠️ 인덱스 생성 실패: {}", e);
    }

    stores
}

/// `CORS_ORIGINS` 기반 CORS 미들웨어
fn configure_cors(origins: &AllowedOrigins) -> Cors {
    let cors = match origins {
        AllowedOrigins::Any => Cors::default().allow_any_origin(),
        AllowedOrigins::List(list) => list
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .supports_credentials(),
    };

    cors.allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
        .max_age(3600)
}
