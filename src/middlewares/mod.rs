//! 미들웨어 모듈
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - Bearer 토큰 추출 및 검증
//! - 사용자 정보를 request extension에 저장
//! - 토큰이 없으면 익명 요청으로 진행 (인증 강제는 `AuthenticatedUser` 추출자 담당)
//!
//! ```rust,ignore
//! App::new()
//!     .app_data(web::Data::new(state))
//!     .wrap(AuthMiddleware::optional())
//!     .configure(configure_all_routes)
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
