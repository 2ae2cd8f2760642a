//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! 핸들러는 요청 본문과 경로를 추출해 서비스에 위임하고, 서비스 결과를
//! 상태 코드와 함께 JSON으로 반환하는 일만 합니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Client (Web 프론트엔드, 소켓 클라이언트)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP / WebSocket
//! ┌─────────────────────▼───────────────────────┐
//!   Handlers (이 모듈)                         ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services + BroadcastHub                    ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories (MongoDB / 메모리)            ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 에러 처리
//!
//! 모든 핸들러는 `Result<HttpResponse, AppError>`를 반환합니다. 서비스에서 올라온
//! [`AppError`](crate::core::errors::AppError)는 `ResponseError` 구현을 통해
//! `{ "message": ... }` 본문과 알맞은 상태 코드로 변환됩니다.
//!
//! ## 인증
//!
//! 전역 [`AuthMiddleware`](crate::middlewares::AuthMiddleware)가 유효한 Bearer 토큰을
//! 확인하면 요청 확장에 사용자 정보를 넣어 두고, 보호가 필요한 핸들러는
//! [`AuthenticatedUser`](crate::domain::models::AuthenticatedUser)를 인자로 받아
//! 토큰이 없을 때 401을 돌려줍니다.
//!
//! ## 모듈 구성
//!
//! ```text
//! handlers/
//! ├── status.rs          ← GET /, GET /doc
//! ├── auth.rs            ← /api/auth
//! ├── users.rs           ← /api/users
//! ├── activities.rs      ← /api/activities
//! ├── events.rs          ← /api/events
//! ├── guides.rs          ← /api/guides (쓰기에 토큰 필요)
//! ├── notifications.rs   ← /api/notifications
//! └── realtime.rs        ← /ws, /ws/{namespace}
//! ```

pub mod status;
pub mod auth;
pub mod users;
pub mod activities;
pub mod events;
pub mod guides;
pub mod notifications;
pub mod realtime;
