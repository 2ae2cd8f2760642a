//! SenaCloud API 백엔드
//!
//! SENA 교육 관리 플랫폼의 REST + 실시간 백엔드입니다.
//! 사용자, 활동, 이벤트, 가이드, 알림을 관리하고 변경 사항을
//! 리소스별 WebSocket 네임스페이스로 전파합니다.
//!
//! # Features
//!
//! - **사용자 관리**: 역할(Admin, Coordinacion, EquipoPedagogico, Instructor)과 강사 승인 상태
//! - **JWT 인증**: bcrypt 해시 비밀번호, Bearer 토큰
//! - **가이드 버전 관리**: 본문 변경 시 patch 버전 증가와 이력 기록
//! - **실시간 전파**: 네임스페이스별 `seq`가 붙은 델타와 스냅샷
//! - **클라이언트**: HTTP/WebSocket 클라이언트, 로컬 복제본, 강사 상태 대체 경로
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌─────────────────┐
//! │   HTTP Routes   │     │  WebSocket /ws  │
//! └─────────────────┘     └─────────────────┘
//!          │                       │
//!          ▼                       ▼
//! ┌─────────────────┐     ┌─────────────────┐
//! │    Handlers     │     │   Dispatcher    │
//! └─────────────────┘     └─────────────────┘
//!          │                       │
//!          └───────────┬───────────┘
//!                      ▼
//!            ┌─────────────────┐
//!            │    Services     │ ──▶ BroadcastHub
//!            └─────────────────┘
//!                      │
//!                      ▼
//!            ┌─────────────────┐
//!            │  Repositories   │ ← MongoDB / 메모리
//!            └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use senacloud_api::core::state::{AppSettings, AppState, Stores};
//!
//! let state = AppState::new(Stores::memory(), AppSettings::from_env());
//! let user = state.users.create(request).await?;
//! let token = state.tokens.issue(&user.id, user.rol)?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod realtime;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
pub mod client;
