//! # Realtime Module
//!
//! 리소스별 네임스페이스로 변경 사항을 WebSocket 클라이언트에 전달합니다.
//!
//! ```text
//! 서비스 ──publish──▶ BroadcastHub ──broadcast::Receiver──▶ session (연결마다)
//!                         ▲                                      │
//!                         └──── dispatcher (sync, 변경 알림) ◀────┘ 클라이언트 이벤트
//! ```
//!
//! - [`namespace`] - `/users`, `/activities`, `/events`, `/guides`, `/notifications`, `/instructors`, `/`
//! - [`message`] - `{event, data, seq}` 봉투와 이벤트 이름
//! - [`hub`] - 네임스페이스별 채널과 순번
//! - [`dispatcher`] - 클라이언트 이벤트 처리 (강사 프로토콜 포함)
//! - [`session`] - actix-ws 연결 루프
//! - [`heartbeat`] - 주기적 `api-status`

pub mod namespace;
pub mod message;
pub mod hub;
pub mod dispatcher;
pub mod session;
pub mod heartbeat;

pub use namespace::Namespace;
pub use message::{events, Change, SocketMessage};
pub use hub::BroadcastHub;
