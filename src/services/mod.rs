//! # Service Layer
//!
//! 비즈니스 규칙을 구현하는 계층입니다. 각 서비스는 `Arc<dyn Repository<T>>`와
//! [`BroadcastHub`](crate::realtime::BroadcastHub)를 생성자로 주입받으며,
//! 쓰기에 성공하면 변경된 엔티티(참조가 채워진 응답 형태)를 해당 네임스페이스로 발행합니다.
//!
//! - [`users`] - 사용자, 강사 승인 상태
//! - [`auth`] - 로그인, 회원 가입, JWT
//! - [`activities`], [`events`], [`guides`], [`notifications`] - 리소스 CRUD
//! - [`population`] - 사용자 참조 일괄 조회
//! - [`system`] - API 상태, 문서 페이로드

pub mod population;
pub mod users;
pub mod auth;
pub mod activities;
pub mod events;
pub mod guides;
pub mod notifications;
pub mod system;

pub use population::UserDirectory;
pub use users::UserService;
pub use auth::{AuthService, TokenService};
pub use activities::ActivityService;
pub use events::EventService;
pub use guides::GuideService;
pub use notifications::NotificationService;
