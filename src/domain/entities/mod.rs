//! # Domain Entities
//!
//! MongoDB 컬렉션에 저장되는 문서 타입입니다.
//!
//! | 엔티티 | 컬렉션 | 사용자 참조 |
//! |--------|--------|-------------|
//! | [`User`] | `users` | - |
//! | [`Activity`] | `activities` | `responsable`, `participantes` |
//! | [`Event`] | `events` | `organizador`, `participantes[].usuario` |
//! | [`Guide`] | `guides` | `autor`, `historialVersiones[].autor` |
//! | [`Notification`] | `notifications` | `destinatario` |
//!
//! 참조는 저장 시 ObjectId로만 보관되고, 응답을 만들 때 공개 사용자 정보로 채워집니다.
//! 사용자를 삭제해도 다른 컬렉션의 참조는 정리되지 않으며, 이 경우 채워진 값은
//! `null`이 되거나 목록에서 빠집니다.

pub mod common;
pub mod users;
pub mod activities;
pub mod events;
pub mod guides;
pub mod notifications;

pub use common::*;
pub use users::*;
pub use activities::*;
pub use events::*;
pub use guides::*;
pub use notifications::*;
