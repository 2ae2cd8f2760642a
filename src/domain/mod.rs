//! # Domain Layer
//!
//! - [`entities`] - MongoDB에 저장되는 문서
//! - [`dto`] - API 요청/응답 구조
//! - [`models`] - 인증 사용자, 토큰 클레임

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::*;
pub use dto::*;
pub use models::*;
