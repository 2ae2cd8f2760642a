//! 인증 모델
//!
//! - [`auth`] - 요청에 첨부되는 인증 사용자 정보
//! - [`token`] - JWT 클레임

pub mod auth;
pub mod token;

pub use auth::*;
pub use token::*;
