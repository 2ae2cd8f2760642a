//! 인증 서비스

pub mod token_service;
pub mod auth_service;

pub use token_service::*;
pub use auth_service::*;
