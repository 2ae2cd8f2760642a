//! # Core Module
//!
//! - [`errors`] - `AppError`와 HTTP 응답 변환
//! - [`state`] - 의존성 주입용 `AppState`

pub mod errors;
pub mod state;

pub use errors::*;
pub use state::*;
