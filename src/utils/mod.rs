//! 공통 유틸리티 함수 모듈
//!
//! - [`string_utils`] - 문자열 검증, 정리, 태그 정규화
//! - [`time`] - BSON/chrono 시각 변환

pub mod string_utils;
pub mod time;
