//! BSON 시각과 chrono 시각 간 변환
//!
//! 엔티티는 `bson::DateTime`으로 저장하고, API 입출력은 RFC 3339 문자열(`chrono`)을 사용합니다.

use chrono::{DateTime as ChronoDateTime, Utc};
use mongodb::bson::DateTime;

pub fn to_bson(value: ChronoDateTime<Utc>) -> DateTime {
    DateTime::from_millis(value.timestamp_millis())
}

pub fn to_chrono(value: DateTime) -> ChronoDateTime<Utc> {
    ChronoDateTime::<Utc>::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}
