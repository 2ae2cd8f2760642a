//! # Configuration Module
//!
//! SenaCloud 서비스의 설정을 환경 변수에서 읽어오는 모듈입니다.
//! 설정 구조체는 상태를 갖지 않는 단위 구조체이며, 정적 함수가 호출될 때마다
//! 환경 변수를 읽고 잘못된 값은 로그를 남긴 뒤 기본값으로 대체합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, 데이터 저장소, 속도 제한, CORS, 실시간 채널 설정
//! - [`auth_config`] - JWT 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버
//! export HOST="0.0.0.0"
//! export PORT="3000"
//! export NODE_ENV="production"       # development, test, staging, production
//!
//! # 데이터 저장소
//! export MONGO_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="senacloud"
//! export DATA_STORE="mongo"          # mongo | memory
//!
//! # 인증
//! export JWT_SECRET="cambia-esto"
//! export JWT_EXPIRATION_HOURS="24"
//! export BCRYPT_COST="12"            # 4-15 범위
//!
//! # 트래픽 / 실시간
//! export RATE_LIMIT_PER_SECOND="100"
//! export RATE_LIMIT_BURST_SIZE="200"
//! export CORS_ORIGINS="*"
//! export BROADCAST_CAPACITY="256"
//! export STATUS_INTERVAL_SECS="5"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
