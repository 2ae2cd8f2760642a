pub mod activity_service;

pub use activity_service::*;
