pub mod guide_service;

pub use guide_service::*;
