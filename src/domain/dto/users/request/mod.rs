pub mod create_user;
pub mod update_user;
pub mod auth_request;
pub mod instructor_request;

pub use create_user::*;
pub use update_user::*;
pub use auth_request::*;
pub use instructor_request::*;
