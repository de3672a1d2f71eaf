pub mod admin;
pub mod request_id;
pub mod user;
