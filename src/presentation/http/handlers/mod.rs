pub mod admin;
pub mod auth;
pub mod catalog;
pub mod countries;
pub mod docs;
pub mod health;
pub mod home;
pub mod profile;
pub mod votes;
