pub mod admin;
pub mod auth;
pub mod maybe_auth;
