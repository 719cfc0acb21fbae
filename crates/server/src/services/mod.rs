//! Application services: session tokens and their cookie transport.

pub mod auth;
pub mod cookies;
