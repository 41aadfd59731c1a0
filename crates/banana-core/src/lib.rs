//! Core client library for the banana game: configuration, session
//! persistence, and the HTTP API client.

pub mod api;
pub mod config;
pub mod error;
pub mod session;

pub use error::ApiError;
