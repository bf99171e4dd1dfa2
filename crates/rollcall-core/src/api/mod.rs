//! REST API client module for the attendance service.
//!
//! This module provides the `ApiClient` for communicating with the remote
//! JSON API, the `Backend` trait the pages are written against, and the wire
//! types every response is parsed into before being narrowed to domain models.

pub mod backend;
pub mod client;
pub mod error;
pub mod wire;

pub use backend::Backend;
pub use client::ApiClient;
pub use error::{api_error, ApiError};
pub use wire::LoginResponse;
