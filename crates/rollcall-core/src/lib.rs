//! Core library for rollcall.
//!
//! A typed client for a student organization's attendance service plus the
//! page state the front-end drives:
//!
//! - `api`: HTTP client, wire types and the `Backend` trait
//! - `auth`: roles and the session guard
//! - `selection`, `aggregate`: per-page selection state and derived counts
//! - `loader`, `submit`: concurrent page loads and batch submissions
//! - `pages`: state containers for every screen
//! - `config`, `utils`: configuration and display helpers

pub mod aggregate;
pub mod api;
pub mod auth;
pub mod config;
pub mod loader;
pub mod models;
pub mod notify;
pub mod page;
pub mod pages;
pub mod route;
pub mod selection;
pub mod submit;
pub mod utils;

#[cfg(test)]
mod testing;

pub use api::{ApiClient, ApiError, Backend};
pub use auth::{check_session, GuardOutcome, Role};
pub use config::Config;
pub use notify::{Notice, NoticeKind};
pub use page::{PageScope, PageStatus, PageTicket};
pub use route::Route;
