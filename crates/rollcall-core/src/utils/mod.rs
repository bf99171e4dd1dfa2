//! Display helpers shared by the front-end.

pub mod format;

pub use format::{format_date, format_hours, truncate_string};
