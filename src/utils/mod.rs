//! Utility functions and helpers.

pub mod http;
pub mod url;

pub use self::url::{absolute_url, join_path, path_matches_route};
