// src/lib.rs

//! CMS webhook handler library
//!
//! Receives content change notifications, triggers a static site rebuild
//! and purges affected URLs from the CDN cache.

pub mod config;
pub mod error;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod models;
pub mod observe;
pub mod pipeline;
pub mod services;
pub mod utils;
