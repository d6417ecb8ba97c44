//! HTTP request handlers for the mock server.

pub mod content;

pub use content::*;
