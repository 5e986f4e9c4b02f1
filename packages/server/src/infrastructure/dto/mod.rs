//! Data transfer objects.
//!
//! - `http`: JSON bodies of the HTTP API

pub mod http;
