//! # API Route Modules
//!
//! - `credential`: `POST /credential`, the issuance endpoint.

pub mod credential;
