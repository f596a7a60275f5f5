//! # IO Module
//!
//! Adapter layer between HTTP clients (the browser form and JSON callers)
//! and the domain services. Services are injected through axum `State`.

pub mod rest;

pub use rest::*;
