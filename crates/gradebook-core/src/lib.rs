//! Core types and trait definitions for the gradebook service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store, API and server crates all depend on it.

pub mod error;
pub mod predict;
pub mod regression;
pub mod store;
pub mod student;
pub mod study;

pub use error::{Error, Result};
