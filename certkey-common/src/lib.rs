//! Certkey Common
//!
//! Common utilities shared by the certkey crates.
//!
//! This crate provides:
//! - Component-based structured logging with a context label
//! - Logging configuration that can be loaded from a profile file

pub mod logging;

pub use logging::{Component, ComponentKey, LogLevel, Logger, LoggingConfig};
