//! Core module - Shared helpers for the cache and lookup layers
//!
//! This module provides:
//! - Cache root and page path construction
//! - Timestamp and hashing utilities

pub mod paths;
pub mod util;
