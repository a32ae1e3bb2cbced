//! Pages module - Resolves command queries against the extracted page tree
//!
//! Provides:
//! - The transient `Page` read result
//! - Platform directory ordering
//! - The platform × language × command-name search

pub mod lookup;
pub mod model;
pub mod platform;
