//! Cache module - Manages the on-disk page corpus
//!
//! Provides:
//! - Cache configuration and its validating builder
//! - Archive and index retrieval
//! - Archive extraction
//! - Staleness tracking and refresh

pub mod archive;
pub mod config;
pub mod fetch;
pub mod meta;
pub mod store;
