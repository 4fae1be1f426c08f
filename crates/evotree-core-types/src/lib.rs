//! Core types shared across EvoTree facilities
//!
//! This crate provides the canonical schema used by the logging facility
//! and by anything that consumes its structured events:
//!
//! - **Schema constants**: Canonical field keys and event names

pub mod schema;
