//! Common types and utilities for the maxarity effective-arity analyzer.
//!
//! This crate provides foundational types used across all maxarity crates:
//! - Source spans (`Span`)
//! - Grammar revision selection (`EcmaVersion`)

// Common types - Shared constants to break circular dependencies
pub mod common;
pub use common::EcmaVersion;

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;
