//! Common types and utilities for the caret completion engine.
//!
//! This crate provides foundational types used across all caret crates:
//! - Source ranges (`TextRange`) measured in UTF-16 code units
//! - Position/line-map conversion for line/column source locations
//! - Centralized limits and defaults

// Text ranges - `[start, end)` spans in UTF-16 code units
pub mod span;
pub use span::TextRange;

// Centralized limits and thresholds
pub mod limits;

// Position/LineMap types for line/column source locations
pub mod position;
pub use position::{LineMap, Position};

// UTF-16 <-> byte offset helpers
pub mod text;
