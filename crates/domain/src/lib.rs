//! # OpsDeck Domain
//!
//! Business domain types and models for OpsDeck.
//!
//! This crate contains:
//! - Domain data types (Demand, TimelineEvent, SlaConfig, backend rows)
//! - Domain error types and Result definitions
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other OpsDeck crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
