//! Client activity timeline aggregation
//!
//! Assembles one descending history feed per client from many backend
//! sources, normalizing each raw row into a displayable event.

pub mod ports;
pub mod service;
pub mod view;

pub use service::TimelineService;
pub use view::TimelineView;
