//! Demand board aggregation
//!
//! Produces a single ranked list of outstanding work items spanning three
//! independent backend sources (design orders, support tickets, migration
//! requests), each with its own SLA deadline rule.

pub mod ports;
pub mod service;
pub mod sla;

pub use service::DemandService;
