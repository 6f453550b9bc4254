//! Shared test fixtures for core integration tests

pub mod repositories;
