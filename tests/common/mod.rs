//! Shared setup for integration tests.

pub mod harness;
