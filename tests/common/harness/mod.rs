//! Test harness for integration tests.
//!
//! Provides isolated CLI environments with `assert_cmd` helpers, and an
//! in-memory site for driving the HTTP routes.

mod command;
mod env;
mod site;

// Re-export main types for external use
#[allow(unused_imports)]
pub use command::NotekeepCommand;
#[allow(unused_imports)]
pub use env::TestEnv;
#[allow(unused_imports)]
pub use site::{PASSWORD, TestSite};
