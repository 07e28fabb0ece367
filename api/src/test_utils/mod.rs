//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Why manual mocks instead of mockall?
//! - The in-memory repositories need real behavior (vote uniqueness, conditional
//!   soft delete) rather than canned return values
//! - Manual mocks are more explicit and easier to debug
//!
//! The router is generic over trait objects, so `integration_tests` drives the real
//! HTTP stack with these repositories too.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
