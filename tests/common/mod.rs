//! Common test utilities module
//!
//! Provides shared utilities for integration tests:
//! - Scratch directories with automatic cleanup
//! - Customer and coordinate fixture files

pub mod test_utils;

pub use test_utils::{
    coordinate_csv, customer_csv, customer_json, customers, four_customers, indonesia_coordinates,
    load_fixture, CustomerRow, FixtureDir,
};
