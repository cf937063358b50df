//! Scenario matrix integration tests for faultline-scenarios.
//!
//! These tests drive both generators through the public API against a
//! fake environment and check the properties of the produced matrix.
//!
//! # Test Structure
//!
//! - `helpers/` -- Shared test utilities (fake environment, registries, name helpers)
//! - `cases/` -- Test files organized by generator and property
//!
//! # Running
//!
//! ```bash
//! cargo test -p faultline-scenarios --test matrix
//! ```

mod cases;
mod helpers;
