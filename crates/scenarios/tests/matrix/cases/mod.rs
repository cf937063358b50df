//! Matrix test cases.

mod determinism;
mod exploratory;
mod regression;
