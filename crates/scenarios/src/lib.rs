#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`GenerationError`)
//! - [`registry`]: Fixed workload/profile table (`WorkloadRegistry`)
//! - [`naming`]: Hierarchical scenario names (`ScenarioPath`)
//! - [`scenario`]: Assembled scenarios and the per-call name guard (`Scenario`, `ScenarioSet`)
//! - [`capability`]: Up-front environment snapshot (`Capabilities`)
//! - [`host`]: Production environment collaborator (`HostEnvironment`)
//! - [`exploratory`]: Broad matrix generator (`ExploratoryGenerator`)
//! - [`regression`]: Historical defect catalogue and generator (`RegressionCatalog`, `RegressionGenerator`)
//!
//! # Architecture
//!
//! ```text
//! Environment ──> Capabilities ──┐
//!                                ├──> ExploratoryGenerator ──┐
//! WorkloadRegistry ──────────────┘                           ├──> ScenarioSet ──> Vec<Scenario>
//! Environment (installed version) ──> RegressionGenerator ───┘
//!                      RegressionCatalog ──┘
//! ```

pub mod capability;
pub mod error;
pub mod exploratory;
pub mod host;
pub mod naming;
pub mod registry;
pub mod regression;
pub mod scenario;

// --- Public API Re-exports ---

pub use capability::Capabilities;
pub use error::GenerationError;
pub use exploratory::ExploratoryGenerator;
pub use host::HostEnvironment;
pub use naming::ScenarioPath;
pub use registry::WorkloadRegistry;
pub use regression::{RegressionCase, RegressionCatalog, RegressionGenerator};
pub use scenario::{Scenario, ScenarioSet};
