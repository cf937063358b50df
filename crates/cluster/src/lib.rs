#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`DescriptorError`)
//! - [`descriptor`]: Cluster descriptor and version composition (`ClusterDescriptor`, `ClusterVersion`)
//! - [`option`]: Single descriptor mutation (`ClusterOption`)
//! - [`axis`]: Alternative bundles and their selection axis (`OptionGroup`, `RandomizableAxis`)
//! - [`builder`]: Ordered layer list (`DescriptorBuilder`, `ClusterPlan`, `Layer`)
//! - [`resolve`]: Instantiation-time draw (`GroupChooser`, `SeededChooser`, `Resolution`)
//!
//! # Architecture
//!
//! ```text
//! ClusterOption ──┐
//!                 ├──> Layer ──> DescriptorBuilder ──> ClusterPlan
//! RandomizableAxis┘                                        │
//!   └─ OptionGroup (weight, layers)                         │ resolve(GroupChooser)
//!                                                           ▼
//!                                         Resolution { ClusterDescriptor, choices }
//! ```

pub mod axis;
pub mod builder;
pub mod descriptor;
pub mod error;
pub mod option;
pub mod resolve;

// --- Public API Re-exports ---

pub use axis::{OptionGroup, RandomizableAxis};
pub use builder::{ClusterPlan, DescriptorBuilder, Layer};
pub use descriptor::{ClusterDescriptor, ClusterVersion, MemberVersion};
pub use error::DescriptorError;
pub use option::ClusterOption;
pub use resolve::{Choice, FirstGroupChooser, GroupChooser, Resolution, SeededChooser};
