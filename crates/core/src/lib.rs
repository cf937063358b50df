#![doc = include_str!("../README.md")]

pub mod config;
pub mod environment;
pub mod error;
pub mod types;

// --- 주요 타입 re-export ---

// 에러
pub use error::{ConfigError, EnvironmentError, FaultlineError, PlanError, ScenarioError};

// 설정
pub use config::{BinariesConfig, FaultlineConfig, GeneralConfig};

// 환경 협력자
pub use environment::{
    BinaryIntrospector, Capability, CapabilityProbe, Environment, FileSystem, Tunable, at_least,
};

// 도메인 타입
pub use types::{Fault, FaultKind, LoadProfile, WatchConfig, Workload, WorkloadProfile};
