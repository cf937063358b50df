//! 회귀(regression) 시나리오
//!
//! 과거 결함을 재현하는 고정 시나리오 목록입니다. 일부 항목은 설치된 서버 버전이
//! 충분히 새로울 때만 포함됩니다.
//!
//! 설치된 버전은 어떤 항목보다도 먼저 조회하며, 조회에 실패하면 목록을 반환하지 않고
//! [`GenerationError::Environment`]로 실패합니다.

use std::collections::HashSet;

use faultline_cluster::{ClusterOption, DescriptorBuilder, Layer};
use faultline_core::environment::{Capability, Environment, Tunable, at_least};
use faultline_core::types::{Fault, LoadProfile, WatchConfig, Workload, WorkloadProfile};
use tracing::{debug, error, info};

use crate::error::GenerationError;
use crate::naming::ScenarioPath;
use crate::scenario::{Scenario, ScenarioSet};

/// 회귀 항목 하나
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegressionCase {
    name: String,
    entry: WorkloadProfile,
    fault: Option<Fault>,
    watch: Option<WatchConfig>,
    layers: Vec<Layer>,
    /// 튜닝 플래그가 지원될 때만 덧붙이는 레이어
    tunable_layers: Vec<(Tunable, Layer)>,
    min_version: Option<semver::Version>,
}

impl RegressionCase {
    pub fn new(name: impl Into<String>, workload: Workload, profile: LoadProfile) -> Self {
        Self {
            name: name.into(),
            entry: WorkloadProfile::new(workload, profile),
            fault: None,
            watch: None,
            layers: Vec::new(),
            tunable_layers: Vec::new(),
            min_version: None,
        }
    }

    pub fn fault(mut self, fault: Fault) -> Self {
        self.fault = Some(fault);
        self
    }

    pub fn watch(mut self, watch: WatchConfig) -> Self {
        self.watch = Some(watch);
        self
    }

    pub fn with(mut self, option: ClusterOption) -> Self {
        self.layers.push(Layer::Apply(option));
        self
    }

    /// 튜닝 플래그가 지원될 때만 적용할 옵션
    pub fn with_if_supported(mut self, tunable: Tunable, option: ClusterOption) -> Self {
        self.tunable_layers.push((tunable, Layer::Apply(option)));
        self
    }

    /// 설치된 버전이 `version` 이상일 때만 포함합니다.
    pub fn requires(mut self, version: semver::Version) -> Self {
        self.min_version = Some(version);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min_version(&self) -> Option<&semver::Version> {
        self.min_version.as_ref()
    }

    /// 이 항목이 참조하는 튜닝 플래그
    pub fn tunables(&self) -> impl Iterator<Item = Tunable> + '_ {
        self.tunable_layers.iter().map(|(t, _)| *t)
    }

    fn is_enabled_for(&self, installed: &semver::Version) -> bool {
        self.min_version
            .as_ref()
            .is_none_or(|min| at_least(installed, min))
    }

    fn assemble(&self, supported: &dyn Fn(Tunable) -> bool) -> Scenario {
        let extra = self
            .tunable_layers
            .iter()
            .filter(|(tunable, _)| supported(*tunable))
            .map(|(_, layer)| layer.clone());
        let plan = DescriptorBuilder::from_layers(self.layers.iter().cloned())
            .extend(extra)
            .build();
        Scenario::assemble(&ScenarioPath::root(&self.name), &self.entry, plan)
            .with_fault(self.fault.clone())
            .with_watch(self.watch)
    }
}

/// 이름이 고유한 회귀 항목 목록
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegressionCatalog {
    cases: Vec<RegressionCase>,
}

impl RegressionCatalog {
    /// # Errors
    ///
    /// 이름이 비었거나 `/`를 포함하거나 중복되면 `GenerationError::Registry`를 반환합니다.
    pub fn new(cases: Vec<RegressionCase>) -> Result<Self, GenerationError> {
        let mut seen = HashSet::new();
        for case in &cases {
            if case.name.is_empty() || case.name.contains(crate::naming::SEPARATOR) {
                return Err(GenerationError::Registry(format!(
                    "invalid regression case name '{}'",
                    case.name
                )));
            }
            if !seen.insert(case.name.as_str()) {
                return Err(GenerationError::Registry(format!(
                    "duplicate regression case '{}'",
                    case.name
                )));
            }
        }
        Ok(Self { cases })
    }

    /// etcd 견고성 테스트의 회귀 목록
    pub fn etcd() -> Self {
        let cases = vec![
            RegressionCase::new(
                "Issue14370",
                Workload::etcd_put_delete_lease(),
                LoadProfile::low_traffic(),
            )
            .fault(Fault::raft_before_save_panic())
            .with(ClusterOption::ClusterSize(1))
            .with(ClusterOption::GoFailEnabled(true)),
            RegressionCase::new(
                "Issue14685",
                Workload::etcd_put_delete_lease(),
                LoadProfile::low_traffic(),
            )
            .fault(Fault::defrag_before_copy_panic())
            .with(ClusterOption::ClusterSize(1))
            .with(ClusterOption::GoFailEnabled(true)),
            RegressionCase::new("Issue13766", Workload::etcd_put(), LoadProfile::high_traffic())
                .fault(Fault::kill())
                .with(ClusterOption::SnapshotCount(100)),
            RegressionCase::new(
                "Issue15220",
                Workload::etcd_put_delete_lease(),
                LoadProfile::low_traffic(),
            )
            .watch(WatchConfig {
                request_progress: true,
            })
            .with(ClusterOption::ClusterSize(1)),
            RegressionCase::new("Issue15271", Workload::etcd_put(), LoadProfile::high_traffic())
                .fault(Fault::blackhole_until_snapshot())
                .with(ClusterOption::SnapshotCount(100))
                .with(ClusterOption::PeerProxy(true))
                .with(ClusterOption::PeerTls(true))
                .with_if_supported(
                    Tunable::SnapshotCatchUpEntries,
                    ClusterOption::SnapshotCatchUpEntries(100),
                )
                .requires(semver::Version::new(3, 5, 0)),
        ];
        Self { cases }
    }

    pub fn cases(&self) -> &[RegressionCase] {
        &self.cases
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

impl Default for RegressionCatalog {
    fn default() -> Self {
        Self::etcd()
    }
}

/// 회귀 시나리오 생성기
#[derive(Debug, Clone, Copy)]
pub struct RegressionGenerator<'a> {
    catalog: &'a RegressionCatalog,
}

impl<'a> RegressionGenerator<'a> {
    pub fn new(catalog: &'a RegressionCatalog) -> Self {
        Self { catalog }
    }

    /// 설치된 버전으로 항목을 거른 회귀 시나리오 목록을 생성합니다.
    ///
    /// # Errors
    ///
    /// 설치된 버전을 알 수 없으면 [`GenerationError::Environment`]를 반환합니다.
    pub fn generate<E: Environment + ?Sized>(&self, env: &E) -> Result<Vec<Scenario>, GenerationError> {
        let binary = &env.binaries().etcd;
        let installed = env.installed_version(binary).map_err(|e| {
            error!(binary = %binary.display(), error = %e, "installed version unknown");
            GenerationError::Environment(e)
        })?;

        let mut probed: Vec<(Tunable, Capability)> = Vec::new();
        for tunable in self.catalog.cases.iter().flat_map(RegressionCase::tunables) {
            if !probed.iter().any(|(t, _)| *t == tunable) {
                probed.push((tunable, env.supports_tunable(tunable)));
            }
        }
        let supported = |tunable: Tunable| {
            probed
                .iter()
                .any(|(t, cap)| *t == tunable && cap.is_available())
        };

        let mut set = ScenarioSet::new();
        for case in &self.catalog.cases {
            if !case.is_enabled_for(&installed) {
                debug!(
                    case = case.name(),
                    %installed,
                    required = ?case.min_version().map(ToString::to_string),
                    "regression case skipped"
                );
                continue;
            }
            set.push(case.assemble(&supported))?;
        }

        info!(count = set.len(), %installed, "regression scenarios generated");
        Ok(set.into_vec())
    }
}
