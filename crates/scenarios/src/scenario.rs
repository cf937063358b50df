//! 조립된 시나리오와 이름 중복 검사
//!
//! [`Scenario`]는 생성기가 한 번 만들고 나면 읽기 전용으로만 소비됩니다.
//! 필드는 비공개이며 getter만 제공합니다.

use std::collections::HashSet;

use faultline_cluster::ClusterPlan;
use faultline_core::types::{Fault, LoadProfile, WatchConfig, Workload, WorkloadProfile};
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::naming::ScenarioPath;

/// 실행 가능한 테스트 구성 하나
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    name: String,
    workload: Workload,
    profile: LoadProfile,
    cluster: ClusterPlan,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fault: Option<Fault>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    watch: Option<WatchConfig>,
}

impl Scenario {
    /// 경로, 워크로드/프로파일, 클러스터 계획으로 시나리오를 조립합니다.
    pub fn assemble(path: &ScenarioPath, entry: &WorkloadProfile, cluster: ClusterPlan) -> Self {
        Self {
            name: path.join(),
            workload: entry.workload.clone(),
            profile: entry.profile.clone(),
            cluster,
            fault: None,
            watch: None,
        }
    }

    pub fn with_fault(mut self, fault: Option<Fault>) -> Self {
        self.fault = fault;
        self
    }

    pub fn with_watch(mut self, watch: Option<WatchConfig>) -> Self {
        self.watch = watch;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn workload(&self) -> &Workload {
        &self.workload
    }

    pub fn profile(&self) -> &LoadProfile {
        &self.profile
    }

    pub fn cluster(&self) -> &ClusterPlan {
        &self.cluster
    }

    pub fn fault(&self) -> Option<&Fault> {
        self.fault.as_ref()
    }

    pub fn watch(&self) -> Option<&WatchConfig> {
        self.watch.as_ref()
    }

    /// 이름의 경로 세그먼트
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.name.split(crate::naming::SEPARATOR)
    }
}

/// 한 번의 생성 호출 결과. 이름이 겹치는 시나리오를 거부합니다.
#[derive(Debug, Default)]
pub struct ScenarioSet {
    scenarios: Vec<Scenario>,
    names: HashSet<String>,
}

impl ScenarioSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 시나리오를 추가합니다.
    ///
    /// # Errors
    ///
    /// 같은 이름이 이미 있으면 [`GenerationError::DuplicateScenario`]를 반환합니다.
    pub fn push(&mut self, scenario: Scenario) -> Result<(), GenerationError> {
        if !self.names.insert(scenario.name.clone()) {
            return Err(GenerationError::DuplicateScenario(scenario.name));
        }
        self.scenarios.push(scenario);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn into_vec(self) -> Vec<Scenario> {
        self.scenarios
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faultline_cluster::{ClusterOption, DescriptorBuilder};

    fn entry() -> WorkloadProfile {
        WorkloadProfile::new(Workload::etcd_put(), LoadProfile::high_traffic())
    }

    fn single_member_plan() -> ClusterPlan {
        DescriptorBuilder::new()
            .with(ClusterOption::ClusterSize(1))
            .build()
    }

    #[test]
    fn assemble_copies_identity_from_entry() {
        let path = ScenarioPath::for_entry(&entry()).child("ClusterOfSize1");
        let scenario = Scenario::assemble(&path, &entry(), single_member_plan());
        assert_eq!(scenario.name(), "EtcdPut/HighTraffic/ClusterOfSize1");
        assert_eq!(scenario.workload(), &Workload::etcd_put());
        assert_eq!(scenario.profile().name, "HighTraffic");
        assert!(scenario.fault().is_none());
        assert!(scenario.watch().is_none());
        assert_eq!(
            scenario.segments().collect::<Vec<_>>(),
            vec!["EtcdPut", "HighTraffic", "ClusterOfSize1"]
        );
    }

    #[test]
    fn fault_and_watch_are_attached() {
        let scenario = Scenario::assemble(&ScenarioPath::root("Issue15220"), &entry(), single_member_plan())
            .with_fault(Some(Fault::kill()))
            .with_watch(Some(WatchConfig {
                request_progress: true,
            }));
        assert_eq!(scenario.fault(), Some(&Fault::kill()));
        assert!(scenario.watch().unwrap().request_progress);
    }

    #[test]
    fn set_rejects_duplicate_names() {
        let path = ScenarioPath::root("Issue13766");
        let mut set = ScenarioSet::new();
        set.push(Scenario::assemble(&path, &entry(), single_member_plan()))
            .unwrap();
        let err = set
            .push(Scenario::assemble(&path, &entry(), ClusterPlan::default()))
            .unwrap_err();
        assert!(matches!(err, GenerationError::DuplicateScenario(name) if name == "Issue13766"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn set_keeps_insertion_order() {
        let mut set = ScenarioSet::new();
        assert!(set.is_empty());
        for name in ["b", "a", "c"] {
            set.push(Scenario::assemble(
                &ScenarioPath::root(name),
                &entry(),
                ClusterPlan::default(),
            ))
            .unwrap();
        }
        let names: Vec<_> = set.into_vec().iter().map(|s| s.name().to_owned()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn serialization_omits_absent_fault() {
        let scenario = Scenario::assemble(&ScenarioPath::root("x"), &entry(), single_member_plan());
        let json = serde_json::to_value(&scenario).unwrap();
        assert_eq!(json["name"], "x");
        assert!(json.get("fault").is_none());
        assert!(json["cluster"].is_array());
    }
}
