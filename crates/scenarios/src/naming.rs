//! 계층적 시나리오 이름
//!
//! 이름은 구성 경로의 세그먼트를 `/`로 이어 만듭니다.
//! 예: `Kubernetes/LowTraffic/ClusterOfSize1/LazyFS`
//!
//! 세그먼트 안의 `/`는 `-`로 치환되므로 세그먼트 수와 계층 구조가 항상 일치합니다.

use std::fmt;

use faultline_core::types::WorkloadProfile;

/// 경로 구분자
pub const SEPARATOR: char = '/';

/// 단일 멤버 토폴로지 세그먼트
pub const CLUSTER_OF_SIZE_1: &str = "ClusterOfSize1";
/// 3 멤버 토폴로지 세그먼트
pub const CLUSTER_OF_SIZE_3: &str = "ClusterOfSize3";
/// LazyFS 변형 세그먼트
pub const LAZYFS: &str = "LazyFS";
/// LazyFS 변형과 짝을 이루는, compaction 범위를 좁힌 기본 변형 세그먼트
pub const COMPACT: &str = "Compact";

/// 시나리오 구성 경로
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ScenarioPath {
    segments: Vec<String>,
}

impl ScenarioPath {
    /// 세그먼트 하나로 시작하는 경로
    pub fn root(segment: impl AsRef<str>) -> Self {
        Self::default().child(segment)
    }

    /// `workload/profile` 경로
    pub fn for_entry(entry: &WorkloadProfile) -> Self {
        Self::root(&entry.workload.name).child(&entry.profile.name)
    }

    /// 세그먼트를 하나 덧붙인 새 경로
    pub fn child(&self, segment: impl AsRef<str>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.as_ref().replace(SEPARATOR, "-"));
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn contains_segment(&self, segment: &str) -> bool {
        self.segments.iter().any(|s| s == segment)
    }

    /// 구분자로 이은 이름
    pub fn join(&self) -> String {
        self.segments.join(&SEPARATOR.to_string())
    }
}

impl fmt::Display for ScenarioPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join())
    }
}
