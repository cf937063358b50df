//! 탐색(exploratory) 시나리오 생성
//!
//! 레지스트리의 각 (워크로드, 프로파일)마다 단일 멤버 클러스터와 3 멤버 클러스터를
//! 하나씩 만들고, 환경이 허락하면 LazyFS 변형과 혼합 버전 축을 더합니다.
//!
//! 클러스터 옵션은 대부분 [`RandomizableAxis`]로 넘겨지며, 실제 값은 클러스터를 띄울 때
//! 정해집니다. 같은 환경 스냅샷과 레지스트리로 생성하면 결과는 항상 같습니다.
//!
//! # 생성 순서
//!
//! 1. 모든 단일 멤버 시나리오 (레지스트리 순서, 항목마다 기본 또는 `LazyFS` + `Compact`)
//! 2. 모든 3 멤버 시나리오 (레지스트리 순서)

use std::time::Duration;

use faultline_cluster::{
    ClusterOption, ClusterVersion, DescriptorBuilder, Layer, OptionGroup,
    RandomizableAxis,
};
use faultline_core::environment::{Environment, Tunable};
use faultline_core::types::WorkloadProfile;
use tracing::{debug, info};

use crate::capability::Capabilities;
use crate::error::GenerationError;
use crate::naming::{CLUSTER_OF_SIZE_1, CLUSTER_OF_SIZE_3, COMPACT, LAZYFS, ScenarioPath};
use crate::registry::WorkloadRegistry;
use crate::scenario::{Scenario, ScenarioSet};

/// LazyFS 변형을 만드는 최대 `minimal_qps` (포함)
pub const LAZYFS_MAX_MINIMAL_QPS: u32 = 100;

/// 축 이름
pub const SNAPSHOT_COUNT_AXIS: &str = "snapshot-count";
pub const TIMING_AXIS: &str = "timing";
pub const COMPACTION_BATCH_LIMIT_AXIS: &str = "compaction-batch-limit";
pub const VERSION_MIX_AXIS: &str = "version-mix";

/// 혼합 버전 축에서 모든 멤버가 현재 버전인 그룹
pub const ALL_CURRENT_GROUP: &str = "all-current";
const ALL_CURRENT_WEIGHT: u32 = 6;

const SNAPSHOT_COUNTS: [u64; 3] = [50, 100, 1000];
const COMPACTION_BATCH_LIMITS: [u64; 3] = [10, 100, 1000];
const NARROWED_COMPACTION_BATCH_LIMITS: [u64; 2] = [10, 100];
/// (tick ms, election ms)
const TIMINGS: [(u64, u64); 3] = [(29, 271), (101, 521), (100, 2000)];
const WATCH_PROGRESS_NOTIFY_INTERVAL: Duration = Duration::from_millis(100);
const SNAPSHOT_CATCHUP_ENTRIES: u64 = 100;

/// 넓은 탐색 행렬 생성기
#[derive(Debug, Clone, Copy)]
pub struct ExploratoryGenerator<'a> {
    registry: &'a WorkloadRegistry,
}

impl<'a> ExploratoryGenerator<'a> {
    pub fn new(registry: &'a WorkloadRegistry) -> Self {
        Self { registry }
    }

    /// 환경을 한 번 조사한 뒤 시나리오를 생성합니다.
    ///
    /// probe 실패는 행렬을 좁힐 뿐 에러가 되지 않습니다.
    pub fn generate_from<E: Environment + ?Sized>(
        &self,
        env: &E,
    ) -> Result<Vec<Scenario>, GenerationError> {
        self.generate(&Capabilities::probe(env))
    }

    /// capability 스냅샷으로 시나리오를 생성합니다.
    ///
    /// # Errors
    ///
    /// 두 시나리오의 이름이 겹치면 [`GenerationError::DuplicateScenario`]를 반환합니다.
    /// 검증된 레지스트리에서는 일어나지 않습니다.
    pub fn generate(&self, caps: &Capabilities) -> Result<Vec<Scenario>, GenerationError> {
        let base = base_layers(caps);
        let mut set = ScenarioSet::new();

        for entry in self.registry.entries() {
            for scenario in single_member_scenarios(entry, &base, caps) {
                debug!(scenario = scenario.name(), "exploratory scenario");
                set.push(scenario)?;
            }
        }

        for entry in self.registry.entries() {
            let scenario = three_member_scenario(entry, &base, caps);
            debug!(scenario = scenario.name(), "exploratory scenario");
            set.push(scenario)?;
        }

        info!(
            count = set.len(),
            registry = self.registry.len(),
            "exploratory scenarios generated"
        );
        Ok(set.into_vec())
    }
}

/// 모든 탐색 시나리오가 공유하는 기본 레이어
pub fn base_layers(caps: &Capabilities) -> Vec<Layer> {
    let mut builder = DescriptorBuilder::new()
        .with_axis(RandomizableAxis::values(
            SNAPSHOT_COUNT_AXIS,
            SNAPSHOT_COUNTS,
            ClusterOption::SnapshotCount,
        ))
        .with_subset([Layer::from(timing_axis())])
        .with(ClusterOption::GoFailEnabled(true))
        .with_axis(RandomizableAxis::values(
            COMPACTION_BATCH_LIMIT_AXIS,
            COMPACTION_BATCH_LIMITS,
            ClusterOption::CompactionBatchLimit,
        ))
        .with(ClusterOption::WatchProgressNotifyInterval(
            WATCH_PROGRESS_NOTIFY_INTERVAL,
        ));

    let tunable = Tunable::SnapshotCatchUpEntries;
    if caps.supports(tunable) {
        builder = builder.with(ClusterOption::SnapshotCatchUpEntries(
            SNAPSHOT_CATCHUP_ENTRIES,
        ));
    } else if let Some(cap) = caps.tunables.get(&tunable) {
        info!(%tunable, reason = %cap, "tunable not set");
    }

    builder.build().layers().to_vec()
}

/// tick/election 조합 축
pub fn timing_axis() -> RandomizableAxis {
    let groups = TIMINGS
        .into_iter()
        .map(|(tick, election)| {
            OptionGroup::new(
                format!("tick-{tick}ms-election-{election}ms"),
                [
                    ClusterOption::TickMs(tick),
                    ClusterOption::ElectionMs(election),
                ],
            )
        })
        .collect();
    RandomizableAxis::new(TIMING_AXIS, groups)
}

/// 혼합 버전 축. 현재 버전만 쓰는 그룹이 전체 가중치 10 중 6을 가집니다.
pub fn version_mix_axis() -> RandomizableAxis {
    let mut groups = vec![
        OptionGroup::new::<ClusterOption>(ALL_CURRENT_GROUP, []).with_weight(ALL_CURRENT_WEIGHT),
    ];
    for (prefix, version) in [
        ("minority-last", ClusterVersion::MinorityLast),
        ("quorum-last", ClusterVersion::QuorumLast),
    ] {
        // 리더가 소수 쪽(마지막 멤버)에 있는 경우와 다수 쪽에 있는 경우
        for leader in [0, 2] {
            groups.push(OptionGroup::new(
                format!("{prefix}-leader-{leader}"),
                [
                    ClusterOption::Version(version),
                    ClusterOption::InitialLeaderIndex(leader),
                ],
            ));
        }
    }
    RandomizableAxis::new(VERSION_MIX_AXIS, groups)
}

fn single_member_scenarios(
    entry: &WorkloadProfile,
    base: &[Layer],
    caps: &Capabilities,
) -> Vec<Scenario> {
    let path = ScenarioPath::for_entry(entry).child(CLUSTER_OF_SIZE_1);
    let baseline = DescriptorBuilder::from_layers(base.iter().cloned())
        .with(ClusterOption::ClusterSize(1));

    let minimal_qps = entry.profile.minimal_qps;
    if !caps.lazyfs.is_available() || minimal_qps > LAZYFS_MAX_MINIMAL_QPS {
        if minimal_qps <= LAZYFS_MAX_MINIMAL_QPS {
            info!(entry = %entry, reason = %caps.lazyfs, "LazyFS variant skipped");
        }
        return vec![Scenario::assemble(&path, entry, baseline.build())];
    }

    let lazyfs = baseline
        .clone()
        .with(ClusterOption::LazyFsEnabled(true))
        .with(ClusterOption::CompactionBatchLimit(1000))
        .build();
    let compact = baseline
        .with_axis(RandomizableAxis::values(
            COMPACTION_BATCH_LIMIT_AXIS,
            NARROWED_COMPACTION_BATCH_LIMITS,
            ClusterOption::CompactionBatchLimit,
        ))
        .build();

    vec![
        Scenario::assemble(&path.child(LAZYFS), entry, lazyfs),
        Scenario::assemble(&path.child(COMPACT), entry, compact),
    ]
}

fn three_member_scenario(entry: &WorkloadProfile, base: &[Layer], caps: &Capabilities) -> Scenario {
    let path = ScenarioPath::for_entry(entry).child(CLUSTER_OF_SIZE_3);
    let mut builder = DescriptorBuilder::from_layers(base.iter().cloned())
        .with(ClusterOption::ClusterSize(3))
        .with(ClusterOption::PeerTls(true))
        .with(ClusterOption::PeerProxy(true));

    if caps.last_release_binary.is_available() {
        builder = builder.with_axis(version_mix_axis());
    } else {
        info!(entry = %entry, reason = %caps.last_release_binary, "version mix skipped");
    }

    Scenario::assemble(&path, entry, builder.build())
}
