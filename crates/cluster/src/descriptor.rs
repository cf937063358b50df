//! 클러스터 디스크립터 -- 테스트 클러스터를 띄우는 데 필요한 모든 파라미터
//!
//! [`ClusterDescriptor`]는 기본값에서 시작해 [`ClusterOption`](crate::ClusterOption)을
//! 순서대로 적용하여 만들어집니다. 빌더는 필드 간 일관성을 검사하지 않으며,
//! 해석이 끝난 디스크립터를 [`ClusterDescriptor::validate`]로 검사하는 것은
//! 클러스터를 실제로 띄우는 쪽의 책임입니다.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::DescriptorError;

/// 클러스터 멤버들의 버전 구성
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterVersion {
    /// 모든 멤버가 현재 버전
    #[default]
    Current,
    /// 마지막 멤버만 이전 릴리스
    MinorityLast,
    /// 마지막 멤버를 제외한 전부가 이전 릴리스
    QuorumLast,
    /// 모든 멤버가 이전 릴리스
    Last,
}

impl ClusterVersion {
    /// 현재/이전 버전이 섞인 구성인지
    pub fn is_mixed(&self) -> bool {
        matches!(self, Self::MinorityLast | Self::QuorumLast)
    }
}

impl fmt::Display for ClusterVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => write!(f, "current"),
            Self::MinorityLast => write!(f, "minority-last"),
            Self::QuorumLast => write!(f, "quorum-last"),
            Self::Last => write!(f, "last"),
        }
    }
}

/// 멤버 하나가 실행할 바이너리
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberVersion {
    Current,
    Last,
}

/// 클러스터 구성 디스크립터
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterDescriptor {
    /// 멤버 수
    pub cluster_size: usize,
    /// raft heartbeat 주기 (ms)
    pub tick_ms: u64,
    /// election timeout (ms)
    pub election_ms: u64,
    /// 스냅샷을 찍는 커밋 간격
    pub snapshot_count: u64,
    /// 스냅샷 이후 남겨둘 catch-up 엔트리 수. `None`이면 플래그를 넘기지 않음
    pub snapshot_catchup_entries: Option<u64>,
    /// 한 번의 compaction 배치에서 지울 키 수 상한
    pub compaction_batch_limit: u64,
    /// watch progress notification 간격
    pub watch_progress_notify_interval: Duration,
    /// gofail 실패 지점 활성화
    pub go_fail_enabled: bool,
    /// LazyFS 계층 위에서 데이터 디렉토리 운영
    pub lazyfs_enabled: bool,
    /// 피어 간 TLS
    pub peer_tls: bool,
    /// 피어 간 프록시 (네트워크 장애 주입용)
    pub peer_proxy: bool,
    /// 멤버 버전 구성
    pub version: ClusterVersion,
    /// 처음 리더가 될 멤버 인덱스. `None`이면 선거에 맡김
    pub initial_leader_index: Option<usize>,
}

impl Default for ClusterDescriptor {
    fn default() -> Self {
        Self {
            cluster_size: 3,
            tick_ms: 100,
            election_ms: 1000,
            snapshot_count: 10_000,
            snapshot_catchup_entries: None,
            compaction_batch_limit: 1000,
            watch_progress_notify_interval: Duration::from_secs(10 * 60),
            go_fail_enabled: false,
            lazyfs_enabled: false,
            peer_tls: false,
            peer_proxy: false,
            version: ClusterVersion::Current,
            initial_leader_index: None,
        }
    }
}

impl ClusterDescriptor {
    /// `index`번째 멤버가 실행할 바이너리를 반환합니다.
    ///
    /// 혼합 구성에서 소수(minority) 쪽은 항상 마지막 멤버입니다. 따라서
    /// `MinorityLast`에서는 마지막 멤버만 이전 릴리스이고, `QuorumLast`에서는
    /// 마지막 멤버만 현재 버전입니다.
    pub fn member_version(&self, index: usize) -> MemberVersion {
        let is_last_member = index + 1 == self.cluster_size;
        match self.version {
            ClusterVersion::Current => MemberVersion::Current,
            ClusterVersion::Last => MemberVersion::Last,
            ClusterVersion::MinorityLast if is_last_member => MemberVersion::Last,
            ClusterVersion::MinorityLast => MemberVersion::Current,
            ClusterVersion::QuorumLast if is_last_member => MemberVersion::Current,
            ClusterVersion::QuorumLast => MemberVersion::Last,
        }
    }

    /// 모든 멤버의 바이너리 버전
    pub fn member_versions(&self) -> Vec<MemberVersion> {
        (0..self.cluster_size)
            .map(|i| self.member_version(i))
            .collect()
    }

    /// 초기 리더의 버전. 초기 리더가 지정되지 않았으면 `None`
    pub fn leader_version(&self) -> Option<MemberVersion> {
        self.initial_leader_index.map(|i| self.member_version(i))
    }

    /// 필드 간 일관성을 검사합니다.
    ///
    /// # 검증 규칙
    ///
    /// - `cluster_size`, `tick_ms`, `snapshot_count`, `compaction_batch_limit`: 1 이상
    /// - `election_ms`: `tick_ms`보다 커야 함
    /// - `initial_leader_index`: `cluster_size` 미만
    /// - 혼합 버전 구성: 멤버 2개 이상
    pub fn validate(&self) -> Result<(), DescriptorError> {
        if self.cluster_size == 0 {
            return Err(invalid("cluster_size", "must be at least 1"));
        }

        if self.tick_ms == 0 {
            return Err(invalid("tick_ms", "must be at least 1"));
        }

        if self.election_ms <= self.tick_ms {
            return Err(invalid(
                "election_ms",
                format!(
                    "must be greater than tick_ms ({} <= {})",
                    self.election_ms, self.tick_ms
                ),
            ));
        }

        if self.snapshot_count == 0 {
            return Err(invalid("snapshot_count", "must be at least 1"));
        }

        if self.compaction_batch_limit == 0 {
            return Err(invalid("compaction_batch_limit", "must be at least 1"));
        }

        if let Some(leader) = self.initial_leader_index
            && leader >= self.cluster_size
        {
            return Err(invalid(
                "initial_leader_index",
                format!(
                    "index {leader} out of range for cluster of size {}",
                    self.cluster_size
                ),
            ));
        }

        if self.version.is_mixed() && self.cluster_size < 2 {
            return Err(invalid(
                "version",
                format!("{} needs at least 2 members", self.version),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> DescriptorError {
    DescriptorError::Invalid {
        field: field.to_owned(),
        reason: reason.into(),
    }
}
