//! 클러스터 옵션 -- 디스크립터에 대한 단일 변경
//!
//! 각 [`ClusterOption`]은 디스크립터의 필드 하나(또는 밀접한 한 묶음)를 덮어씁니다.
//! 적용 순서가 의미를 가지며, 같은 필드를 건드리는 옵션은 나중 것이 이깁니다.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::descriptor::{ClusterDescriptor, ClusterVersion};

/// 디스크립터 변경 단위
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "option", content = "value", rename_all = "snake_case")]
pub enum ClusterOption {
    ClusterSize(usize),
    TickMs(u64),
    ElectionMs(u64),
    SnapshotCount(u64),
    SnapshotCatchUpEntries(u64),
    CompactionBatchLimit(u64),
    WatchProgressNotifyInterval(Duration),
    GoFailEnabled(bool),
    LazyFsEnabled(bool),
    PeerTls(bool),
    PeerProxy(bool),
    Version(ClusterVersion),
    InitialLeaderIndex(usize),
}

impl ClusterOption {
    /// 디스크립터에 변경을 적용합니다.
    pub fn apply(&self, descriptor: &mut ClusterDescriptor) {
        match *self {
            Self::ClusterSize(size) => descriptor.cluster_size = size,
            Self::TickMs(ms) => descriptor.tick_ms = ms,
            Self::ElectionMs(ms) => descriptor.election_ms = ms,
            Self::SnapshotCount(count) => descriptor.snapshot_count = count,
            Self::SnapshotCatchUpEntries(entries) => {
                descriptor.snapshot_catchup_entries = Some(entries)
            }
            Self::CompactionBatchLimit(limit) => descriptor.compaction_batch_limit = limit,
            Self::WatchProgressNotifyInterval(interval) => {
                descriptor.watch_progress_notify_interval = interval
            }
            Self::GoFailEnabled(enabled) => descriptor.go_fail_enabled = enabled,
            Self::LazyFsEnabled(enabled) => descriptor.lazyfs_enabled = enabled,
            Self::PeerTls(enabled) => descriptor.peer_tls = enabled,
            Self::PeerProxy(enabled) => descriptor.peer_proxy = enabled,
            Self::Version(version) => descriptor.version = version,
            Self::InitialLeaderIndex(index) => descriptor.initial_leader_index = Some(index),
        }
    }
}

impl fmt::Display for ClusterOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClusterSize(v) => write!(f, "cluster-size={v}"),
            Self::TickMs(v) => write!(f, "tick-ms={v}"),
            Self::ElectionMs(v) => write!(f, "election-ms={v}"),
            Self::SnapshotCount(v) => write!(f, "snapshot-count={v}"),
            Self::SnapshotCatchUpEntries(v) => write!(f, "snapshot-catchup-entries={v}"),
            Self::CompactionBatchLimit(v) => write!(f, "compaction-batch-limit={v}"),
            Self::WatchProgressNotifyInterval(v) => {
                write!(f, "watch-progress-notify-interval={}ms", v.as_millis())
            }
            Self::GoFailEnabled(v) => write!(f, "gofail={v}"),
            Self::LazyFsEnabled(v) => write!(f, "lazyfs={v}"),
            Self::PeerTls(v) => write!(f, "peer-tls={v}"),
            Self::PeerProxy(v) => write!(f, "peer-proxy={v}"),
            Self::Version(v) => write!(f, "version={v}"),
            Self::InitialLeaderIndex(v) => write!(f, "initial-leader-index={v}"),
        }
    }
}
