//! 도메인 타입 -- 시나리오를 구성하는 불변 식별자
//!
//! 워크로드, 부하 프로파일, 장애(fault), watch 설정을 정의합니다.
//! 실제 트래픽 생성과 장애 주입은 외부 하네스의 책임이며, 여기서는 식별자와
//! 하네스가 필요로 하는 최소한의 파라미터만 다룹니다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 트래픽 생성기 식별자
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Workload {
    /// 이름 (시나리오 경로 세그먼트로 사용)
    pub name: String,
}

impl Workload {
    /// 이름으로 워크로드를 생성합니다.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Put 요청만 보내는 트래픽
    pub fn etcd_put() -> Self {
        Self::new("EtcdPut")
    }

    /// Put/Delete/Lease 요청을 섞는 트래픽
    pub fn etcd_put_delete_lease() -> Self {
        Self::new("EtcdPutDeleteLease")
    }

    /// Kubernetes API 서버 접근 패턴을 흉내내는 트래픽
    pub fn kubernetes() -> Self {
        Self::new("Kubernetes")
    }
}

impl fmt::Display for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// 부하 강도 프로파일
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoadProfile {
    /// 이름 (시나리오 경로 세그먼트로 사용)
    pub name: String,
    /// 최소 QPS
    pub minimal_qps: u32,
    /// 최대 QPS
    pub maximal_qps: u32,
    /// 동시 클라이언트 수
    pub client_count: u32,
    /// 고유하지 않은 요청의 최대 동시성
    pub max_non_unique_request_concurrency: u32,
}

impl LoadProfile {
    /// 저부하 프로파일
    pub fn low_traffic() -> Self {
        Self {
            name: "LowTraffic".to_owned(),
            minimal_qps: 100,
            maximal_qps: 200,
            client_count: 8,
            max_non_unique_request_concurrency: 3,
        }
    }

    /// 고부하 프로파일
    pub fn high_traffic() -> Self {
        Self {
            name: "HighTraffic".to_owned(),
            minimal_qps: 200,
            maximal_qps: 1000,
            client_count: 8,
            max_non_unique_request_concurrency: 3,
        }
    }
}

impl fmt::Display for LoadProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}-{} qps)",
            self.name, self.minimal_qps, self.maximal_qps
        )
    }
}

/// (워크로드, 부하 프로파일) 쌍
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkloadProfile {
    pub workload: Workload,
    pub profile: LoadProfile,
}

impl WorkloadProfile {
    pub fn new(workload: Workload, profile: LoadProfile) -> Self {
        Self { workload, profile }
    }
}

impl fmt::Display for WorkloadProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.workload.name, self.profile.name)
    }
}

/// 장애 주입 방식
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FaultKind {
    /// 멤버 프로세스 강제 종료
    Kill,
    /// gofail 실패 지점에서 panic
    GoPanic { failpoint: String },
    /// 스냅샷이 전송될 때까지 피어 네트워크 차단
    BlackholeUntilSnapshot,
}

/// 시나리오 실행 중 활성화할 장애
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fault {
    /// 장애 이름
    pub name: String,
    /// 주입 방식
    pub kind: FaultKind,
}

impl Fault {
    /// 멤버 프로세스 kill
    pub fn kill() -> Self {
        Self {
            name: "Kill".to_owned(),
            kind: FaultKind::Kill,
        }
    }

    /// gofail 실패 지점 panic. 이름은 `{failpoint}Panic` 형식입니다.
    pub fn go_panic(failpoint: impl Into<String>) -> Self {
        let failpoint = failpoint.into();
        Self {
            name: format!("{failpoint}Panic"),
            kind: FaultKind::GoPanic { failpoint },
        }
    }

    /// raft 상태 저장 직전 panic
    pub fn raft_before_save_panic() -> Self {
        Self::go_panic("raftBeforeSave")
    }

    /// defrag 복사 직전 panic
    pub fn defrag_before_copy_panic() -> Self {
        Self::go_panic("defragBeforeCopy")
    }

    /// 스냅샷 전송 시점까지 피어 네트워크 차단
    pub fn blackhole_until_snapshot() -> Self {
        Self {
            name: "blackholePeerNetworkUntilSnapshot".to_owned(),
            kind: FaultKind::BlackholeUntilSnapshot,
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// watch 관련 보조 동작
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// progress notification 요청 여부
    pub request_progress: bool,
}
