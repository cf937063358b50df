//! 환경 협력자 trait -- 생성기가 소비하는 외부 capability 경계
//!
//! 시나리오 생성기는 실행 환경을 직접 조사하지 않고 아래 trait을 통해서만 질의합니다.
//! 운영 구현은 `faultline-scenarios`의 `HostEnvironment`이고, 테스트는 고정 응답을
//! 돌려주는 구현을 사용합니다.
//!
//! ```text
//!   ExploratoryGenerator / RegressionGenerator
//!                    │
//!                    ▼
//!             Environment (trait)
//!        ┌───────────┼──────────────┐
//!        ▼           ▼              ▼
//! CapabilityProbe  BinaryIntrospector  FileSystem
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::BinariesConfig;
use crate::error::EnvironmentError;

/// capability probe 결과
///
/// `Unavailable`은 에러가 아닙니다. 생성 행렬의 하위 분기를 통째로 건너뛰라는 신호입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Capability {
    /// 사용 가능
    Available,
    /// 사용 불가 (사유 포함)
    Unavailable { reason: String },
}

impl Capability {
    /// 사유와 함께 `Unavailable`을 생성합니다.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// bool 값을 capability로 변환합니다.
    pub fn from_bool(available: bool, reason: impl FnOnce() -> String) -> Self {
        if available {
            Self::Available
        } else {
            Self::Unavailable { reason: reason() }
        }
    }

    /// 사용 가능 여부
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Unavailable { reason } => write!(f, "unavailable ({reason})"),
        }
    }
}

/// 바이너리 버전에 따라 지원 여부가 달라지는 서버 튜닝 플래그
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tunable {
    /// `--experimental-snapshot-catchup-entries`
    SnapshotCatchUpEntries,
}

impl Tunable {
    /// 알려진 모든 튜닝 플래그
    pub const ALL: [Tunable; 1] = [Tunable::SnapshotCatchUpEntries];

    /// 플래그 이름
    pub fn name(&self) -> &'static str {
        match self {
            Self::SnapshotCatchUpEntries => "snapshot-catchup-entries",
        }
    }

    /// 이 플래그를 처음 지원하는 서버 버전
    pub fn minimum_version(&self) -> semver::Version {
        match self {
            // 3.5 브랜치에는 3.5.14에서 백포트됨
            Self::SnapshotCatchUpEntries => semver::Version::new(3, 5, 14),
        }
    }
}

impl fmt::Display for Tunable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 설치된 버전이 `minimum` 이상인지
///
/// semver 순서를 그대로 따르므로 pre-release는 해당 릴리스보다 낮습니다.
/// `3.5.14-rc.0`은 `3.5.14`를 요구하는 게이트를 통과하지 못합니다.
pub fn at_least(installed: &semver::Version, minimum: &semver::Version) -> bool {
    installed >= minimum
}

impl Tunable {
    /// 주어진 버전이 이 플래그를 지원하는지
    pub fn is_supported_by(&self, installed: &semver::Version) -> bool {
        at_least(installed, &self.minimum_version())
    }
}

/// 선택 기능 지원 여부 질의
pub trait CapabilityProbe {
    /// LazyFS 보조 파일시스템 계층을 사용할 수 있는지
    fn supports_lazyfs(&self) -> Capability;

    /// 설치된 바이너리가 주어진 튜닝 플래그를 지원하는지
    ///
    /// 버전 조회가 실패하면 에러 대신 `Unavailable`을 반환해야 합니다.
    fn supports_tunable(&self, tunable: Tunable) -> Capability;
}

/// 바이너리 버전 조회
pub trait BinaryIntrospector {
    /// 바이너리를 조회해 설치된 버전을 반환합니다.
    ///
    /// # Errors
    ///
    /// 실행 또는 출력 해석에 실패하면 [`EnvironmentError`]를 반환합니다.
    fn installed_version(&self, binary: &Path) -> Result<semver::Version, EnvironmentError>;
}

/// 파일 존재 확인
pub trait FileSystem {
    /// 경로가 존재하는지
    fn exists(&self, path: &Path) -> bool;
}

/// 생성기가 요구하는 전체 환경
pub trait Environment: CapabilityProbe + BinaryIntrospector + FileSystem {
    /// 조회 대상 바이너리 경로
    fn binaries(&self) -> &BinariesConfig;
}
