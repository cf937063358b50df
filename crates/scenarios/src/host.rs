//! 운영 환경 협력자
//!
//! [`HostEnvironment`]는 설정된 바이너리 경로를 기준으로 실제 파일시스템과 프로세스를
//! 조회합니다. 테스트에서는 고정 응답을 돌려주는 `MockEnvironment`를 사용합니다.
//!
//! ```text
//!   Capabilities::probe / RegressionGenerator
//!                 │
//!                 ▼
//!          Environment (trait)
//!            │          │
//!            ▼          ▼
//!   HostEnvironment   Mock
//!            │
//!            ▼
//!   <etcd> --version, Path::exists
//! ```

use std::path::Path;
use std::process::Command;

use faultline_core::config::BinariesConfig;
use faultline_core::environment::{
    BinaryIntrospector, Capability, CapabilityProbe, Environment, FileSystem, Tunable,
};
use faultline_core::error::EnvironmentError;
use tracing::debug;

/// `etcd --version` 출력에서 서버 버전이 적힌 줄의 접두사
const VERSION_LINE_PREFIX: &str = "etcd Version:";

/// 실제 호스트를 조회하는 환경
#[derive(Debug, Clone, Default)]
pub struct HostEnvironment {
    binaries: BinariesConfig,
}

impl HostEnvironment {
    pub fn new(binaries: BinariesConfig) -> Self {
        Self { binaries }
    }
}

impl FileSystem for HostEnvironment {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

impl BinaryIntrospector for HostEnvironment {
    fn installed_version(&self, binary: &Path) -> Result<semver::Version, EnvironmentError> {
        let output = Command::new(binary).arg("--version").output().map_err(|e| {
            EnvironmentError::VersionProbe {
                binary: binary.display().to_string(),
                reason: e.to_string(),
            }
        })?;

        if !output.status.success() {
            return Err(EnvironmentError::VersionProbe {
                binary: binary.display().to_string(),
                reason: format!("exited with {}", output.status),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let version = parse_version_output(binary, &stdout)?;
        debug!(binary = %binary.display(), %version, "installed version detected");
        Ok(version)
    }
}

impl CapabilityProbe for HostEnvironment {
    fn supports_lazyfs(&self) -> Capability {
        let lazyfs = &self.binaries.lazyfs;
        Capability::from_bool(self.exists(lazyfs), || {
            format!("{} not found", lazyfs.display())
        })
    }

    fn supports_tunable(&self, tunable: Tunable) -> Capability {
        match self.installed_version(&self.binaries.etcd) {
            Ok(version) => Capability::from_bool(tunable.is_supported_by(&version), || {
                format!(
                    "{tunable} requires {} or newer, found {version}",
                    tunable.minimum_version()
                )
            }),
            Err(e) => Capability::unavailable(e.to_string()),
        }
    }
}

impl Environment for HostEnvironment {
    fn binaries(&self) -> &BinariesConfig {
        &self.binaries
    }
}

/// `--version` 출력에서 서버 버전을 찾습니다.
///
/// 출력에는 `Go Version:` 줄도 있으므로 `etcd Version:` 줄만 봅니다.
pub fn parse_version_output(binary: &Path, output: &str) -> Result<semver::Version, EnvironmentError> {
    let parse_error = |reason: String| EnvironmentError::VersionParse {
        binary: binary.display().to_string(),
        output: output.to_owned(),
        reason,
    };

    let raw = output
        .lines()
        .find_map(|line| line.trim().strip_prefix(VERSION_LINE_PREFIX))
        .map(str::trim)
        .ok_or_else(|| parse_error(format!("no '{VERSION_LINE_PREFIX}' line")))?;

    semver::Version::parse(raw).map_err(|e| parse_error(e.to_string()))
}

/// 테스트용 Mock 환경
///
/// 설정된 응답을 반환하여 바이너리 없이도 생성기를 테스트할 수 있습니다.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MockEnvironment {
    pub binaries: BinariesConfig,
    /// `None`이면 버전 조회가 실패함
    pub version: Option<semver::Version>,
    pub lazyfs: bool,
    pub existing: Vec<std::path::PathBuf>,
}

#[cfg(test)]
impl MockEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = semver::Version::parse(version).ok();
        self
    }

    pub fn with_lazyfs(mut self, available: bool) -> Self {
        self.lazyfs = available;
        self
    }

    pub fn with_existing_last_release(mut self) -> Self {
        self.existing.push(self.binaries.etcd_last_release.clone());
        self
    }
}

#[cfg(test)]
impl FileSystem for MockEnvironment {
    fn exists(&self, path: &Path) -> bool {
        self.existing.iter().any(|p| p == path)
    }
}

#[cfg(test)]
impl BinaryIntrospector for MockEnvironment {
    fn installed_version(&self, binary: &Path) -> Result<semver::Version, EnvironmentError> {
        self.version
            .clone()
            .ok_or_else(|| EnvironmentError::VersionProbe {
                binary: binary.display().to_string(),
                reason: "mock: no version".to_owned(),
            })
    }
}

#[cfg(test)]
impl CapabilityProbe for MockEnvironment {
    fn supports_lazyfs(&self) -> Capability {
        Capability::from_bool(self.lazyfs, || "mock: lazyfs disabled".to_owned())
    }

    fn supports_tunable(&self, tunable: Tunable) -> Capability {
        match &self.version {
            Some(v) if tunable.is_supported_by(v) => Capability::Available,
            _ => Capability::unavailable("mock: unsupported"),
        }
    }
}

#[cfg(test)]
impl Environment for MockEnvironment {
    fn binaries(&self) -> &BinariesConfig {
        &self.binaries
    }
}
