//! 설정 관리 -- faultline.toml 파싱 및 런타임 설정
//!
//! [`FaultlineConfig`]는 로깅 설정과 테스트 대상 바이너리 경로를 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`FAULTLINE_BINARIES_ETCD=/opt/etcd/bin/etcd` 형식)
//! 3. 설정 파일 (`faultline.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # fn example() -> Result<(), faultline_core::error::FaultlineError> {
//! use faultline_core::config::FaultlineConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = FaultlineConfig::load("faultline.toml")?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = FaultlineConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, FaultlineError};

/// 허용되는 로그 레벨
pub const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// 허용되는 로그 형식
pub const VALID_LOG_FORMATS: [&str; 2] = ["json", "pretty"];

/// Faultline 통합 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FaultlineConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 테스트 대상 바이너리 경로
    #[serde(default)]
    pub binaries: BinariesConfig,
}

impl FaultlineConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FaultlineError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 설정 파일 없이 기본값에 환경변수 오버라이드만 적용합니다.
    pub fn from_env() -> Result<Self, FaultlineError> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FaultlineError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FaultlineError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                FaultlineError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, FaultlineError> {
        toml::from_str(toml_str).map_err(|e| {
            FaultlineError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `FAULTLINE_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        override_string(&mut self.general.log_level, "FAULTLINE_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "FAULTLINE_GENERAL_LOG_FORMAT");

        override_path(&mut self.binaries.etcd, "FAULTLINE_BINARIES_ETCD");
        override_path(
            &mut self.binaries.etcd_last_release,
            "FAULTLINE_BINARIES_ETCD_LAST_RELEASE",
        );
        override_path(&mut self.binaries.lazyfs, "FAULTLINE_BINARIES_LAZYFS");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), FaultlineError> {
        if !VALID_LOG_LEVELS.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", VALID_LOG_LEVELS.join(", ")),
            }
            .into());
        }

        if !VALID_LOG_FORMATS.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", VALID_LOG_FORMATS.join(", ")),
            }
            .into());
        }

        // 현재 버전 바이너리는 regression 생성의 버전 조회 대상이므로 필수
        if self.binaries.etcd.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "binaries.etcd".to_owned(),
                reason: "path must not be empty".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 테스트 대상 바이너리 경로
///
/// 경로는 존재하지 않아도 됩니다. 존재 여부는 생성 시점에 capability로 판단합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinariesConfig {
    /// 현재 버전 etcd 바이너리
    pub etcd: PathBuf,
    /// 이전 릴리스 etcd 바이너리 (혼합 버전 클러스터용)
    pub etcd_last_release: PathBuf,
    /// LazyFS 바이너리
    pub lazyfs: PathBuf,
}

impl Default for BinariesConfig {
    fn default() -> Self {
        Self {
            etcd: PathBuf::from("bin/etcd"),
            etcd_last_release: PathBuf::from("bin/etcd-last-release"),
            lazyfs: PathBuf::from("bin/lazyfs"),
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_path(target: &mut PathBuf, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        if val.trim().is_empty() {
            warn!(env_key, "empty path in env var, ignoring");
            return;
        }
        *target = PathBuf::from(val);
    }
}
