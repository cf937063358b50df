//! 에러 타입 -- 도메인별 에러 정의
//!
//! 환경 관련 실패는 두 단계로 나뉩니다.
//!
//! - **capability 부재** (LazyFS 없음, 이전 릴리스 바이너리 없음 등)는 에러가 아니라
//!   [`Capability::Unavailable`](crate::environment::Capability) 결과로 표현되며,
//!   생성되는 시나리오 행렬을 조용히 줄입니다.
//! - **환경 조회 실패** (설치된 바이너리 버전을 알 수 없음)는 [`EnvironmentError`]이며
//!   생성을 즉시 중단시킵니다.

/// Faultline 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum FaultlineError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 테스트 환경 조회 실패 (치명적)
    #[error("environment error: {0}")]
    Environment(#[from] EnvironmentError),

    /// 클러스터 계획 구성/해석 에러
    #[error("plan error: {0}")]
    Plan(#[from] PlanError),

    /// 시나리오 생성 에러
    #[error("scenario error: {0}")]
    Scenario(#[from] ScenarioError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 테스트 환경 조회 실패
///
/// 선택 기능의 부재가 아니라 테스트 환경 자체가 깨졌음을 의미합니다.
/// 이 에러를 받은 생성기는 부분 결과를 반환하지 않습니다.
#[derive(Debug, thiserror::Error)]
pub enum EnvironmentError {
    /// 바이너리를 실행할 수 없음
    #[error("failed to run '{binary} --version': {reason}")]
    VersionProbe { binary: String, reason: String },

    /// 버전 출력 해석 실패
    #[error("failed to parse version of '{binary}' from {output:?}: {reason}")]
    VersionParse {
        binary: String,
        output: String,
        reason: String,
    },
}

/// 클러스터 계획 에러
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// 해석된 디스크립터가 일관성 검사를 통과하지 못함
    #[error("invalid descriptor: {0}")]
    InvalidDescriptor(String),

    /// 축(axis) 해석 실패
    #[error("resolution failed: {0}")]
    Resolution(String),
}

/// 시나리오 생성 에러
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// 레지스트리/카탈로그 구성 오류
    #[error("registry error: {0}")]
    Registry(String),

    /// 한 번의 생성 결과 안에서 이름 충돌
    #[error("duplicate scenario name: {0}")]
    Duplicate(String),
}
