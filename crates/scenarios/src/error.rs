//! 시나리오 생성 에러 타입
//!
//! [`GenerationError`]는 두 종류의 실패를 구분합니다.
//!
//! - **Environment**: 설치된 바이너리 버전을 알 수 없는 등, 테스트 환경이 깨진 경우.
//!   생성은 즉시 중단되며 부분 결과는 반환되지 않습니다.
//! - **Registry / DuplicateScenario**: 고정 테이블 구성 오류.
//!
//! capability 부재(LazyFS 없음 등)는 에러가 아니므로 여기에 없습니다.

use faultline_core::error::{EnvironmentError, FaultlineError, ScenarioError};

/// 시나리오 생성 에러
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// 테스트 환경 조회 실패 (치명적)
    #[error("broken test environment: {0}")]
    Environment(#[from] EnvironmentError),

    /// 레지스트리/카탈로그 구성 오류
    #[error("invalid registry: {0}")]
    Registry(String),

    /// 한 번의 생성 결과 안에서 이름 충돌
    #[error("duplicate scenario name: {0}")]
    DuplicateScenario(String),
}

impl From<GenerationError> for FaultlineError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Environment(e) => FaultlineError::Environment(e),
            GenerationError::Registry(msg) => FaultlineError::Scenario(ScenarioError::Registry(msg)),
            GenerationError::DuplicateScenario(name) => {
                FaultlineError::Scenario(ScenarioError::Duplicate(name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_error_is_fatal_variant() {
        let err: GenerationError = EnvironmentError::VersionProbe {
            binary: "bin/etcd".to_owned(),
            reason: "permission denied".to_owned(),
        }
        .into();
        assert!(err.to_string().contains("broken test environment"));
        let top: FaultlineError = err.into();
        assert!(matches!(top, FaultlineError::Environment(_)));
    }

    #[test]
    fn duplicate_converts_to_scenario_error() {
        let top: FaultlineError = GenerationError::DuplicateScenario("Issue1".to_owned()).into();
        assert!(matches!(
            top,
            FaultlineError::Scenario(ScenarioError::Duplicate(_))
        ));
    }

    #[test]
    fn registry_converts_to_scenario_error() {
        let top: FaultlineError = GenerationError::Registry("empty".to_owned()).into();
        assert!(matches!(
            top,
            FaultlineError::Scenario(ScenarioError::Registry(_))
        ));
    }
}
