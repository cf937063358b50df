//! 클러스터 계획 에러 타입
//!
//! `From<DescriptorError> for FaultlineError` 구현으로 `?` 연산자를 통해
//! 상위 에러 타입으로 전파됩니다.

use faultline_core::error::{FaultlineError, PlanError};

/// 디스크립터 해석/검증 에러
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    /// 선택기가 축의 그룹 범위를 벗어난 인덱스를 반환함
    #[error("chooser picked group {index} on axis '{axis}' with {len} groups")]
    ChoiceOutOfRange {
        /// 축 이름
        axis: String,
        /// 반환된 인덱스
        index: usize,
        /// 그룹 수
        len: usize,
    },

    /// 해석된 디스크립터의 필드 간 불일치
    #[error("invalid descriptor field '{field}': {reason}")]
    Invalid {
        /// 필드명
        field: String,
        /// 사유
        reason: String,
    },
}

impl From<DescriptorError> for FaultlineError {
    fn from(err: DescriptorError) -> Self {
        match err {
            DescriptorError::ChoiceOutOfRange { .. } => {
                FaultlineError::Plan(PlanError::Resolution(err.to_string()))
            }
            DescriptorError::Invalid { .. } => {
                FaultlineError::Plan(PlanError::InvalidDescriptor(err.to_string()))
            }
        }
    }
}
