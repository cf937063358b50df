//! 워크로드/부하 프로파일 레지스트리
//!
//! 생성기에 명시적으로 넘겨지는 불변 테이블입니다. 순서는 생성 결과의 순서를 결정합니다.

use std::collections::HashSet;

use faultline_core::types::{LoadProfile, Workload, WorkloadProfile};

use crate::error::GenerationError;
use crate::naming::SEPARATOR;

/// (워크로드, 부하 프로파일) 고정 목록
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadRegistry {
    entries: Vec<WorkloadProfile>,
}

impl WorkloadRegistry {
    /// 레지스트리를 생성합니다.
    ///
    /// # Errors
    ///
    /// 다음 경우 `GenerationError::Registry`를 반환합니다.
    /// - 식별자가 비어 있거나 경로 구분자 `/`를 포함함 (이름 계층이 깨짐)
    /// - 워크로드와 프로파일 이름이 모두 같은 항목이 둘 이상 (시나리오 이름 충돌)
    pub fn new(entries: Vec<WorkloadProfile>) -> Result<Self, GenerationError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            for (kind, name) in [
                ("workload", entry.workload.name.as_str()),
                ("profile", entry.profile.name.as_str()),
            ] {
                if name.is_empty() {
                    return Err(GenerationError::Registry(format!("empty {kind} name")));
                }
                if name.contains(SEPARATOR) {
                    return Err(GenerationError::Registry(format!(
                        "{kind} name '{name}' contains path separator '{SEPARATOR}'"
                    )));
                }
            }
            if !seen.insert((entry.workload.name.as_str(), entry.profile.name.as_str())) {
                return Err(GenerationError::Registry(format!(
                    "duplicate entry '{entry}'"
                )));
            }
        }
        Ok(Self { entries })
    }

    /// 견고성 테스트 기본 레지스트리
    pub fn robustness() -> Self {
        Self {
            entries: vec![
                WorkloadProfile::new(Workload::etcd_put(), LoadProfile::high_traffic()),
                WorkloadProfile::new(Workload::etcd_put_delete_lease(), LoadProfile::low_traffic()),
                WorkloadProfile::new(Workload::kubernetes(), LoadProfile::high_traffic()),
                WorkloadProfile::new(Workload::kubernetes(), LoadProfile::low_traffic()),
            ],
        }
    }

    pub fn entries(&self) -> &[WorkloadProfile] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for WorkloadRegistry {
    fn default() -> Self {
        Self::robustness()
    }
}
