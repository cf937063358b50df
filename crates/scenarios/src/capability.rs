//! 환경 capability 스냅샷
//!
//! 생성기는 환경을 한 번만 조사하고 그 결과로 행렬의 분기를 결정합니다.
//! 같은 스냅샷과 같은 레지스트리로 생성하면 항상 같은 결과가 나옵니다.

use std::collections::BTreeMap;

use faultline_core::environment::{Capability, Environment, Tunable};
use serde::Serialize;
use tracing::debug;

/// 생성 시점의 환경 capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    /// LazyFS 사용 가능 여부
    pub lazyfs: Capability,
    /// 이전 릴리스 바이너리 존재 여부
    pub last_release_binary: Capability,
    /// 튜닝 플래그별 지원 여부
    pub tunables: BTreeMap<Tunable, Capability>,
}

impl Capabilities {
    /// 환경을 조사합니다. 실패한 probe는 `Unavailable`로 기록되며 에러가 되지 않습니다.
    pub fn probe<E: Environment + ?Sized>(env: &E) -> Self {
        let last_release = &env.binaries().etcd_last_release;
        let last_release_binary = Capability::from_bool(env.exists(last_release), || {
            format!("{} not found", last_release.display())
        });

        let tunables = Tunable::ALL
            .into_iter()
            .map(|tunable| (tunable, env.supports_tunable(tunable)))
            .collect();

        let caps = Self {
            lazyfs: env.supports_lazyfs(),
            last_release_binary,
            tunables,
        };
        debug!(
            lazyfs = %caps.lazyfs,
            last_release_binary = %caps.last_release_binary,
            "environment probed"
        );
        caps
    }

    /// 모든 capability가 없는 스냅샷
    pub fn none() -> Self {
        Self {
            lazyfs: Capability::unavailable("disabled"),
            last_release_binary: Capability::unavailable("disabled"),
            tunables: Tunable::ALL
                .into_iter()
                .map(|t| (t, Capability::unavailable("disabled")))
                .collect(),
        }
    }

    /// 모든 capability가 있는 스냅샷
    pub fn all() -> Self {
        Self {
            lazyfs: Capability::Available,
            last_release_binary: Capability::Available,
            tunables: Tunable::ALL
                .into_iter()
                .map(|t| (t, Capability::Available))
                .collect(),
        }
    }

    pub fn with_lazyfs(mut self, lazyfs: Capability) -> Self {
        self.lazyfs = lazyfs;
        self
    }

    pub fn with_last_release_binary(mut self, capability: Capability) -> Self {
        self.last_release_binary = capability;
        self
    }

    pub fn with_tunable(mut self, tunable: Tunable, capability: Capability) -> Self {
        self.tunables.insert(tunable, capability);
        self
    }

    /// 튜닝 플래그 지원 여부. 조사되지 않은 플래그는 미지원으로 봅니다.
    pub fn supports(&self, tunable: Tunable) -> bool {
        self.tunables
            .get(&tunable)
            .is_some_and(Capability::is_available)
    }
}
