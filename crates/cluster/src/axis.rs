//! 옵션 그룹과 지연 선택 축
//!
//! [`OptionGroup`]은 하나의 일관된 대안(예: 타이밍 조합 하나, 버전 혼합 방식 하나)이고,
//! [`RandomizableAxis`]는 그 대안들의 집합입니다. 축에서 어떤 그룹을 쓸지는 시나리오
//! 생성 시점이 아니라 클러스터를 실제로 만들 때 [`GroupChooser`](crate::GroupChooser)가
//! 정합니다.
//!
//! 그룹은 다시 [`Layer`]를 담을 수 있으므로 축은 중첩될 수 있습니다.

use serde::{Deserialize, Serialize};

use crate::builder::Layer;
use crate::option::ClusterOption;

/// 옵션 그룹 이름: 선택적 축에서 "적용 안 함"
pub const SKIP_GROUP: &str = "skip";
/// 옵션 그룹 이름: 선택적 축에서 "적용"
pub const APPLY_GROUP: &str = "apply";

/// 가중치를 가진 옵션 묶음
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionGroup {
    name: String,
    weight: u32,
    layers: Vec<Layer>,
}

impl OptionGroup {
    /// 가중치 1인 그룹을 생성합니다.
    pub fn new<L: Into<Layer>>(name: impl Into<String>, layers: impl IntoIterator<Item = L>) -> Self {
        Self {
            name: name.into(),
            weight: 1,
            layers: layers.into_iter().map(Into::into).collect(),
        }
    }

    /// 선택 가중치를 지정합니다. 0은 1로 취급합니다.
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight.max(1);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }
}

/// 상호 배타적인 옵션 그룹의 집합
///
/// 해석 시 정확히 하나의 그룹이 선택됩니다. 그룹이 없는 축은 아무것도 적용하지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomizableAxis {
    name: String,
    groups: Vec<OptionGroup>,
}

impl RandomizableAxis {
    pub fn new(name: impl Into<String>, groups: Vec<OptionGroup>) -> Self {
        Self {
            name: name.into(),
            groups,
        }
    }

    /// 값마다 옵션 하나짜리 그룹을 만드는 축을 생성합니다.
    ///
    /// ```
    /// use faultline_cluster::{ClusterOption, RandomizableAxis};
    ///
    /// let axis = RandomizableAxis::values("snapshot-count", [50, 100, 1000], ClusterOption::SnapshotCount);
    /// assert_eq!(axis.groups().len(), 3);
    /// assert_eq!(axis.groups()[1].name(), "100");
    /// ```
    pub fn values<T: ToString>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = T>,
        option: impl Fn(T) -> ClusterOption,
    ) -> Self {
        let groups = values
            .into_iter()
            .map(|value| {
                let group_name = value.to_string();
                OptionGroup::new(group_name, [option(value)])
            })
            .collect();
        Self::new(name, groups)
    }

    /// 레이어 하나를 적용하거나 건너뛰는 두 갈래 축을 생성합니다.
    ///
    /// 무작위 부분집합 옵션은 레이어마다 이 축을 하나씩 두는 것으로 표현합니다.
    pub fn optional(layer: impl Into<Layer>) -> Self {
        let layer = layer.into();
        let name = format!("optional:{}", layer.label());
        Self::new(
            name,
            vec![
                OptionGroup::new::<Layer>(SKIP_GROUP, []),
                OptionGroup::new(APPLY_GROUP, [layer]),
            ],
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn groups(&self) -> &[OptionGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// 이름으로 그룹을 찾습니다.
    pub fn group(&self, name: &str) -> Option<&OptionGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// 전체 가중치 합
    pub fn total_weight(&self) -> u64 {
        self.groups.iter().map(|g| u64::from(g.weight)).sum()
    }

    /// 이름이 주어진 그룹이 선택될 확률 (0.0 ~ 1.0)
    pub fn probability_of(&self, name: &str) -> f64 {
        let total = self.total_weight();
        if total == 0 {
            return 0.0;
        }
        let weight: u64 = self
            .groups
            .iter()
            .filter(|g| g.name == name)
            .map(|g| u64::from(g.weight))
            .sum();
        weight as f64 / total as f64
    }
}
