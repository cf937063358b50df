//! 디스크립터 빌더 -- 옵션과 축의 순서 있는 목록
//!
//! [`DescriptorBuilder`]는 옵션을 바로 적용하지 않고 [`Layer`]로 쌓아 [`ClusterPlan`]을
//! 만듭니다. 계획 안에 축이 없으면 [`ClusterPlan::fold`]로 즉시 디스크립터를 얻을 수 있고,
//! 축이 있으면 클러스터 생성 시점에 [`ClusterPlan::resolve`]로 해석합니다.
//!
//! 접는(fold) 순서는 항상 왼쪽에서 오른쪽이며, 같은 필드를 건드리는 레이어는
//! 나중 것이 이깁니다. 넓은 기본 옵션 뒤에 좁은 옵션을 붙여 범위를 좁히는 방식으로
//! 사용합니다.
//!
//! ```
//! use faultline_cluster::{ClusterOption, DescriptorBuilder, RandomizableAxis};
//!
//! let plan = DescriptorBuilder::new()
//!     .with_axis(RandomizableAxis::values("compaction-batch-limit", [10, 100, 1000], ClusterOption::CompactionBatchLimit))
//!     .with(ClusterOption::ClusterSize(1))
//!     .with(ClusterOption::CompactionBatchLimit(1000))
//!     .build();
//!
//! assert!(!plan.is_deterministic());
//! assert!(plan.contains_axis("compaction-batch-limit"));
//! ```

use serde::{Deserialize, Serialize};

use crate::axis::RandomizableAxis;
use crate::descriptor::ClusterDescriptor;
use crate::error::DescriptorError;
use crate::option::ClusterOption;
use crate::resolve::{self, GroupChooser, Resolution};

/// 계획의 한 단계: 고정 옵션 또는 지연 선택 축
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Apply(ClusterOption),
    Choose(RandomizableAxis),
}

impl Layer {
    /// 사람이 읽을 수 있는 한 줄 설명
    pub fn label(&self) -> String {
        match self {
            Self::Apply(option) => option.to_string(),
            Self::Choose(axis) => axis.name().to_owned(),
        }
    }
}

impl From<ClusterOption> for Layer {
    fn from(option: ClusterOption) -> Self {
        Self::Apply(option)
    }
}

impl From<RandomizableAxis> for Layer {
    fn from(axis: RandomizableAxis) -> Self {
        Self::Choose(axis)
    }
}

/// [`ClusterPlan`] 빌더
#[derive(Debug, Clone, Default)]
pub struct DescriptorBuilder {
    layers: Vec<Layer>,
}

impl DescriptorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 기존 레이어 목록에서 시작합니다.
    pub fn from_layers(layers: impl IntoIterator<Item = Layer>) -> Self {
        Self {
            layers: layers.into_iter().collect(),
        }
    }

    /// 고정 옵션을 추가합니다.
    pub fn with(mut self, option: ClusterOption) -> Self {
        self.layers.push(Layer::Apply(option));
        self
    }

    /// 지연 선택 축을 추가합니다.
    pub fn with_axis(mut self, axis: RandomizableAxis) -> Self {
        self.layers.push(Layer::Choose(axis));
        self
    }

    /// 각 레이어를 독립적으로 적용하거나 건너뛰는 무작위 부분집합을 추가합니다.
    pub fn with_subset(mut self, layers: impl IntoIterator<Item = Layer>) -> Self {
        self.layers.extend(
            layers
                .into_iter()
                .map(|layer| Layer::Choose(RandomizableAxis::optional(layer))),
        );
        self
    }

    /// 레이어 목록을 뒤에 붙입니다.
    pub fn extend(mut self, layers: impl IntoIterator<Item = Layer>) -> Self {
        self.layers.extend(layers);
        self
    }

    pub fn build(self) -> ClusterPlan {
        ClusterPlan {
            layers: self.layers,
        }
    }
}

/// 순서 있는 레이어 목록. 해석 전의 클러스터 구성입니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterPlan {
    layers: Vec<Layer>,
}

impl ClusterPlan {
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// 지연 선택 축이 하나도 없는지
    pub fn is_deterministic(&self) -> bool {
        self.layers.iter().all(|l| matches!(l, Layer::Apply(_)))
    }

    /// 계획에 포함된 모든 축 (깊이 우선, 중첩 축 포함)
    pub fn axes(&self) -> Vec<&RandomizableAxis> {
        let mut out = Vec::new();
        collect_axes(&self.layers, &mut out);
        out
    }

    /// 이름이 주어진 축이 (중첩 포함) 있는지
    pub fn contains_axis(&self, name: &str) -> bool {
        self.axes().iter().any(|axis| axis.name() == name)
    }

    /// 축이 없으면 기본 디스크립터 위에 모든 옵션을 접어 반환합니다.
    pub fn fold(&self) -> Option<ClusterDescriptor> {
        if !self.is_deterministic() {
            return None;
        }
        let mut descriptor = ClusterDescriptor::default();
        for layer in &self.layers {
            if let Layer::Apply(option) = layer {
                option.apply(&mut descriptor);
            }
        }
        Some(descriptor)
    }

    /// 선택기로 모든 축을 해석하고 디스크립터를 만듭니다.
    ///
    /// # Errors
    ///
    /// 선택기가 범위를 벗어난 그룹 인덱스를 반환하면
    /// [`DescriptorError::ChoiceOutOfRange`]를 반환합니다.
    pub fn resolve<C>(&self, chooser: &mut C) -> Result<Resolution, DescriptorError>
    where
        C: GroupChooser + ?Sized,
    {
        resolve::resolve_layers(&self.layers, chooser)
    }
}

fn collect_axes<'a>(layers: &'a [Layer], out: &mut Vec<&'a RandomizableAxis>) {
    for layer in layers {
        if let Layer::Choose(axis) = layer {
            out.push(axis);
            for group in axis.groups() {
                collect_axes(group.layers(), out);
            }
        }
    }
}
