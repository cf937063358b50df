//! 계획 해석 -- 클러스터 생성 시점의 그룹 선택
//!
//! 시나리오 생성기는 무작위 선택을 하지 않습니다. 선택은 하네스가 클러스터를 띄우기
//! 직전에 [`GroupChooser`]를 넘겨 [`ClusterPlan::resolve`](crate::ClusterPlan::resolve)를
//! 호출할 때 일어나며, 어떤 축에서 어떤 그룹을 골랐는지가 [`Resolution::choices`]에
//! 순서대로 기록됩니다.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::axis::RandomizableAxis;
use crate::builder::Layer;
use crate::descriptor::ClusterDescriptor;
use crate::error::DescriptorError;

/// 축에서 그룹 하나를 고르는 선택기
pub trait GroupChooser {
    /// 선택된 그룹의 인덱스를 반환합니다. 그룹이 있는 축에만 호출됩니다.
    fn choose(&mut self, axis: &RandomizableAxis) -> usize;
}

impl<F> GroupChooser for F
where
    F: FnMut(&RandomizableAxis) -> usize,
{
    fn choose(&mut self, axis: &RandomizableAxis) -> usize {
        self(axis)
    }
}

/// 항상 첫 번째 그룹을 고르는 선택기 (dry run 용)
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstGroupChooser;

impl GroupChooser for FirstGroupChooser {
    fn choose(&mut self, _axis: &RandomizableAxis) -> usize {
        0
    }
}

/// 시드 기반 가중치 선택기
///
/// 같은 시드와 같은 계획이면 항상 같은 해석 결과를 냅니다.
#[derive(Debug, Clone)]
pub struct SeededChooser {
    seed: u64,
    rng: StdRng,
}

impl SeededChooser {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl GroupChooser for SeededChooser {
    fn choose(&mut self, axis: &RandomizableAxis) -> usize {
        let total = axis.total_weight();
        if total == 0 {
            return 0;
        }
        let mut pick = self.rng.random_range(0..total);
        for (index, group) in axis.groups().iter().enumerate() {
            let weight = u64::from(group.weight());
            if pick < weight {
                return index;
            }
            pick -= weight;
        }
        axis.groups().len() - 1
    }
}

/// 축 하나에서의 선택 기록
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub axis: String,
    pub group: String,
}

/// 해석 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub descriptor: ClusterDescriptor,
    /// 선택 순서대로 (중첩 축 포함)
    pub choices: Vec<Choice>,
}

impl Resolution {
    /// 주어진 축에서 선택된 그룹 이름
    pub fn choice(&self, axis: &str) -> Option<&str> {
        self.choices
            .iter()
            .find(|c| c.axis == axis)
            .map(|c| c.group.as_str())
    }
}

pub(crate) fn resolve_layers<C>(layers: &[Layer], chooser: &mut C) -> Result<Resolution, DescriptorError>
where
    C: GroupChooser + ?Sized,
{
    let mut descriptor = ClusterDescriptor::default();
    let mut choices = Vec::new();
    fold_layers(layers, &mut descriptor, chooser, &mut choices)?;
    Ok(Resolution {
        descriptor,
        choices,
    })
}

fn fold_layers<C>(
    layers: &[Layer],
    descriptor: &mut ClusterDescriptor,
    chooser: &mut C,
    choices: &mut Vec<Choice>,
) -> Result<(), DescriptorError>
where
    C: GroupChooser + ?Sized,
{
    for layer in layers {
        match layer {
            Layer::Apply(option) => option.apply(descriptor),
            Layer::Choose(axis) => {
                if axis.is_empty() {
                    continue;
                }
                let index = chooser.choose(axis);
                let group = axis.groups().get(index).ok_or_else(|| {
                    DescriptorError::ChoiceOutOfRange {
                        axis: axis.name().to_owned(),
                        index,
                        len: axis.groups().len(),
                    }
                })?;
                trace!(axis = axis.name(), group = group.name(), "axis resolved");
                choices.push(Choice {
                    axis: axis.name().to_owned(),
                    group: group.name().to_owned(),
                });
                fold_layers(group.layers(), descriptor, chooser, choices)?;
            }
        }
    }
    Ok(())
}
