use alloc::vec::Vec;
use core::slice;

use crate::{LayerCapability, ProtocolLayer};

/// 有序的协议层序列。
///
/// # 教案式说明
/// - **意图 (Why)**：组装器交给调用方的是一份独立的值拷贝，调用方改动它不会影响 profile 内部模板；
/// - **契约 (What)**：顺序即自上而下的处理顺序，首层最靠近应用，末层最靠近网络；
/// - **风险 (Trade-offs)**：内部使用 `Vec`，层数很少（不超过个位数），不值得引入小数组优化。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProtocolStack {
    layers: Vec<ProtocolLayer>,
}

impl ProtocolStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// 在末尾追加一层。
    pub fn push(&mut self, layer: impl Into<ProtocolLayer>) {
        self.layers.push(layer.into());
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn as_slice(&self) -> &[ProtocolLayer] {
        &self.layers
    }

    pub fn iter(&self) -> slice::Iter<'_, ProtocolLayer> {
        self.layers.iter()
    }

    pub fn first(&self) -> Option<&ProtocolLayer> {
        self.layers.first()
    }

    pub fn last(&self) -> Option<&ProtocolLayer> {
        self.layers.last()
    }

    /// 各层能力标签的有序列表，便于断言与日志。
    pub fn capabilities(&self) -> Vec<LayerCapability> {
        self.layers.iter().map(ProtocolLayer::capability).collect()
    }

    pub fn into_vec(self) -> Vec<ProtocolLayer> {
        self.layers
    }
}

impl From<Vec<ProtocolLayer>> for ProtocolStack {
    fn from(layers: Vec<ProtocolLayer>) -> Self {
        Self { layers }
    }
}

impl FromIterator<ProtocolLayer> for ProtocolStack {
    fn from_iter<I: IntoIterator<Item = ProtocolLayer>>(iter: I) -> Self {
        Self {
            layers: iter.into_iter().collect(),
        }
    }
}

impl AsRef<[ProtocolLayer]> for ProtocolStack {
    fn as_ref(&self) -> &[ProtocolLayer] {
        &self.layers
    }
}

impl IntoIterator for ProtocolStack {
    type Item = ProtocolLayer;
    type IntoIter = alloc::vec::IntoIter<ProtocolLayer>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.into_iter()
    }
}

impl<'a> IntoIterator for &'a ProtocolStack {
    type Item = &'a ProtocolLayer;
    type IntoIter = slice::Iter<'a, ProtocolLayer>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.iter()
    }
}
