#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![doc = "nettcp-layers: net.tcp 协议栈的分层描述契约。"]
#![doc = ""]
#![doc = "== 使命概述 =="]
#![doc = "- **Why**：组装器与识别器需要一份共同的“层”词汇，才能在配置与管线之间做双向映射。"]
#![doc = "- **What**：定义带能力标签的 [`ProtocolLayer`] 以及各层的具体负载、凭证/保护级别枚举与 [`ProtocolStack`]。"]
#![doc = "- **How**：所有类型都是纯值（`Clone + Eq`），不持有任何 I/O 资源；面向 `no_std + alloc` 设计。"]

extern crate alloc;

use alloc::string::String;
use core::fmt;

pub mod encoding;
pub mod security;
pub mod stack;
pub mod transport;

pub use encoding::{EncodingFormat, EncodingLayer, MessageVersion, ReaderQuotas};
pub use security::{
    AlgorithmSuite, MessageCredentialType, MessageSecurityLayer, ProtectionLevel,
    TransportCredentialType, TransportSecurityLayer,
};
pub use stack::ProtocolStack;
pub use transport::{TransferMode, TransportKind, TransportLayer};

/// 协议层的能力标签。
///
/// # 教案式说明
/// - **意图 (Why)**：识别器只依据标签对层进行分类，避免开放式的运行时类型探测；
/// - **契约 (What)**：标签集合封闭，与 [`ProtocolLayer`] 的变体一一对应。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerCapability {
    /// 消息级安全（签名/加密消息本身）。
    MessageSecurity,
    /// 消息编码。
    Encoding,
    /// 字节传输。
    Transport,
    /// 传输级安全（流升级）。
    TransportSecurity,
    /// 本 profile 不建模的其他层。
    Opaque,
}

impl LayerCapability {
    /// 稳定的小写名称，用于日志字段。
    pub const fn as_str(self) -> &'static str {
        match self {
            LayerCapability::MessageSecurity => "message_security",
            LayerCapability::Encoding => "encoding",
            LayerCapability::Transport => "transport",
            LayerCapability::TransportSecurity => "transport_security",
            LayerCapability::Opaque => "opaque",
        }
    }
}

impl fmt::Display for LayerCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 管线中的单个协议层。
///
/// # 教案式说明
/// - **意图 (Why)**：以封闭的和类型表达“层”，让组装与识别都能穷尽匹配；
/// - **契约 (What)**：每个变体携带自身负载；层之间不互相引用，组装出的层都是配置模板的值拷贝；
/// - **风险 (Trade-offs)**：外部若需要本 crate 未建模的层，只能落入 [`ProtocolLayer::Opaque`]，
///   识别器会把它当作传输安全候选层处理。
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProtocolLayer {
    MessageSecurity(MessageSecurityLayer),
    Encoding(EncodingLayer),
    TransportSecurity(TransportSecurityLayer),
    Transport(TransportLayer),
    Opaque(OpaqueLayer),
}

impl ProtocolLayer {
    /// 返回该层的能力标签。
    pub fn capability(&self) -> LayerCapability {
        match self {
            ProtocolLayer::MessageSecurity(_) => LayerCapability::MessageSecurity,
            ProtocolLayer::Encoding(_) => LayerCapability::Encoding,
            ProtocolLayer::TransportSecurity(_) => LayerCapability::TransportSecurity,
            ProtocolLayer::Transport(_) => LayerCapability::Transport,
            ProtocolLayer::Opaque(_) => LayerCapability::Opaque,
        }
    }

    /// 判断两层是否属于同一类别且有效设置等价。
    ///
    /// 类别不同时恒为 `false`；不透明层按名称比较。
    pub fn matches(&self, other: &ProtocolLayer) -> bool {
        match (self, other) {
            (ProtocolLayer::MessageSecurity(lhs), ProtocolLayer::MessageSecurity(rhs)) => {
                lhs.matches(rhs)
            }
            (ProtocolLayer::Encoding(lhs), ProtocolLayer::Encoding(rhs)) => lhs.matches(rhs),
            (ProtocolLayer::TransportSecurity(lhs), ProtocolLayer::TransportSecurity(rhs)) => {
                lhs == rhs
            }
            (ProtocolLayer::Transport(lhs), ProtocolLayer::Transport(rhs)) => lhs.matches(rhs),
            (ProtocolLayer::Opaque(lhs), ProtocolLayer::Opaque(rhs)) => lhs == rhs,
            _ => false,
        }
    }
}

impl From<MessageSecurityLayer> for ProtocolLayer {
    fn from(layer: MessageSecurityLayer) -> Self {
        ProtocolLayer::MessageSecurity(layer)
    }
}

impl From<EncodingLayer> for ProtocolLayer {
    fn from(layer: EncodingLayer) -> Self {
        ProtocolLayer::Encoding(layer)
    }
}

impl From<TransportSecurityLayer> for ProtocolLayer {
    fn from(layer: TransportSecurityLayer) -> Self {
        ProtocolLayer::TransportSecurity(layer)
    }
}

impl From<TransportLayer> for ProtocolLayer {
    fn from(layer: TransportLayer) -> Self {
        ProtocolLayer::Transport(layer)
    }
}

impl From<OpaqueLayer> for ProtocolLayer {
    fn from(layer: OpaqueLayer) -> Self {
        ProtocolLayer::Opaque(layer)
    }
}

/// 未建模的层，例如可靠会话或复合双工。
///
/// - **契约 (What)**：只保留一个稳定名称，供日志与相等性比较使用。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpaqueLayer {
    name: String,
}

impl OpaqueLayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_follows_variant() {
        let layers: [ProtocolLayer; 5] = [
            MessageSecurityLayer::default().into(),
            EncodingLayer::default().into(),
            TransportSecurityLayer::default().into(),
            TransportLayer::default().into(),
            OpaqueLayer::new("reliable-session").into(),
        ];
        let tags: alloc::vec::Vec<_> = layers.iter().map(ProtocolLayer::capability).collect();
        assert_eq!(
            tags,
            [
                LayerCapability::MessageSecurity,
                LayerCapability::Encoding,
                LayerCapability::TransportSecurity,
                LayerCapability::Transport,
                LayerCapability::Opaque,
            ]
        );
    }

    #[test]
    fn matches_never_crosses_categories() {
        let encoding = ProtocolLayer::from(EncodingLayer::default());
        let transport = ProtocolLayer::from(TransportLayer::default());
        assert!(encoding.matches(&encoding.clone()));
        assert!(!encoding.matches(&transport));
    }

    #[test]
    fn opaque_layers_compare_by_name() {
        let session = OpaqueLayer::new("reliable-session");
        assert_eq!(session.name(), "reliable-session");

        let session = ProtocolLayer::from(session);
        let duplex = ProtocolLayer::from(OpaqueLayer::new("composite-duplex"));
        assert!(session.matches(&session.clone()));
        assert!(!session.matches(&duplex));
    }
}
