//! 传输级与消息级安全层描述。
//!
//! # 教案式说明
//! - **意图 (Why)**：profile 的安全协商只关心“出现了哪一种安全层、层里声明了什么凭证”，
//!   并不执行任何密码学操作，因此本模块仅描述层的形状；
//! - **契约 (What)**：凭证、保护级别与算法套件均为封闭枚举，可通过 `serde` 以变体名读写；
//! - **风险 (Trade-offs)**：枚举集合覆盖了传输框架常见取值，平台是否支持由上层策略判定，
//!   本层不做任何拒绝。

use serde::{Deserialize, Serialize};

/// 传输级客户端凭证类型。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportCredentialType {
    None,
    Basic,
    Digest,
    Ntlm,
    #[default]
    Windows,
    Certificate,
}

impl TransportCredentialType {
    pub const fn as_str(self) -> &'static str {
        match self {
            TransportCredentialType::None => "None",
            TransportCredentialType::Basic => "Basic",
            TransportCredentialType::Digest => "Digest",
            TransportCredentialType::Ntlm => "Ntlm",
            TransportCredentialType::Windows => "Windows",
            TransportCredentialType::Certificate => "Certificate",
        }
    }
}

/// 消息级客户端凭证类型。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageCredentialType {
    None,
    #[default]
    Windows,
    UserName,
    Certificate,
    IssuedToken,
}

impl MessageCredentialType {
    pub const fn as_str(self) -> &'static str {
        match self {
            MessageCredentialType::None => "None",
            MessageCredentialType::Windows => "Windows",
            MessageCredentialType::UserName => "UserName",
            MessageCredentialType::Certificate => "Certificate",
            MessageCredentialType::IssuedToken => "IssuedToken",
        }
    }
}

/// 传输流的保护级别。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtectionLevel {
    None,
    Sign,
    #[default]
    EncryptAndSign,
}

/// 消息安全使用的算法套件。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlgorithmSuite {
    #[default]
    Basic256,
    Basic192,
    Basic128,
    TripleDes,
    Basic256Sha256,
}

/// 传输级安全层（在字节流上做升级，如 Windows 流或 TLS 流）。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TransportSecurityLayer {
    client_credential_type: TransportCredentialType,
    protection_level: ProtectionLevel,
}

impl TransportSecurityLayer {
    pub fn new(
        client_credential_type: TransportCredentialType,
        protection_level: ProtectionLevel,
    ) -> Self {
        Self {
            client_credential_type,
            protection_level,
        }
    }

    pub fn client_credential_type(&self) -> TransportCredentialType {
        self.client_credential_type
    }

    pub fn protection_level(&self) -> ProtectionLevel {
        self.protection_level
    }
}

/// 消息级安全层。
///
/// # 教案式说明
/// - **意图 (Why)**：描述对消息本身签名加密所需的凭证与算法；
/// - **契约 (What)**：`require_cancellation` 为隐式设置，表示安全会话上下文需要显式取消，
///   本 profile 组装时总是置为 `true`，识别时据此判断层是否由本 profile 产出。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageSecurityLayer {
    client_credential_type: MessageCredentialType,
    algorithm_suite: AlgorithmSuite,
    require_cancellation: bool,
}

impl Default for MessageSecurityLayer {
    fn default() -> Self {
        Self::new(MessageCredentialType::default(), AlgorithmSuite::default())
    }
}

impl MessageSecurityLayer {
    pub fn new(
        client_credential_type: MessageCredentialType,
        algorithm_suite: AlgorithmSuite,
    ) -> Self {
        Self {
            client_credential_type,
            algorithm_suite,
            require_cancellation: true,
        }
    }

    pub fn client_credential_type(&self) -> MessageCredentialType {
        self.client_credential_type
    }

    pub fn algorithm_suite(&self) -> AlgorithmSuite {
        self.algorithm_suite
    }

    pub fn require_cancellation(&self) -> bool {
        self.require_cancellation
    }

    pub fn with_require_cancellation(mut self, required: bool) -> Self {
        self.require_cancellation = required;
        self
    }

    pub fn matches(&self, other: &MessageSecurityLayer) -> bool {
        self.client_credential_type == other.client_credential_type
            && self.algorithm_suite == other.algorithm_suite
            && self.require_cancellation == other.require_cancellation
    }
}
