//! 安全设置聚合。

use nettcp_layers::{
    AlgorithmSuite, MessageCredentialType, ProtectionLevel, TransportCredentialType,
};
use serde::{Deserialize, Serialize};

use super::mode::SecurityMode;

/// 传输级安全设置。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransportSecuritySettings {
    client_credential_type: TransportCredentialType,
    protection_level: ProtectionLevel,
}

impl TransportSecuritySettings {
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

    pub fn set_client_credential_type(&mut self, credential: TransportCredentialType) {
        self.client_credential_type = credential;
    }

    pub fn set_protection_level(&mut self, level: ProtectionLevel) {
        self.protection_level = level;
    }
}

/// 消息级安全设置。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MessageSecuritySettings {
    client_credential_type: MessageCredentialType,
    algorithm_suite: AlgorithmSuite,
}

impl MessageSecuritySettings {
    pub fn new(
        client_credential_type: MessageCredentialType,
        algorithm_suite: AlgorithmSuite,
    ) -> Self {
        Self {
            client_credential_type,
            algorithm_suite,
        }
    }

    pub fn client_credential_type(&self) -> MessageCredentialType {
        self.client_credential_type
    }

    pub fn algorithm_suite(&self) -> AlgorithmSuite {
        self.algorithm_suite
    }
}

/// 安全设置聚合：模式 + 传输级设置 + 消息级设置。
///
/// # 教案式说明
/// - **意图 (Why)**：profile 以整体替换的方式持有安全设置，外部拿到的只是只读视图，
///   不存在“半更新”的中间状态；
/// - **契约 (What)**：默认值为 `Transport` 模式、Windows 传输凭证、`EncryptAndSign` 保护、
///   Windows 消息凭证与 `Basic256` 算法套件；
/// - **风险 (Trade-offs)**：构造本身不做平台校验，校验推迟到组装管线时进行，
///   这样识别器可以原样报告它在管线中观察到的组合。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SecuritySettings {
    mode: SecurityMode,
    transport: TransportSecuritySettings,
    message: MessageSecuritySettings,
}

impl SecuritySettings {
    /// 以默认的传输/消息设置创建指定模式。
    pub fn new(mode: SecurityMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_transport(mut self, transport: TransportSecuritySettings) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_message(mut self, message: MessageSecuritySettings) -> Self {
        self.message = message;
        self
    }

    pub fn mode(&self) -> SecurityMode {
        self.mode
    }

    pub fn transport(&self) -> &TransportSecuritySettings {
        &self.transport
    }

    pub fn message(&self) -> &MessageSecuritySettings {
        &self.message
    }

    /// 按“生效部分”比较两份设置。
    ///
    /// 当前模式用不到的那一侧设置不参与比较：例如 `None` 模式下传输与消息设置都不会出现在管线里，
    /// 识别器也就无从恢复它们。
    pub fn is_equivalent(&self, other: &SecuritySettings) -> bool {
        if self.mode != other.mode {
            return false;
        }
        if self.mode.uses_transport_security() && self.transport != other.transport {
            return false;
        }
        if self.mode.uses_message_security() && self.message != other.message {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_windows_transport_security() {
        let settings = SecuritySettings::default();
        assert_eq!(settings.mode(), SecurityMode::Transport);
        assert_eq!(
            settings.transport().client_credential_type(),
            TransportCredentialType::Windows
        );
        assert_eq!(
            settings.transport().protection_level(),
            ProtectionLevel::EncryptAndSign
        );
        assert_eq!(
            settings.message().client_credential_type(),
            MessageCredentialType::Windows
        );
    }

    #[test]
    fn equivalence_ignores_sides_the_mode_does_not_use() {
        let credential = TransportCredentialType::Basic;
        let basic = TransportSecuritySettings::new(credential, ProtectionLevel::Sign);
        let credential = MessageCredentialType::UserName;
        let user_name = MessageSecuritySettings::new(credential, AlgorithmSuite::Basic128);

        let none = SecuritySettings::new(SecurityMode::None);
        let ignored = none.with_transport(basic).with_message(user_name);
        assert!(none.is_equivalent(&ignored));

        let transport = SecuritySettings::new(SecurityMode::Transport);
        assert!(transport.is_equivalent(&transport.with_message(user_name)));
        assert!(!transport.is_equivalent(&transport.with_transport(basic)));

        let mixed = SecuritySettings::new(SecurityMode::TransportWithMessageCredential);
        assert!(!mixed.is_equivalent(&mixed.with_message(user_name)));
        assert!(!mixed.is_equivalent(&transport));
    }
}
