//! TOML 配置文档。
//!
//! # 教案式说明
//! - **意图 (Why)**：部署方通常以文件描述 profile 设置；本模块把文档解析为强类型结构，
//!   再通过 profile 的 setter 逐项落地，确保与代码赋值走同一套校验；
//! - **契约 (What)**：所有键均可省略，省略即保持默认；未知键会被拒绝，避免拼写错误被静默忽略；
//! - **风险 (Trade-offs)**：按名称查找外部配置不在此列，见
//!   [`TransportProfile::from_configuration_name`]。

use nettcp_layers::{ReaderQuotas, TransferMode};
use serde::Deserialize;

use crate::error::ProfileError;
use crate::profile::TransportProfile;
use crate::security::SecuritySettings;

/// profile 设置文档。
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileConfig {
    pub transfer_mode: Option<TransferMode>,
    pub max_buffer_pool_size: Option<u64>,
    pub max_buffer_size: Option<u32>,
    pub max_received_message_size: Option<u64>,
    pub reader_quotas: Option<ReaderQuotas>,
    pub security: Option<SecuritySettings>,
}

impl ProfileConfig {
    /// 解析 TOML 文本。
    pub fn from_toml_str(document: &str) -> Result<Self, ProfileError> {
        Ok(toml::from_str(document)?)
    }

    /// 把文档中出现的设置写入 profile。
    ///
    /// 所有设置先写入 profile 的副本，全部通过校验后才整体替换；任一 setter 失败时返回该错误，
    /// 调用方的 profile 保持原样。
    pub fn apply_to(&self, profile: &mut TransportProfile) -> Result<(), ProfileError> {
        let mut staged = profile.clone();
        if let Some(mode) = self.transfer_mode {
            staged.set_transfer_mode(mode);
        }
        if let Some(size) = self.max_buffer_pool_size {
            staged.set_max_buffer_pool_size(size);
        }
        if let Some(size) = self.max_buffer_size {
            staged.set_max_buffer_size(size)?;
        }
        if let Some(size) = self.max_received_message_size {
            staged.set_max_received_message_size(size)?;
        }
        if let Some(quotas) = self.reader_quotas {
            staged.set_reader_quotas(Some(quotas))?;
        }
        if let Some(security) = self.security {
            staged.set_security(Some(security))?;
        }
        *profile = staged;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use nettcp_layers::{MessageCredentialType, ProtectionLevel, TransportCredentialType};

    use super::*;
    use crate::security::SecurityMode;

    const MIXED: &str = r#"
transfer_mode = "Streamed"
max_buffer_size = 131072
max_received_message_size = 131072

[reader_quotas]
max_depth = 64

[security]
mode = "TransportWithMessageCredential"

[security.transport]
client_credential_type = "Ntlm"
protection_level = "Sign"

[security.message]
client_credential_type = "UserName"
"#;

    #[test]
    fn document_is_applied_over_defaults() {
        let profile = TransportProfile::from_toml_str(MIXED).unwrap();
        assert_eq!(profile.transfer_mode(), TransferMode::Streamed);
        assert_eq!(profile.max_buffer_size(), 131_072);
        assert_eq!(profile.max_buffer_pool_size(), 524_288);
        assert_eq!(profile.reader_quotas().max_depth, 64);
        assert_eq!(profile.reader_quotas().max_array_length, 16_384);

        let security = profile.security();
        let transport = security.transport();
        let mode = SecurityMode::TransportWithMessageCredential;
        assert_eq!(security.mode(), mode);
        let credential = transport.client_credential_type();
        assert_eq!(credential, TransportCredentialType::Ntlm);
        assert_eq!(transport.protection_level(), ProtectionLevel::Sign);
        let credential = security.message().client_credential_type();
        assert_eq!(credential, MessageCredentialType::UserName);
    }

    #[test]
    fn empty_document_yields_the_default_profile() {
        let profile = TransportProfile::from_toml_str("").unwrap();
        assert_eq!(profile, TransportProfile::new());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ProfileConfig::from_toml_str("max_buffer_sise = 1").unwrap_err();
        assert_eq!(err.code(), "profile.config.invalid");
    }

    #[test]
    fn setter_validation_applies_to_documents() {
        let err = TransportProfile::from_toml_str("max_buffer_size = 0").unwrap_err();
        assert_eq!(err.code(), "profile.setting.out_of_range");
    }

    #[test]
    fn failed_document_leaves_the_profile_untouched() {
        const PARTLY_INVALID: &str = r#"
transfer_mode = "Streamed"
max_buffer_pool_size = 0
max_buffer_size = 4096
max_received_message_size = 0
"#;
        let config = ProfileConfig::from_toml_str(PARTLY_INVALID).unwrap();
        let mut profile = TransportProfile::new();
        let err = config.apply_to(&mut profile).unwrap_err();
        assert_eq!(err.code(), "profile.setting.out_of_range");
        assert_eq!(profile, TransportProfile::new());
        assert_eq!(profile.transfer_mode(), TransferMode::Buffered);
    }
}
