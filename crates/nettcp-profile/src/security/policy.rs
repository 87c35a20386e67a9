//! # 平台支持策略
//!
//! ## 定位说明（Why）
//! - net.tcp profile 运行在受限平台上，并非所有模式/凭证组合都可实现；本模块以静态矩阵
//!   描述哪些组合会被拒绝；
//! - 策略只在“由设置组装管线”的正向路径上执行。识别器报告的是管线里实际存在的组合，
//!   即使那是正向路径会拒绝的组合，也不会在识别时再次套用本策略。
//!
//! ## 判定顺序（How）
//! 1. 模式本身是否被支持；
//! 2. `TransportWithMessageCredential` 下的消息凭证；
//! 3. 使用传输安全的模式下的传输凭证。
//!
//! 按上述顺序返回第一个违规项，错误中携带字段路径与被拒绝的取值。

use nettcp_layers::{MessageCredentialType, TransportCredentialType};
use tracing::debug;

use crate::error::ProfileError;

use super::mode::SecurityMode;
use super::settings::SecuritySettings;

pub const FIELD_MODE: &str = "Mode";
pub const FIELD_MESSAGE_CREDENTIAL: &str = "Message.ClientCredentialType";
pub const FIELD_TRANSPORT_CREDENTIAL: &str = "Transport.ClientCredentialType";

/// 模式/凭证兼容矩阵。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlatformSupportPolicy {
    unsupported_modes: &'static [SecurityMode],
    /// `TransportWithMessageCredential` 下禁止的消息凭证。
    unsupported_message_credentials: &'static [MessageCredentialType],
    unsupported_transport_credentials: &'static [TransportCredentialType],
}

impl PlatformSupportPolicy {
    /// net.tcp profile 的支持矩阵。
    pub const NET_TCP: PlatformSupportPolicy = PlatformSupportPolicy {
        unsupported_modes: &[SecurityMode::Message],
        unsupported_message_credentials: &[
            MessageCredentialType::Certificate,
            MessageCredentialType::IssuedToken,
            MessageCredentialType::Windows,
        ],
        unsupported_transport_credentials: &[TransportCredentialType::Certificate],
    };

    /// 校验一组安全设置。
    ///
    /// # 教案式说明
    /// - **契约 (What)**：通过返回 `Ok(())`；违规时返回
    ///   [`ProfileError::UnsupportedSetting`]，`field` 取值为 `Mode`、
    ///   `Message.ClientCredentialType` 或 `Transport.ClientCredentialType`；
    /// - **前置条件**：无；本函数纯粹、无副作用，可在任意时刻重复调用。
    pub fn check(&self, settings: &SecuritySettings) -> Result<(), ProfileError> {
        let mode = settings.mode();
        if self.unsupported_modes.contains(&mode) {
            return Err(reject(FIELD_MODE, mode.as_str()));
        }

        if mode == SecurityMode::TransportWithMessageCredential {
            let credential = settings.message().client_credential_type();
            if self.unsupported_message_credentials.contains(&credential) {
                return Err(reject(FIELD_MESSAGE_CREDENTIAL, credential.as_str()));
            }
        }

        if mode.uses_transport_security() {
            let credential = settings.transport().client_credential_type();
            if self.unsupported_transport_credentials.contains(&credential) {
                return Err(reject(FIELD_TRANSPORT_CREDENTIAL, credential.as_str()));
            }
        }

        Ok(())
    }
}

fn reject(field: &'static str, value: &'static str) -> ProfileError {
    debug!(
        field,
        value,
        "security settings rejected by platform support policy"
    );
    ProfileError::unsupported(field, value)
}

/// 以 net.tcp 支持矩阵校验安全设置。
pub fn check_settings(settings: &SecuritySettings) -> Result<(), ProfileError> {
    PlatformSupportPolicy::NET_TCP.check(settings)
}
