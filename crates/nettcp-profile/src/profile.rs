//! # TransportProfile：net.tcp 设置门面
//!
//! ## 核心意图（Why）
//! - 对外暴露少量命名设置（传输模式、缓冲区大小、读取配额、安全设置），内部转发到
//!   传输层与编码层模板；
//! - 提供 [`TransportProfile::create_pipeline`] 与 [`TransportProfile::try_recognize`] 两个入口，
//!   分别对应组装与识别。
//!
//! ## 行为契约（What）
//! - 对象型设置（安全设置、读取配额）以 `Option` 传入，`None` 视为空值赋值并返回
//!   [`ProfileError::NullSetting`]；
//! - 数值设置在 setter 中做范围校验，越界返回 [`ProfileError::OutOfRange`]；
//! - 安全设置只能整体替换，外部只能拿到只读引用。
//!
//! ## 风险提示（Trade-offs）
//! - 实例不做内部加锁：调用方应先完成全部设置，再组装或识别，之后把它当作不可变值交给运行时。

use nettcp_layers::{
    EncodingLayer, ProtocolLayer, ProtocolStack, ReaderQuotas, TransferMode, TransportLayer,
};

use crate::config::ProfileConfig;
use crate::error::ProfileError;
use crate::pipeline::{composer, recognizer};
use crate::security::SecuritySettings;

pub const FIELD_SECURITY: &str = "Security";
pub const FIELD_READER_QUOTAS: &str = "ReaderQuotas";
pub const FIELD_MAX_BUFFER_SIZE: &str = "MaxBufferSize";
pub const FIELD_MAX_RECEIVED_MESSAGE_SIZE: &str = "MaxReceivedMessageSize";
pub const FIELD_CONFIGURATION_NAME: &str = "configurationName";

/// net.tcp 传输 profile。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransportProfile {
    security: SecuritySettings,
    transport: TransportLayer,
    encoding: EncodingLayer,
}

impl TransportProfile {
    /// 以 profile 默认值创建。
    pub fn new() -> Self {
        Self::default()
    }

    /// 以指定安全设置与默认模板创建。
    pub fn with_security(security: SecuritySettings) -> Self {
        Self {
            security,
            ..Self::default()
        }
    }

    /// 按名称从外部配置构造。
    ///
    /// 本平台 profile 不支持命名配置，总是返回 `UnsupportedSetting{field: "configurationName"}`；
    /// 这与识别失败是两回事。
    pub fn from_configuration_name(name: &str) -> Result<Self, ProfileError> {
        Err(ProfileError::unsupported(FIELD_CONFIGURATION_NAME, name))
    }

    /// 从 TOML 文档构造，未出现的键保持默认值。
    pub fn from_toml_str(document: &str) -> Result<Self, ProfileError> {
        let config = ProfileConfig::from_toml_str(document)?;
        let mut profile = Self::new();
        config.apply_to(&mut profile)?;
        Ok(profile)
    }

    pub fn security(&self) -> &SecuritySettings {
        &self.security
    }

    /// 整体替换安全设置。
    pub fn set_security(&mut self, security: Option<SecuritySettings>) -> Result<(), ProfileError> {
        let security = security.ok_or(ProfileError::NullSetting {
            field: FIELD_SECURITY,
        })?;
        self.security = security;
        Ok(())
    }

    /// 传输层模板隐含的 scheme，net.tcp profile 恒为 `net.tcp`。
    pub fn scheme(&self) -> &'static str {
        self.transport.scheme()
    }

    pub fn transfer_mode(&self) -> TransferMode {
        self.transport.transfer_mode()
    }

    pub fn set_transfer_mode(&mut self, mode: TransferMode) {
        self.transport.set_transfer_mode(mode);
    }

    pub fn max_buffer_pool_size(&self) -> u64 {
        self.transport.max_buffer_pool_size()
    }

    /// 设置缓冲池上限；`0` 表示不做池化。
    pub fn set_max_buffer_pool_size(&mut self, size: u64) {
        self.transport.set_max_buffer_pool_size(size);
    }

    pub fn max_buffer_size(&self) -> u32 {
        self.transport.max_buffer_size()
    }

    pub fn set_max_buffer_size(&mut self, size: u32) -> Result<(), ProfileError> {
        if size == 0 {
            return Err(ProfileError::OutOfRange {
                field: FIELD_MAX_BUFFER_SIZE,
                value: size.to_string(),
                detail: "value must be positive",
            });
        }
        self.transport.set_max_buffer_size(size);
        Ok(())
    }

    pub fn max_received_message_size(&self) -> u64 {
        self.transport.max_received_message_size()
    }

    pub fn set_max_received_message_size(&mut self, size: u64) -> Result<(), ProfileError> {
        if size == 0 {
            return Err(ProfileError::OutOfRange {
                field: FIELD_MAX_RECEIVED_MESSAGE_SIZE,
                value: size.to_string(),
                detail: "value must be positive",
            });
        }
        self.transport.set_max_received_message_size(size);
        Ok(())
    }

    pub fn reader_quotas(&self) -> &ReaderQuotas {
        self.encoding.reader_quotas()
    }

    /// 按值拷贝读取配额到编码层模板。
    pub fn set_reader_quotas(&mut self, quotas: Option<ReaderQuotas>) -> Result<(), ProfileError> {
        let quotas = quotas.ok_or(ProfileError::NullSetting {
            field: FIELD_READER_QUOTAS,
        })?;
        self.encoding.set_reader_quotas(quotas);
        Ok(())
    }

    pub fn transport_template(&self) -> &TransportLayer {
        &self.transport
    }

    pub fn encoding_template(&self) -> &EncodingLayer {
        &self.encoding
    }

    /// 组装规范协议层序列，见 [`composer::compose`]。
    pub fn create_pipeline(&self) -> Result<ProtocolStack, ProfileError> {
        composer::compose(self)
    }

    /// 尝试识别任意协议层序列，见 [`recognizer::try_recognize`]。
    pub fn try_recognize(layers: &[ProtocolLayer]) -> Option<Self> {
        recognizer::try_recognize(layers)
    }

    /// 按命名设置比较两个 profile，安全设置只比较生效部分。
    pub fn is_equivalent(&self, other: &TransportProfile) -> bool {
        self.transfer_mode() == other.transfer_mode()
            && self.max_buffer_pool_size() == other.max_buffer_pool_size()
            && self.max_buffer_size() == other.max_buffer_size()
            && self.max_received_message_size() == other.max_received_message_size()
            && self.reader_quotas() == other.reader_quotas()
            && self.security.is_equivalent(&other.security)
    }

    /// 从识别出的层复制命名设置，走与外部赋值相同的校验。
    pub(crate) fn initialize_from(
        &mut self,
        transport: &TransportLayer,
        encoding: &EncodingLayer,
    ) -> Result<(), ProfileError> {
        self.set_transfer_mode(transport.transfer_mode());
        self.set_max_buffer_pool_size(transport.max_buffer_pool_size());
        self.set_max_buffer_size(transport.max_buffer_size())?;
        self.set_max_received_message_size(transport.max_received_message_size())?;
        self.set_reader_quotas(Some(*encoding.reader_quotas()))
    }
}
