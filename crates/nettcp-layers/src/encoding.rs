//! 消息编码层描述与读取配额。

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_READ_POOL_SIZE: u32 = 64;
pub const DEFAULT_MAX_WRITE_POOL_SIZE: u32 = 16;
pub const DEFAULT_MAX_SESSION_SIZE: u32 = 2_048;

/// 编码格式。只有 [`EncodingFormat::Binary`] 属于 net.tcp profile。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EncodingFormat {
    #[default]
    Binary,
    Text,
    Mtom,
}

/// 信封与寻址版本。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MessageVersion {
    #[default]
    Soap12WsAddressing10,
    Soap11WsAddressing10,
    Soap12,
    Soap11,
    /// 不带信封的原始消息。
    None,
}

/// 读取配额，限制解码器单条消息可消耗的资源。
///
/// # 教案式说明
/// - **意图 (Why)**：防止恶意或畸形消息以深层嵌套、超长字符串耗尽内存；
/// - **契约 (What)**：纯值类型，profile 在赋值时按值拷贝进编码层模板，不共享别名。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReaderQuotas {
    pub max_depth: u32,
    pub max_string_content_length: u32,
    pub max_array_length: u32,
    pub max_bytes_per_read: u32,
    pub max_name_table_char_count: u32,
}

impl Default for ReaderQuotas {
    fn default() -> Self {
        Self {
            max_depth: 32,
            max_string_content_length: 8_192,
            max_array_length: 16_384,
            max_bytes_per_read: 4_096,
            max_name_table_char_count: 16_384,
        }
    }
}

/// 编码层模板。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodingLayer {
    format: EncodingFormat,
    reader_quotas: ReaderQuotas,
    max_read_pool_size: u32,
    max_write_pool_size: u32,
    max_session_size: u32,
    message_version: MessageVersion,
}

impl Default for EncodingLayer {
    fn default() -> Self {
        Self::binary()
    }
}

impl EncodingLayer {
    /// 以默认设置创建指定格式的编码层。
    pub fn new(format: EncodingFormat) -> Self {
        Self {
            format,
            reader_quotas: ReaderQuotas::default(),
            max_read_pool_size: DEFAULT_MAX_READ_POOL_SIZE,
            max_write_pool_size: DEFAULT_MAX_WRITE_POOL_SIZE,
            max_session_size: DEFAULT_MAX_SESSION_SIZE,
            message_version: MessageVersion::default(),
        }
    }

    /// 二进制编码层，即 net.tcp 使用的默认编码。
    pub fn binary() -> Self {
        Self::new(EncodingFormat::Binary)
    }

    pub fn format(&self) -> EncodingFormat {
        self.format
    }

    pub fn reader_quotas(&self) -> &ReaderQuotas {
        &self.reader_quotas
    }

    pub fn max_read_pool_size(&self) -> u32 {
        self.max_read_pool_size
    }

    pub fn max_write_pool_size(&self) -> u32 {
        self.max_write_pool_size
    }

    pub fn max_session_size(&self) -> u32 {
        self.max_session_size
    }

    pub fn message_version(&self) -> MessageVersion {
        self.message_version
    }

    /// 按值替换读取配额。
    pub fn set_reader_quotas(&mut self, quotas: ReaderQuotas) {
        self.reader_quotas = quotas;
    }

    pub fn with_reader_quotas(mut self, quotas: ReaderQuotas) -> Self {
        self.reader_quotas = quotas;
        self
    }

    pub fn with_max_read_pool_size(mut self, size: u32) -> Self {
        self.max_read_pool_size = size;
        self
    }

    pub fn with_max_write_pool_size(mut self, size: u32) -> Self {
        self.max_write_pool_size = size;
        self
    }

    pub fn with_max_session_size(mut self, size: u32) -> Self {
        self.max_session_size = size;
        self
    }

    pub fn with_message_version(mut self, version: MessageVersion) -> Self {
        self.message_version = version;
        self
    }

    /// 判断两层的全部有效设置是否一致，语义同 [`crate::TransportLayer::matches`]。
    pub fn matches(&self, other: &EncodingLayer) -> bool {
        let EncodingLayer {
            format,
            reader_quotas,
            max_read_pool_size,
            max_write_pool_size,
            max_session_size,
            message_version,
        } = self;

        *format == other.format
            && *reader_quotas == other.reader_quotas
            && *max_read_pool_size == other.max_read_pool_size
            && *max_write_pool_size == other.max_write_pool_size
            && *max_session_size == other.max_session_size
            && *message_version == other.message_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotas_are_copied_by_value() {
        let mut quotas = ReaderQuotas::default();
        let layer = EncodingLayer::binary().with_reader_quotas(quotas);
        quotas.max_depth = 1;
        assert_ne!(layer.reader_quotas(), &quotas);
        assert_eq!(layer.reader_quotas().max_depth, 32);
    }

    #[test]
    fn matching_covers_pool_sizes_and_version() {
        let template = EncodingLayer::binary();
        assert!(template.matches(&EncodingLayer::binary()));

        let variants = [
            template.clone().with_max_read_pool_size(1),
            template.clone().with_max_write_pool_size(1),
            template.clone().with_max_session_size(4_096),
            EncodingLayer::binary().with_message_version(MessageVersion::Soap11),
            EncodingLayer::new(EncodingFormat::Text),
        ];
        for variant in &variants {
            assert!(!template.matches(variant), "{variant:?}");
        }
    }
}
