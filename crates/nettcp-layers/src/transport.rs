//! 传输层描述。
//!
//! # 教案式说明
//! - **意图 (Why)**：组装器需要一个可拷贝的传输层模板，识别器需要据此判断外部管线的传输层
//!   是否“由本 profile 产出”；
//! - **契约 (What)**：[`TransportLayer`] 同时承载对外命名的设置（传输模式、缓冲区大小）与
//!   不对外暴露的隐式设置（连接缓冲、初始化超时等），[`TransportLayer::matches`] 比较全部字段；
//! - **风险 (Trade-offs)**：本层不做范围校验，数值合法性由上层 profile 的 setter 负责。

use core::time::Duration;

use serde::{Deserialize, Serialize};

/// 默认的缓冲池上限（512 KiB）。
pub const DEFAULT_MAX_BUFFER_POOL_SIZE: u64 = 512 * 1024;
/// 默认的单条消息缓冲上限。
pub const DEFAULT_MAX_BUFFER_SIZE: u32 = 65_536;
/// 默认的最大接收消息大小。
pub const DEFAULT_MAX_RECEIVED_MESSAGE_SIZE: u64 = 65_536;
pub const DEFAULT_CONNECTION_BUFFER_SIZE: u32 = 8_192;
pub const DEFAULT_CHANNEL_INITIALIZATION_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_PENDING_CONNECTIONS: u32 = 12;
pub const DEFAULT_MAX_OUTPUT_DELAY: Duration = Duration::from_millis(200);

/// 传输实现的种类。
///
/// 只有 [`TransportKind::Tcp`] 属于 net.tcp profile；其余种类用于描述外部管线。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransportKind {
    #[default]
    Tcp,
    NamedPipe,
    Http,
}

impl TransportKind {
    /// 该传输隐含的 URI scheme。
    pub const fn scheme(self) -> &'static str {
        match self {
            TransportKind::Tcp => "net.tcp",
            TransportKind::NamedPipe => "net.pipe",
            TransportKind::Http => "http",
        }
    }
}

/// 消息在连接上的传递方式。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferMode {
    /// 请求与响应都整体缓冲。
    #[default]
    Buffered,
    /// 请求与响应都以流方式传递。
    Streamed,
    StreamedRequest,
    StreamedResponse,
}

/// 传输层模板。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportLayer {
    kind: TransportKind,
    transfer_mode: TransferMode,
    max_buffer_pool_size: u64,
    max_buffer_size: u32,
    max_received_message_size: u64,
    connection_buffer_size: u32,
    channel_initialization_timeout: Duration,
    max_pending_connections: u32,
    max_output_delay: Duration,
    manual_addressing: bool,
}

impl Default for TransportLayer {
    fn default() -> Self {
        Self::new(TransportKind::Tcp)
    }
}

impl TransportLayer {
    /// 以默认设置创建指定种类的传输层。
    pub fn new(kind: TransportKind) -> Self {
        Self {
            kind,
            transfer_mode: TransferMode::Buffered,
            max_buffer_pool_size: DEFAULT_MAX_BUFFER_POOL_SIZE,
            max_buffer_size: DEFAULT_MAX_BUFFER_SIZE,
            max_received_message_size: DEFAULT_MAX_RECEIVED_MESSAGE_SIZE,
            connection_buffer_size: DEFAULT_CONNECTION_BUFFER_SIZE,
            channel_initialization_timeout: DEFAULT_CHANNEL_INITIALIZATION_TIMEOUT,
            max_pending_connections: DEFAULT_MAX_PENDING_CONNECTIONS,
            max_output_delay: DEFAULT_MAX_OUTPUT_DELAY,
            manual_addressing: false,
        }
    }

    pub fn kind(&self) -> TransportKind {
        self.kind
    }

    pub fn scheme(&self) -> &'static str {
        self.kind.scheme()
    }

    pub fn transfer_mode(&self) -> TransferMode {
        self.transfer_mode
    }

    pub fn max_buffer_pool_size(&self) -> u64 {
        self.max_buffer_pool_size
    }

    pub fn max_buffer_size(&self) -> u32 {
        self.max_buffer_size
    }

    pub fn max_received_message_size(&self) -> u64 {
        self.max_received_message_size
    }

    pub fn connection_buffer_size(&self) -> u32 {
        self.connection_buffer_size
    }

    pub fn channel_initialization_timeout(&self) -> Duration {
        self.channel_initialization_timeout
    }

    pub fn max_pending_connections(&self) -> u32 {
        self.max_pending_connections
    }

    pub fn max_output_delay(&self) -> Duration {
        self.max_output_delay
    }

    pub fn manual_addressing(&self) -> bool {
        self.manual_addressing
    }

    pub fn set_transfer_mode(&mut self, mode: TransferMode) {
        self.transfer_mode = mode;
    }

    pub fn set_max_buffer_pool_size(&mut self, size: u64) {
        self.max_buffer_pool_size = size;
    }

    pub fn set_max_buffer_size(&mut self, size: u32) {
        self.max_buffer_size = size;
    }

    pub fn set_max_received_message_size(&mut self, size: u64) {
        self.max_received_message_size = size;
    }

    pub fn with_transfer_mode(mut self, mode: TransferMode) -> Self {
        self.transfer_mode = mode;
        self
    }

    pub fn with_max_buffer_size(mut self, size: u32) -> Self {
        self.max_buffer_size = size;
        self
    }

    pub fn with_max_received_message_size(mut self, size: u64) -> Self {
        self.max_received_message_size = size;
        self
    }

    pub fn with_connection_buffer_size(mut self, size: u32) -> Self {
        self.connection_buffer_size = size;
        self
    }

    pub fn with_channel_initialization_timeout(mut self, timeout: Duration) -> Self {
        self.channel_initialization_timeout = timeout;
        self
    }

    pub fn with_max_pending_connections(mut self, count: u32) -> Self {
        self.max_pending_connections = count;
        self
    }

    pub fn with_max_output_delay(mut self, delay: Duration) -> Self {
        self.max_output_delay = delay;
        self
    }

    pub fn with_manual_addressing(mut self, enabled: bool) -> Self {
        self.manual_addressing = enabled;
        self
    }

    /// 判断两层的全部有效设置是否一致。
    ///
    /// # 教案式说明
    /// - **意图 (Why)**：识别器据此确认外部管线里的隐式设置与本 profile 的默认模板一致；
    /// - **执行 (How)**：解构全部字段逐一比较，新增字段若未纳入比较会在编译期暴露。
    pub fn matches(&self, other: &TransportLayer) -> bool {
        let TransportLayer {
            kind,
            transfer_mode,
            max_buffer_pool_size,
            max_buffer_size,
            max_received_message_size,
            connection_buffer_size,
            channel_initialization_timeout,
            max_pending_connections,
            max_output_delay,
            manual_addressing,
        } = self;

        *kind == other.kind
            && *transfer_mode == other.transfer_mode
            && *max_buffer_pool_size == other.max_buffer_pool_size
            && *max_buffer_size == other.max_buffer_size
            && *max_received_message_size == other.max_received_message_size
            && *connection_buffer_size == other.connection_buffer_size
            && *channel_initialization_timeout == other.channel_initialization_timeout
            && *max_pending_connections == other.max_pending_connections
            && *max_output_delay == other.max_output_delay
            && *manual_addressing == other.manual_addressing
    }
}
