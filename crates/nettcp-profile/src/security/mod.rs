//! 安全模式模型、平台支持策略与安全协商。
//!
//! - [`mode`]：安全模式词汇与可约简掩码；
//! - [`policy`]：受限平台的模式/凭证兼容矩阵；
//! - [`negotiator`]：正向生成安全层、反向由安全层还原设置；
//! - [`settings`]：profile 持有的安全设置聚合。

pub mod mode;
pub mod negotiator;
pub mod policy;
pub mod settings;

pub use mode::{InvalidModeError, SecurityMode, UndefinedModeError, UnifiedSecurityMode};
pub use policy::{PlatformSupportPolicy, check_settings};
pub use settings::{MessageSecuritySettings, SecuritySettings, TransportSecuritySettings};
