#![deny(unsafe_code)]
#![doc = r#"
# nettcp-profile

## 设计动机（Why）
- **定位**：net.tcp 传输 profile 把少量命名设置（安全模式、凭证类型、缓冲区与配额、传输模式）
  映射为一条有序协议层序列，并能反向把一条外部序列识别回等价的设置；
- **架构角色**：位于配置加载器与传输运行时之间，只负责“应该装配哪些层、按什么顺序”，
  字节如何在套接字上流动、消息如何序列化都不在本 crate 的职责内。

## 核心契约（What）
- [`TransportProfile::create_pipeline`]：先执行平台支持策略，再输出
  `[消息安全?, 编码, 传输安全?, 传输]`；
- [`TransportProfile::try_recognize`]：形状不符时返回 `None`，这是常态而非错误；
- 错误集中在 [`ProfileError`]，均为配置期错误，不应重试。

## 实现策略（How）
- 安全模式协商以可约简位掩码 [`UnifiedSecurityMode`] 完成约束传播；
- 协议层是带能力标签的和类型（见 `nettcp-layers`），分类依赖穷尽匹配而非运行时类型探测；
- 识别成功前会以默认模板做一次全量匹配，保证 profile 只认领自己能产出的管线。

## 风险与考量（Trade-offs）
- `Message` 模式在词汇中完整存在，但平台策略总是拒绝它；识别器仍会如实报告该模式；
- 全部操作同步、无 I/O、无内部锁，实例应在配置完成后以不可变方式交给运行时。
"#]

pub mod config;
pub mod error;
pub mod pipeline;
pub mod profile;
pub mod security;

pub use config::ProfileConfig;
pub use error::ProfileError;
pub use profile::TransportProfile;
pub use security::{
    InvalidModeError, MessageSecuritySettings, PlatformSupportPolicy, SecurityMode,
    SecuritySettings, TransportSecuritySettings, UnifiedSecurityMode,
};

pub use nettcp_layers as layers;
