//! # 安全协商器
//!
//! ## 角色定位（Why）
//! - 正向：依据安全模式决定管线中需要哪些安全层，并把设置落实到层上；
//! - 反向：依据管线中出现的安全层推断唯一一致的安全模式，并还原出安全设置。
//!
//! ## 反向流程（How）
//! 1. [`mode_from_transport_security`] 依据是否存在传输安全候选层给出初始掩码；
//! 2. [`try_create`] 依据是否存在消息安全层再做一次交集，掩码必须收敛为单一模式；
//! 3. [`set_transport_security`] 把候选层的形状写回传输设置，形状与模式不符时失败；
//! 4. 消息安全层必须与正向路径会为同一设置生成的层一致。
//!
//! ## 契约（What）
//! - 所有函数均为无状态纯函数；
//! - 反向失败返回 `None`，表示“管线不属于本 profile”，而非错误。

use nettcp_layers::{MessageSecurityLayer, ProtocolLayer, TransportSecurityLayer};
use tracing::{debug, trace};

use crate::error::ProfileError;

use super::mode::{SecurityMode, UnifiedSecurityMode};
use super::policy::FIELD_MODE;
use super::settings::{MessageSecuritySettings, SecuritySettings, TransportSecuritySettings};

/// 携带消息级凭证的模式集合。
const MESSAGE_BEARING: UnifiedSecurityMode =
    UnifiedSecurityMode::MESSAGE.union(UnifiedSecurityMode::TRANSPORT_WITH_MESSAGE_CREDENTIAL);

/// 为给定设置生成消息安全层。
///
/// - `None`/`Transport`：不需要消息安全层，返回 `Ok(None)`；
/// - `TransportWithMessageCredential`：按消息设置生成层；
/// - `Message`：完整的消息安全超出本 profile 的能力，返回 `UnsupportedSetting{field: "Mode"}`。
pub fn create_message_security(
    settings: &SecuritySettings,
) -> Result<Option<MessageSecurityLayer>, ProfileError> {
    match settings.mode() {
        SecurityMode::None | SecurityMode::Transport => Ok(None),
        SecurityMode::TransportWithMessageCredential => {
            Ok(Some(message_security_for(settings.message())))
        }
        SecurityMode::Message => {
            let mode = SecurityMode::Message.as_str();
            Err(ProfileError::unsupported(FIELD_MODE, mode))
        }
    }
}

/// 为给定设置生成传输安全层；不使用传输安全的模式返回 `None`。
pub fn create_transport_security(settings: &SecuritySettings) -> Option<TransportSecurityLayer> {
    if !settings.mode().uses_transport_security() {
        return None;
    }
    let transport = settings.transport();
    Some(TransportSecurityLayer::new(
        transport.client_credential_type(),
        transport.protection_level(),
    ))
}

fn message_security_for(settings: &MessageSecuritySettings) -> MessageSecurityLayer {
    let credential = settings.client_credential_type();
    MessageSecurityLayer::new(credential, settings.algorithm_suite())
}

/// 依据传输安全候选层的有无给出初始模式掩码。
pub fn mode_from_transport_security(
    transport_security: Option<&ProtocolLayer>,
) -> UnifiedSecurityMode {
    match transport_security {
        None => UnifiedSecurityMode::NONE | UnifiedSecurityMode::MESSAGE,
        Some(_) => {
            UnifiedSecurityMode::TRANSPORT | UnifiedSecurityMode::TRANSPORT_WITH_MESSAGE_CREDENTIAL
        }
    }
}

/// 把传输安全候选层的形状写回传输设置。
///
/// # 教案式说明
/// - **契约 (What)**：需要传输安全的模式必须看到一个真正的传输安全层（而非不透明层），
///   否则返回 `false`；不需要传输安全的模式要求候选层缺席；
/// - **后置条件**：返回 `true` 时 `accumulator` 已反映层中的凭证与保护级别
///   （不需要传输安全时保持原值）。
pub fn set_transport_security(
    transport_security: Option<&ProtocolLayer>,
    mode: SecurityMode,
    accumulator: &mut TransportSecuritySettings,
) -> bool {
    match (mode.uses_transport_security(), transport_security) {
        (false, None) => true,
        (false, Some(_)) => false,
        (true, Some(ProtocolLayer::TransportSecurity(layer))) => {
            accumulator.set_client_credential_type(layer.client_credential_type());
            accumulator.set_protection_level(layer.protection_level());
            true
        }
        (true, _) => false,
    }
}

/// 依据观察到的安全层反推安全设置。
///
/// # 教案式说明
/// - **参数 (What)**：
///   - `message_security`：管线中的消息安全层（若有）；
///   - `mode`：由 [`mode_from_transport_security`] 得到的初始掩码；
///   - `reliable_session`：是否处于可靠会话包装之下，本 profile 恒为 `false`。可靠会话要求
///     消息安全层声明 `require_cancellation`，而正向路径生成的层总是如此，第 4 步的层匹配
///     已经覆盖这条约束，因此该参数只作为诊断字段写入日志；
///   - `transport_security`：传输安全候选层（若有）；
///   - `transport`：传输设置累加器，通常传入默认值。
/// - **返回 (What)**：收敛成功返回完整的 [`SecuritySettings`]；任何一步不一致返回 `None`。
/// - **风险 (Trade-offs)**：这里不套用平台支持策略，例如仅有消息安全层时会如实报告 `Message` 模式。
pub fn try_create(
    message_security: Option<&MessageSecurityLayer>,
    mut mode: UnifiedSecurityMode,
    reliable_session: bool,
    transport_security: Option<&ProtocolLayer>,
    mut transport: TransportSecuritySettings,
) -> Option<SecuritySettings> {
    if message_security.is_some() {
        mode &= MESSAGE_BEARING;
    } else {
        mode &= !MESSAGE_BEARING;
    }

    if !mode.is_single() {
        debug!(?mode, "security mode evidence is ambiguous or contradictory");
        return None;
    }
    let mode = match SecurityMode::try_from(mode) {
        Ok(mode) => mode,
        Err(err) => unreachable!("mask was checked to hold a single mode: {err}"),
    };
    trace!(%mode, "security mode negotiated from pipeline evidence");

    if !set_transport_security(transport_security, mode, &mut transport) {
        debug!(%mode, "transport security layer does not fit the negotiated mode");
        return None;
    }

    let mut settings = SecuritySettings::new(mode).with_transport(transport);
    if let Some(layer) = message_security {
        let credential = layer.client_credential_type();
        let message = MessageSecuritySettings::new(credential, layer.algorithm_suite());
        if !layer.matches(&message_security_for(&message)) {
            debug!(
                reliable_session,
                require_cancellation = layer.require_cancellation(),
                "message security layer carries settings this profile never produces"
            );
            return None;
        }
        settings = settings.with_message(message);
    }

    Some(settings)
}
