//! 由 profile 设置组装协议层序列。

use nettcp_layers::ProtocolStack;
use tracing::trace;

use crate::error::ProfileError;
use crate::profile::TransportProfile;
use crate::security::{negotiator, policy};

/// 组装 profile 的规范协议层序列。
///
/// # 教案式说明
/// - **意图 (Why)**：把命名设置落实为传输运行时可以直接装配的层序列；
/// - **执行 (How)**：
///   1. 先以平台支持策略校验安全设置，违规即返回错误；
///   2. 按固定顺序输出 `[消息安全?, 编码, 传输安全?, 传输]`；
/// - **契约 (What)**：顺序是本 profile 协议栈的不变量，不可配置；返回值是模板的拷贝，
///   调用方修改它不会影响 profile；
/// - **风险 (Trade-offs)**：每次调用都会克隆模板，层数固定且很少，开销可以忽略。
pub fn compose(profile: &TransportProfile) -> Result<ProtocolStack, ProfileError> {
    let security = profile.security();
    policy::check_settings(security)?;

    let mut stack = ProtocolStack::new();
    if let Some(message_security) = negotiator::create_message_security(security)? {
        stack.push(message_security);
    }
    stack.push(profile.encoding_template().clone());
    if let Some(transport_security) = negotiator::create_transport_security(security) {
        stack.push(transport_security);
    }
    stack.push(profile.transport_template().clone());

    trace!(layers = stack.len(), mode = %security.mode(), "net.tcp pipeline composed");
    Ok(stack)
}

#[cfg(test)]
mod tests {
    use nettcp_layers::{
        AlgorithmSuite, LayerCapability, MessageCredentialType, ProtocolLayer, TransferMode,
    };

    use super::*;
    use crate::security::{MessageSecuritySettings, SecurityMode, SecuritySettings};

    fn profile_with(settings: SecuritySettings) -> TransportProfile {
        let mut profile = TransportProfile::new();
        profile.set_security(Some(settings)).unwrap();
        profile
    }

    #[test]
    fn mixed_mode_places_message_security_first_and_transport_last() {
        let credential = MessageCredentialType::UserName;
        let message = MessageSecuritySettings::new(credential, AlgorithmSuite::Basic256);
        let mode = SecurityMode::TransportWithMessageCredential;
        let profile = profile_with(SecuritySettings::new(mode).with_message(message));
        let stack = compose(&profile).unwrap();
        assert_eq!(
            stack.capabilities(),
            [
                LayerCapability::MessageSecurity,
                LayerCapability::Encoding,
                LayerCapability::TransportSecurity,
                LayerCapability::Transport,
            ]
        );
    }

    #[test]
    fn default_profile_uses_transport_security() {
        let stack = compose(&TransportProfile::new()).unwrap();
        assert_eq!(
            stack.capabilities(),
            [
                LayerCapability::Encoding,
                LayerCapability::TransportSecurity,
                LayerCapability::Transport,
            ]
        );
    }

    #[test]
    fn returned_layers_are_copies_of_the_templates() {
        let profile = profile_with(SecuritySettings::new(SecurityMode::None));
        let stack = compose(&profile).unwrap();

        let mut layers = stack.into_vec();
        if let Some(ProtocolLayer::Transport(transport)) = layers.last_mut() {
            transport.set_transfer_mode(TransferMode::Streamed);
        }
        assert_eq!(profile.transfer_mode(), TransferMode::Buffered);
    }

    #[test]
    fn policy_failure_stops_composition() {
        let profile = profile_with(SecuritySettings::new(SecurityMode::Message));
        let err = compose(&profile).unwrap_err();
        assert_eq!(err.unsupported_field(), Some("Mode"));
    }
}
