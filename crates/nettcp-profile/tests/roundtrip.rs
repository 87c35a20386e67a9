//! 组装 → 识别 往返性质验证
//!
//! # 教案级注释概览
//!
//! - **核心目标 (Why)**：profile 承诺“只认领自己能产出的管线”，反过来也必须认领自己产出的每一条管线；
//!   本测试对所有通过平台策略的设置验证 `try_recognize(create_pipeline(s))` 得到与 `s` 等价的 profile。
//! - **设计手法 (How)**：使用 Proptest 随机生成安全模式、凭证、保护级别、算法套件、传输模式、
//!   缓冲区大小与读取配额，过滤掉平台策略拒绝的组合后执行往返。
//! - **合同与边界 (What)**：安全设置只比较生效部分（见 `SecuritySettings::is_equivalent`），
//!   其余命名设置逐项相等。

use nettcp_profile::layers::{
    AlgorithmSuite, LayerCapability, MessageCredentialType, ProtectionLevel, ProtocolLayer,
    ReaderQuotas, TransferMode, TransportCredentialType,
};
use nettcp_profile::{
    MessageSecuritySettings, SecurityMode, SecuritySettings, TransportProfile,
    TransportSecuritySettings, security::check_settings,
};
use proptest::prelude::*;

fn realizable_mode() -> impl Strategy<Value = SecurityMode> {
    prop_oneof![
        Just(SecurityMode::None),
        Just(SecurityMode::Transport),
        Just(SecurityMode::TransportWithMessageCredential),
    ]
}

fn transport_credential() -> impl Strategy<Value = TransportCredentialType> {
    prop_oneof![
        Just(TransportCredentialType::None),
        Just(TransportCredentialType::Basic),
        Just(TransportCredentialType::Digest),
        Just(TransportCredentialType::Ntlm),
        Just(TransportCredentialType::Windows),
        Just(TransportCredentialType::Certificate),
    ]
}

fn message_credential() -> impl Strategy<Value = MessageCredentialType> {
    prop_oneof![
        Just(MessageCredentialType::None),
        Just(MessageCredentialType::Windows),
        Just(MessageCredentialType::UserName),
        Just(MessageCredentialType::Certificate),
        Just(MessageCredentialType::IssuedToken),
    ]
}

fn protection_level() -> impl Strategy<Value = ProtectionLevel> {
    prop_oneof![
        Just(ProtectionLevel::None),
        Just(ProtectionLevel::Sign),
        Just(ProtectionLevel::EncryptAndSign),
    ]
}

fn algorithm_suite() -> impl Strategy<Value = AlgorithmSuite> {
    prop_oneof![
        Just(AlgorithmSuite::Basic256),
        Just(AlgorithmSuite::Basic192),
        Just(AlgorithmSuite::Basic128),
        Just(AlgorithmSuite::TripleDes),
        Just(AlgorithmSuite::Basic256Sha256),
    ]
}

fn transfer_mode() -> impl Strategy<Value = TransferMode> {
    prop_oneof![
        Just(TransferMode::Buffered),
        Just(TransferMode::Streamed),
        Just(TransferMode::StreamedRequest),
        Just(TransferMode::StreamedResponse),
    ]
}

fn supported_security() -> impl Strategy<Value = SecuritySettings> {
    (
        realizable_mode(),
        transport_credential(),
        protection_level(),
        message_credential(),
        algorithm_suite(),
    )
        .prop_map(|(mode, transport_credential, protection, message_credential, suite)| {
            let transport = TransportSecuritySettings::new(transport_credential, protection);
            let message = MessageSecuritySettings::new(message_credential, suite);
            SecuritySettings::new(mode)
                .with_transport(transport)
                .with_message(message)
        })
        .prop_filter("rejected by the platform support policy", |settings| {
            check_settings(settings).is_ok()
        })
}

fn reader_quotas() -> impl Strategy<Value = ReaderQuotas> {
    (1u32..=1024, 1u32..=1 << 20, 1u32..=1 << 20, 1u32..=1 << 16, 1u32..=1 << 20).prop_map(
        |(depth, string, array, bytes, name_table)| ReaderQuotas {
            max_depth: depth,
            max_string_content_length: string,
            max_array_length: array,
            max_bytes_per_read: bytes,
            max_name_table_char_count: name_table,
        },
    )
}

prop_compose! {
    fn supported_profile()(
        security in supported_security(),
        mode in transfer_mode(),
        pool in 0u64..=u64::from(u32::MAX),
        buffer in 1u32..=u32::MAX,
        received in 1u64..=u64::MAX,
        quotas in reader_quotas(),
    ) -> TransportProfile {
        let mut profile = TransportProfile::new();
        profile.set_security(Some(security)).unwrap();
        profile.set_transfer_mode(mode);
        profile.set_max_buffer_pool_size(pool);
        profile.set_max_buffer_size(buffer).unwrap();
        profile.set_max_received_message_size(received).unwrap();
        profile.set_reader_quotas(Some(quotas)).unwrap();
        profile
    }
}

proptest! {
    #[test]
    fn prop_composed_pipeline_is_recognized(profile in supported_profile()) {
        let stack = profile.create_pipeline().unwrap();
        let recognized = TransportProfile::try_recognize(stack.as_slice());
        let capabilities = stack.capabilities();
        prop_assert!(recognized.is_some(), "{:?} not recognized", capabilities);
        let recognized = recognized.unwrap();
        prop_assert!(recognized.is_equivalent(&profile));
        let mode = profile.security().mode();
        prop_assert_eq!(recognized.security().mode(), mode);
    }

    #[test]
    fn prop_message_security_first_transport_last(profile in supported_profile()) {
        let stack = profile.create_pipeline().unwrap();
        let last = stack.last().map(ProtocolLayer::capability);
        prop_assert_eq!(last, Some(LayerCapability::Transport));

        let mode = profile.security().mode();
        let has_message_security = mode == SecurityMode::TransportWithMessageCredential;
        let first = stack.first().map(ProtocolLayer::capability);
        let starts_with_message_security = first == Some(LayerCapability::MessageSecurity);
        prop_assert_eq!(starts_with_message_security, has_message_security);
    }
}

/// 端到端示例：`Mode=None` + 默认设置 → `[Encoding, Transport]`，识别结果与原 profile 完全相等。
#[test]
fn unsecured_default_profile_round_trips_exactly() {
    let mut profile = TransportProfile::new();
    profile
        .set_security(Some(SecuritySettings::new(SecurityMode::None)))
        .unwrap();

    let stack = profile.create_pipeline().unwrap();
    assert_eq!(
        stack.capabilities(),
        [LayerCapability::Encoding, LayerCapability::Transport]
    );

    let recognized = TransportProfile::try_recognize(stack.as_slice()).unwrap();
    assert_eq!(recognized, profile);
}

#[test]
fn default_profile_round_trips_exactly() {
    let profile = TransportProfile::new();
    let stack = profile.create_pipeline().unwrap();
    let recognized = TransportProfile::try_recognize(stack.as_slice()).unwrap();
    assert_eq!(recognized, profile);
    assert_eq!(recognized.scheme(), "net.tcp");
}
