//! # 管线识别器
//!
//! ## 角色定位（Why）
//! - 传输运行时可能拿到一份来源不明的协议层序列，需要判断它是否“正是本 profile 会产出的形状”，
//!   若是则还原出等价的 profile；
//! - 识别失败是常态而非异常：绝大多数外部管线都不属于本 profile，只返回 `None`。
//!
//! ## 执行逻辑（How）
//! 1. 层数超过 [`MAX_RECOGNIZED_LAYERS`] 直接拒绝，不检查内容；
//! 2. 单遍分类：消息安全、net.tcp 传输、二进制编码，其余层作为唯一的传输安全候选；
//! 3. 传输层与编码层缺一不可；
//! 4. 交给安全协商器反推安全设置；
//! 5. 以默认模板为基础套用层中的命名设置，再要求模板与层完全匹配，
//!    保证 profile 只认领自己能够产出的管线。
//!
//! ## 风险提示（Trade-offs）
//! - 这里不套用平台支持策略，识别报告的是管线里“实际存在”的组合。

use nettcp_layers::{
    EncodingFormat, EncodingLayer, MessageSecurityLayer, ProtocolLayer, TransportKind,
    TransportLayer,
};
use tracing::{debug, trace};

use crate::profile::TransportProfile;
use crate::security::{TransportSecuritySettings, negotiator};

/// 可识别管线的最大层数。
pub const MAX_RECOGNIZED_LAYERS: usize = 6;

/// 识别失败的原因，仅用于诊断日志。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Rejection {
    TooManyLayers,
    AmbiguousTransportSecurity,
    MissingTransport,
    MissingEncoding,
    SecurityMismatch,
    NamedSettingOutOfRange,
    TransportMismatch,
    EncodingMismatch,
}

impl Rejection {
    fn as_str(self) -> &'static str {
        match self {
            Rejection::TooManyLayers => "too_many_layers",
            Rejection::AmbiguousTransportSecurity => "ambiguous_transport_security",
            Rejection::MissingTransport => "missing_transport",
            Rejection::MissingEncoding => "missing_encoding",
            Rejection::SecurityMismatch => "security_mismatch",
            Rejection::NamedSettingOutOfRange => "named_setting_out_of_range",
            Rejection::TransportMismatch => "transport_mismatch",
            Rejection::EncodingMismatch => "encoding_mismatch",
        }
    }
}

/// 单遍分类后的各个槽位。
#[derive(Default)]
struct Slots<'a> {
    message_security: Option<&'a MessageSecurityLayer>,
    transport: Option<&'a TransportLayer>,
    encoding: Option<&'a EncodingLayer>,
    other: Option<&'a ProtocolLayer>,
}

impl<'a> Slots<'a> {
    fn classify(layers: &'a [ProtocolLayer]) -> Result<Self, Rejection> {
        let mut slots = Slots::default();
        for layer in layers {
            match layer {
                ProtocolLayer::MessageSecurity(message_security) => {
                    slots.message_security = Some(message_security);
                }
                // 非 net.tcp 的传输层同样占据传输槽位，但不计作有效传输。
                ProtocolLayer::Transport(transport) => {
                    let tcp = transport.kind() == TransportKind::Tcp;
                    slots.transport = tcp.then_some(transport);
                }
                ProtocolLayer::Encoding(encoding) => {
                    let binary = encoding.format() == EncodingFormat::Binary;
                    slots.encoding = binary.then_some(encoding);
                }
                ProtocolLayer::TransportSecurity(_) | ProtocolLayer::Opaque(_) => {
                    if slots.other.is_some() {
                        return Err(Rejection::AmbiguousTransportSecurity);
                    }
                    slots.other = Some(layer);
                }
            }
        }
        Ok(slots)
    }
}

/// 尝试把任意协议层序列识别为 net.tcp profile。
///
/// # 教案式说明
/// - **契约 (What)**：成功返回完整填充的 [`TransportProfile`]；不属于本 profile 时返回 `None`，
///   不会返回部分填充的结果，也不会 panic；
/// - **诊断 (How)**：失败原因以 `reason` 字段记录在 `debug` 级别日志中。
pub fn try_recognize(layers: &[ProtocolLayer]) -> Option<TransportProfile> {
    match recognize(layers) {
        Ok(profile) => {
            trace!(
                layers = layers.len(),
                mode = %profile.security().mode(),
                "net.tcp pipeline recognized"
            );
            Some(profile)
        }
        Err(rejection) => {
            debug!(
                reason = rejection.as_str(),
                layers = layers.len(),
                "net.tcp pipeline not recognized"
            );
            None
        }
    }
}

fn recognize(layers: &[ProtocolLayer]) -> Result<TransportProfile, Rejection> {
    if layers.len() > MAX_RECOGNIZED_LAYERS {
        return Err(Rejection::TooManyLayers);
    }

    let slots = Slots::classify(layers)?;
    let transport = slots.transport.ok_or(Rejection::MissingTransport)?;
    let encoding = slots.encoding.ok_or(Rejection::MissingEncoding)?;

    let mode = negotiator::mode_from_transport_security(slots.other);
    let security = negotiator::try_create(
        slots.message_security,
        mode,
        false,
        slots.other,
        TransportSecuritySettings::default(),
    )
    .ok_or(Rejection::SecurityMismatch)?;

    let mut profile = TransportProfile::with_security(security);
    profile
        .initialize_from(transport, encoding)
        .map_err(|_| Rejection::NamedSettingOutOfRange)?;

    if !profile.transport_template().matches(transport) {
        return Err(Rejection::TransportMismatch);
    }
    if !profile.encoding_template().matches(encoding) {
        return Err(Rejection::EncodingMismatch);
    }

    Ok(profile)
}
