//! 安全模式词汇与可约简的模式掩码。
//!
//! # 教案式说明
//! - **意图 (Why)**：识别管线时，证据（是否存在传输安全层、是否存在消息安全层）是逐步到达的；
//!   用位掩码表示“仍与证据一致的模式集合”，每条证据做一次交集即可完成约束传播；
//! - **契约 (What)**：掩码只在协商期间短暂存在，最终必须收敛为恰好一个模式才能转换为
//!   [`SecurityMode`]，否则视为协商失败；
//! - **风险 (Trade-offs)**：`Message` 模式在词汇与掩码运算中完整存在，但平台策略总是拒绝它，
//!   这一不对称是刻意保留的。

use core::fmt;
use core::ops::{BitAnd, BitAndAssign, BitOr, Not};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 安全模式。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SecurityMode {
    /// 不启用任何安全层。
    None = 0,
    /// 仅传输级安全。
    #[default]
    Transport = 1,
    /// 仅消息级安全。
    Message = 2,
    /// 传输级保护 + 消息级客户端凭证。
    TransportWithMessageCredential = 3,
}

impl SecurityMode {
    pub const ALL: [SecurityMode; 4] = [
        SecurityMode::None,
        SecurityMode::Transport,
        SecurityMode::Message,
        SecurityMode::TransportWithMessageCredential,
    ];

    /// 判断原始判别值是否落在四个已定义模式之内。
    pub const fn is_defined(raw: u8) -> bool {
        raw <= SecurityMode::TransportWithMessageCredential as u8
    }

    /// 该模式是否需要消息安全层。
    pub const fn uses_message_security(self) -> bool {
        matches!(
            self,
            SecurityMode::Message | SecurityMode::TransportWithMessageCredential
        )
    }

    /// 该模式是否需要传输安全层。
    pub const fn uses_transport_security(self) -> bool {
        matches!(
            self,
            SecurityMode::Transport | SecurityMode::TransportWithMessageCredential
        )
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SecurityMode::None => "None",
            SecurityMode::Transport => "Transport",
            SecurityMode::Message => "Message",
            SecurityMode::TransportWithMessageCredential => "TransportWithMessageCredential",
        }
    }
}

impl fmt::Display for SecurityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 原始判别值不是已定义的安全模式。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("`{raw}` is not a defined security mode")]
pub struct UndefinedModeError {
    pub raw: u8,
}

impl TryFrom<u8> for SecurityMode {
    type Error = UndefinedModeError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        if !SecurityMode::is_defined(raw) {
            return Err(UndefinedModeError { raw });
        }
        Ok(SecurityMode::ALL[usize::from(raw)])
    }
}

/// 掩码未收敛为恰好一个模式。
///
/// 只会因协商器自身的逻辑缺陷出现，调用方输入不可能触发它。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("unified security mode {mask:?} does not reduce to exactly one mode")]
pub struct InvalidModeError {
    pub mask: UnifiedSecurityMode,
}

/// 仍与已观察证据一致的安全模式集合。
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnifiedSecurityMode(u8);

impl UnifiedSecurityMode {
    pub const EMPTY: Self = Self(0);
    pub const NONE: Self = Self(1 << SecurityMode::None as u8);
    pub const TRANSPORT: Self = Self(1 << SecurityMode::Transport as u8);
    pub const MESSAGE: Self = Self(1 << SecurityMode::Message as u8);
    pub const TRANSPORT_WITH_MESSAGE_CREDENTIAL: Self =
        Self(1 << SecurityMode::TransportWithMessageCredential as u8);
    pub const ALL: Self = Self::NONE
        .union(Self::TRANSPORT)
        .union(Self::MESSAGE)
        .union(Self::TRANSPORT_WITH_MESSAGE_CREDENTIAL);

    /// 并集；`const` 版本的 `|`，用于声明常量掩码。
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// 集合中剩余模式的个数。
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// 是否恰好收敛为一个模式。
    pub const fn is_single(self) -> bool {
        self.len() == 1
    }

    pub const fn contains(self, mode: SecurityMode) -> bool {
        self.0 & (1 << mode as u8) != 0
    }

    /// 集合中的模式，按判别值升序。
    pub fn modes(self) -> impl Iterator<Item = SecurityMode> {
        SecurityMode::ALL
            .into_iter()
            .filter(move |mode| self.contains(*mode))
    }
}

impl From<SecurityMode> for UnifiedSecurityMode {
    fn from(mode: SecurityMode) -> Self {
        Self(1 << mode as u8)
    }
}

impl TryFrom<UnifiedSecurityMode> for SecurityMode {
    type Error = InvalidModeError;

    fn try_from(mask: UnifiedSecurityMode) -> Result<Self, Self::Error> {
        if !mask.is_single() {
            return Err(InvalidModeError { mask });
        }
        let raw = mask.0.trailing_zeros() as u8;
        SecurityMode::try_from(raw).map_err(|_| InvalidModeError { mask })
    }
}

impl BitAnd for UnifiedSecurityMode {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for UnifiedSecurityMode {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOr for UnifiedSecurityMode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl Not for UnifiedSecurityMode {
    type Output = Self;

    /// 在四个已定义模式范围内取补集。
    fn not(self) -> Self {
        Self(!self.0 & Self::ALL.0)
    }
}

impl fmt::Debug for UnifiedSecurityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.modes()).finish()
    }
}
