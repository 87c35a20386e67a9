//! # error 模块说明
//!
//! ## 角色定位（Why）
//! - 为 profile 对外暴露的失败语义提供集中定义：空值赋值、平台不支持的组合、越界数值与配置文档错误；
//! - “管线不属于本 profile”不是错误，识别入口以 `Option` 表达，绝不会落到这里。
//!
//! ## 设计要求（What）
//! - 所有错误类型派生 `thiserror::Error`；
//! - 每个变体对应稳定错误码（[`ProfileError::code`]），便于告警聚合；
//! - 这些错误都是调用方配置问题，不可重试。

use std::borrow::Cow;

use thiserror::Error;

/// profile 错误域。
///
/// # 教案式说明
/// - **意图 (Why)**：把配置期与组装期的失败收敛到一个枚举，调用方只需 `?` 传播；
/// - **契约 (What)**：`field` 使用点分路径命名设置项（如 `Transport.ClientCredentialType`），
///   `value` 为被拒绝取值的可读形式；
/// - **风险 (Trade-offs)**：`value` 以 `String` 保存，牺牲少量分配换取诊断可读性。
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// 必填的对象型设置被赋予空值。
    #[error("setting `{field}` must not be null")]
    NullSetting { field: &'static str },

    /// 结构合法但被平台支持策略拒绝的取值，或不受支持的构造路径。
    #[error("setting `{field}` = `{value}` is not supported by the net.tcp platform profile")]
    UnsupportedSetting {
        field: Cow<'static, str>,
        value: String,
    },

    /// 数值设置超出允许范围。
    #[error("setting `{field}` = {value} is out of range: {detail}")]
    OutOfRange {
        field: &'static str,
        value: String,
        detail: &'static str,
    },

    /// 配置文档无法解析。
    #[error("invalid profile configuration: {detail}")]
    Configuration { detail: String },
}

impl ProfileError {
    /// 构造“平台不支持”错误。
    pub fn unsupported(field: impl Into<Cow<'static, str>>, value: impl ToString) -> Self {
        ProfileError::UnsupportedSetting {
            field: field.into(),
            value: value.to_string(),
        }
    }

    /// 稳定错误码。
    pub fn code(&self) -> &'static str {
        match self {
            ProfileError::NullSetting { .. } => "profile.setting.null",
            ProfileError::UnsupportedSetting { .. } => "profile.setting.unsupported",
            ProfileError::OutOfRange { .. } => "profile.setting.out_of_range",
            ProfileError::Configuration { .. } => "profile.config.invalid",
        }
    }

    /// 若为“平台不支持”错误，返回其字段路径。
    pub fn unsupported_field(&self) -> Option<&str> {
        match self {
            ProfileError::UnsupportedSetting { field, .. } => Some(&**field),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for ProfileError {
    fn from(err: toml::de::Error) -> Self {
        ProfileError::Configuration {
            detail: err.to_string(),
        }
    }
}
