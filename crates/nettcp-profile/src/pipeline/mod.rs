//! 设置与协议层序列之间的双向映射。
//!
//! - [`composer`]：设置 → 规范层序列；
//! - [`recognizer`]：任意层序列 → 设置（仅当形状与本 profile 完全一致时）。

pub mod composer;
pub mod recognizer;

pub use composer::compose;
pub use recognizer::{MAX_RECOGNIZED_LAYERS, try_recognize};
