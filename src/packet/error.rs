//! 文本记录解析错误

use thiserror::Error;

/// 从文本构造数据包时可能出现的错误。
///
/// 这些错误只影响当前一行输入，转发引擎会跳过该行继续处理。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing field {index} in record")]
    MissingField { index: usize },
    #[error("invalid MAC address `{0}`")]
    BadMac(String),
    #[error("invalid IPv4 address `{0}`")]
    BadIpv4(String),
    #[error("invalid {what} `{text}`")]
    BadNumber { what: &'static str, text: String },
    #[error("invalid hex byte `{0}`")]
    BadHexByte(String),
    #[error("unrecognized record `{0}`")]
    Unrecognized(String),
}
