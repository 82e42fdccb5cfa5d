//! 数据包分类器
//!
//! 只看记录的第一个字段：MAC 形式 -> L2，点分十进制 -> L3，纯数字 -> L4。
//! 判断顺序固定为 MAC、IP、数字。

use super::addr::{Ipv4, MacAddr};
use super::error::ParseError;
use super::fields::{FIELD_DELIM, extract_between_delimiters};
use super::generic::Packet;
use super::l2::L2Packet;
use super::l3::L3Packet;
use super::l4::L4Segment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    L2,
    L3,
    L4,
}

/// 根据第一个字段判断记录类型；无法识别时返回 `None`
pub fn classify(record: &str) -> Option<RecordKind> {
    let first = extract_between_delimiters(record, FIELD_DELIM, 0, Some(0))?;
    if MacAddr::looks_like(first) {
        Some(RecordKind::L2)
    } else if Ipv4::looks_like(first) {
        Some(RecordKind::L3)
    } else if !first.is_empty() && first.bytes().all(|b| b.is_ascii_digit()) {
        Some(RecordKind::L4)
    } else {
        None
    }
}

/// 分类并解析一条文本记录
pub fn parse_packet(record: &str) -> Result<Packet, ParseError> {
    match classify(record) {
        Some(RecordKind::L2) => Ok(record.parse::<L2Packet>()?.into()),
        Some(RecordKind::L3) => Ok(record.parse::<L3Packet>()?.into()),
        Some(RecordKind::L4) => Ok(record.parse::<L4Segment>()?.into()),
        None => Err(ParseError::Unrecognized(record.to_string())),
    }
}
