//! L4 传输层分段
//!
//! 文本形式：`src_port|dst_port|address|hh hh hh ...`

use std::fmt;
use std::str::FromStr;

use tracing::trace;

use super::checksum::Checksum16;
use super::error::ParseError;
use super::fields::{FIELD_DELIM, extract_between_delimiters};
use super::generic::MemoryDest;
use crate::nic::PortTable;

/// 传输层分段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct L4Segment {
    pub src_port: u16,
    pub dst_port: u16,
    /// 写入端口缓冲区的起始偏移
    pub address: u32,
    pub data: Vec<u8>,
}

impl L4Segment {
    pub fn new(src_port: u16, dst_port: u16, address: u32, data: Vec<u8>) -> Self {
        Self {
            src_port,
            dst_port,
            address,
            data,
        }
    }

    /// 是否存在 (src_port, dst_port) 完全匹配的开放端口
    pub fn validate(&self, ports: &PortTable) -> bool {
        ports.find(self.src_port, self.dst_port).is_some()
    }

    /// 把数据写入匹配端口的缓冲区。
    ///
    /// 没有匹配端口、或 `address + data.len()` 超出缓冲区容量时返回 `None`，
    /// 此时缓冲区保持不变。
    pub fn process(&self, ports: &mut PortTable) -> Option<MemoryDest> {
        let port = ports.find_mut(self.src_port, self.dst_port)?;
        if !port.write_at(self.address, &self.data) {
            trace!(
                address = self.address,
                len = self.data.len(),
                "写入越界，丢弃"
            );
            return None;
        }
        Some(MemoryDest::LocalMemory)
    }

    /// 把 L4 头部和数据按声明顺序累加进校验和
    pub(crate) fn sum_into(&self, acc: Checksum16) -> Checksum16 {
        acc.add_u16(self.src_port)
            .add_u16(self.dst_port)
            .add_address(self.address)
            .add_bytes(&self.data)
    }

    pub fn serialize(&self) -> String {
        self.to_string()
    }
}

fn field<'a>(s: &'a str, index: usize) -> Result<&'a str, ParseError> {
    extract_between_delimiters(s, FIELD_DELIM, index, Some(index))
        .ok_or(ParseError::MissingField { index })
}

pub(crate) fn parse_num<T: FromStr>(text: &str, what: &'static str) -> Result<T, ParseError> {
    text.trim().parse().map_err(|_| ParseError::BadNumber {
        what,
        text: text.to_string(),
    })
}

impl FromStr for L4Segment {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let src_port = parse_num(field(s, 0)?, "source port")?;
        let dst_port = parse_num(field(s, 1)?, "destination port")?;
        let address = parse_num(field(s, 2)?, "address")?;
        let data_str = extract_between_delimiters(s, FIELD_DELIM, 3, None)
            .ok_or(ParseError::MissingField { index: 3 })?;

        let data = data_str
            .split_whitespace()
            .map(|tok| u8::from_str_radix(tok, 16).map_err(|_| ParseError::BadHexByte(tok.to_string())))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            src_port,
            dst_port,
            address,
            data,
        })
    }
}

impl fmt::Display for L4Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}|", self.src_port, self.dst_port, self.address)?;
        for (i, b) in self.data.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}
