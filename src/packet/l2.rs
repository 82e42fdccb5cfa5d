//! L2 链路层帧
//!
//! 文本形式：`src_mac|dst_mac|<L3 文本>|checksum`，注意校验和在末尾。
//! 帧被接收后 L2 封装即被剥离，序列化结果只有 L3 部分。

use std::fmt;
use std::str::FromStr;

use super::addr::MacAddr;
use super::checksum::Checksum16;
use super::error::ParseError;
use super::fields::{FIELD_DELIM, extract_between_delimiters};
use super::l3::L3Packet;
use super::l4::parse_num;
use super::generic::{MemoryDest, NicIdentity};
use crate::nic::PortTable;

/// 链路层帧
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct L2Packet {
    pub src_mac: MacAddr,
    pub dst_mac: MacAddr,
    pub checksum: u16,
    pub payload: L3Packet,
}

impl L2Packet {
    pub fn new(src_mac: MacAddr, dst_mac: MacAddr, checksum: u16, payload: L3Packet) -> Self {
        Self {
            src_mac,
            dst_mac,
            checksum,
            payload,
        }
    }

    /// 构造一个校验和正确的帧（L3 校验和保持 `payload` 中的值）
    pub fn with_valid_checksum(src_mac: MacAddr, dst_mac: MacAddr, payload: L3Packet) -> Self {
        let mut frame = Self::new(src_mac, dst_mac, 0, payload);
        frame.checksum = frame.calc_checksum();
        frame
    }

    /// 源 MAC、目的 MAC、L3 字段依次累加。
    ///
    /// 与 L3 自身的校验和不同，这里 L3 校验和字段（高字节、低字节）
    /// 紧跟在 TTL 之后参与累加。
    pub fn calc_checksum(&self) -> u16 {
        let l3 = &self.payload;
        let acc = Checksum16::new()
            .add_bytes(self.src_mac.octets())
            .add_bytes(self.dst_mac.octets())
            .add_bytes(l3.src_ip.octets())
            .add_bytes(l3.dst_ip.octets())
            .add_byte(l3.ttl)
            .add_u16(l3.checksum);
        l3.payload.sum_into(acc).value()
    }

    pub fn validate(&self, nic_mac: &MacAddr) -> bool {
        self.dst_mac == *nic_mac && self.calc_checksum() == self.checksum
    }

    pub fn process(&mut self, nic: &NicIdentity, ports: &mut PortTable) -> Option<MemoryDest> {
        self.payload.process(nic, ports)
    }

    /// 剥离 L2 封装，只输出 L3 文本
    pub fn serialize(&self) -> String {
        self.payload.serialize()
    }
}

impl FromStr for L2Packet {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let src_mac = extract_between_delimiters(s, FIELD_DELIM, 0, Some(0))
            .ok_or(ParseError::MissingField { index: 0 })?
            .parse()?;
        let dst_mac = extract_between_delimiters(s, FIELD_DELIM, 1, Some(1))
            .ok_or(ParseError::MissingField { index: 1 })?
            .parse()?;

        // L3 文本位于第二个分隔符之后、最后一个分隔符之前
        let (head, checksum_str) = s
            .rsplit_once(FIELD_DELIM)
            .ok_or(ParseError::MissingField { index: 2 })?;
        let l3_str = extract_between_delimiters(head, FIELD_DELIM, 2, None)
            .ok_or(ParseError::MissingField { index: 2 })?;

        let checksum = parse_num(checksum_str, "checksum")?;
        let payload = l3_str.parse()?;

        Ok(Self {
            src_mac,
            dst_mac,
            checksum,
            payload,
        })
    }
}

/// 完整帧文本（含 L2 封装），用于生成输入记录
impl fmt::Display for L2Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}",
            self.src_mac, self.dst_mac, self.payload, self.checksum
        )
    }
}
