//! L3 网络层数据包
//!
//! 文本形式：`src_ip|dst_ip|ttl|checksum|<L4 文本>`
//!
//! 处理逻辑（相对于网卡 IP 与掩码）：
//! - 目的地址就是本机：交给 L4 写入本地内存；
//! - 外部 -> 本网段：TTL 减一，重算校验和，进接收队列 (RQ)；
//! - 本网段 -> 外部：源地址改写为本机 IP，TTL 减一，重算校验和，进发送队列 (TQ)；
//! - 外部 -> 外部（过境）：TTL 减一，重算校验和，进发送队列；
//! - 其余情况（源和目的都在本网段，但不是发给本机）直接丢弃。
//!
//! TTL 减到 0 的包一律丢弃。

use std::fmt;
use std::str::FromStr;

use tracing::trace;

use super::addr::Ipv4;
use super::checksum::Checksum16;
use super::error::ParseError;
use super::fields::{FIELD_DELIM, extract_between_delimiters};
use super::l4::{L4Segment, parse_num};
use super::generic::{MemoryDest, NicIdentity};
use crate::nic::PortTable;

/// 网络层数据包
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct L3Packet {
    pub src_ip: Ipv4,
    pub dst_ip: Ipv4,
    pub ttl: u8,
    pub checksum: u16,
    pub payload: L4Segment,
}

/// 源/目的地址相对本机网段的归类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    ToMe,
    Incoming,
    Outgoing,
    Transit,
    /// 源和目的都在本网段，且目的不是本机
    Local,
}

impl L3Packet {
    pub fn new(src_ip: Ipv4, dst_ip: Ipv4, ttl: u8, checksum: u16, payload: L4Segment) -> Self {
        Self {
            src_ip,
            dst_ip,
            ttl,
            checksum,
            payload,
        }
    }

    /// 构造一个校验和正确的数据包
    pub fn with_valid_checksum(src_ip: Ipv4, dst_ip: Ipv4, ttl: u8, payload: L4Segment) -> Self {
        let mut pkt = Self::new(src_ip, dst_ip, ttl, 0, payload);
        pkt.checksum = pkt.calc_checksum();
        pkt
    }

    /// 源 IP、目的 IP、TTL、L4 头部、L4 数据依次累加；不含自身的校验和字段。
    pub fn calc_checksum(&self) -> u16 {
        self.sum_fields(Checksum16::new()).value()
    }

    /// L3 字段（不含 L3 校验和）按顺序累加
    pub(crate) fn sum_fields(&self, acc: Checksum16) -> Checksum16 {
        let acc = acc
            .add_bytes(self.src_ip.octets())
            .add_bytes(self.dst_ip.octets())
            .add_byte(self.ttl);
        self.payload.sum_into(acc)
    }

    pub fn validate(&self) -> bool {
        self.calc_checksum() == self.checksum && self.ttl > 0
    }

    fn direction(&self, nic: &NicIdentity) -> Direction {
        if self.dst_ip == nic.ip {
            return Direction::ToMe;
        }
        let src_in = self.src_ip.same_net(&nic.ip, nic.mask);
        let dst_in = self.dst_ip.same_net(&nic.ip, nic.mask);
        match (src_in, dst_in) {
            (false, true) => Direction::Incoming,
            (true, false) => Direction::Outgoing,
            (false, false) => Direction::Transit,
            (true, true) => Direction::Local,
        }
    }

    /// TTL 减一并重算校验和；减到 0 时返回 `false`。
    fn hop(&mut self) -> bool {
        self.ttl = self.ttl.saturating_sub(1);
        if self.ttl == 0 {
            return false;
        }
        self.checksum = self.calc_checksum();
        true
    }

    /// 处理数据包并返回存放位置；返回 `None` 表示丢弃。
    pub fn process(&mut self, nic: &NicIdentity, ports: &mut PortTable) -> Option<MemoryDest> {
        if !self.validate() {
            return None;
        }

        let dir = self.direction(nic);
        trace!(direction = ?dir, src = %self.src_ip, dst = %self.dst_ip, ttl = self.ttl, "L3 归类");

        match dir {
            Direction::ToMe => self.payload.process(ports),
            Direction::Incoming => self.hop().then_some(MemoryDest::ReceptionQueue),
            Direction::Outgoing => {
                self.src_ip = nic.ip;
                self.hop().then_some(MemoryDest::TransmissionQueue)
            }
            Direction::Transit => self.hop().then_some(MemoryDest::TransmissionQueue),
            Direction::Local => None,
        }
    }

    pub fn serialize(&self) -> String {
        self.to_string()
    }
}

impl FromStr for L3Packet {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = move |index| {
            extract_between_delimiters(s, FIELD_DELIM, index, Some(index))
                .ok_or(ParseError::MissingField { index })
        };
        let src_ip = field(0)?.parse()?;
        let dst_ip = field(1)?.parse()?;
        let ttl = parse_num(field(2)?, "ttl")?;
        let checksum = parse_num(field(3)?, "checksum")?;
        let payload = extract_between_delimiters(s, FIELD_DELIM, 4, None)
            .ok_or(ParseError::MissingField { index: 4 })?
            .parse()?;

        Ok(Self {
            src_ip,
            dst_ip,
            ttl,
            checksum,
            payload,
        })
    }
}

impl fmt::Display for L3Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}|{}",
            self.src_ip, self.dst_ip, self.ttl, self.checksum, self.payload
        )
    }
}
