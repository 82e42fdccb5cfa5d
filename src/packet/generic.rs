//! 数据包统一类型
//!
//! 三种数据包以封闭的枚举表示，validate / process / serialize 逐一匹配。

use super::addr::{Ipv4, MacAddr};
use super::l2::L2Packet;
use super::l3::L3Packet;
use super::l4::L4Segment;
use crate::nic::PortTable;

/// 处理结果：数据包应存放到哪里
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryDest {
    /// 接收队列 (RQ)
    ReceptionQueue,
    /// 发送队列 (TQ)
    TransmissionQueue,
    /// 已直接写入开放端口的本地缓冲区
    LocalMemory,
}

/// 网卡身份：MAC、IP 与前缀长度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NicIdentity {
    pub mac: MacAddr,
    pub ip: Ipv4,
    pub mask: u8,
}

/// 任意一层的数据包
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packet {
    L2(L2Packet),
    L3(L3Packet),
    L4(L4Segment),
}

impl Packet {
    pub fn kind(&self) -> &'static str {
        match self {
            Packet::L2(_) => "l2",
            Packet::L3(_) => "l3",
            Packet::L4(_) => "l4",
        }
    }

    pub fn validate(&self, nic: &NicIdentity, ports: &PortTable) -> bool {
        match self {
            Packet::L2(p) => p.validate(&nic.mac),
            Packet::L3(p) => p.validate(),
            Packet::L4(p) => p.validate(ports),
        }
    }

    /// 修改数据包并决定存放位置；`None` 表示丢弃
    pub fn process(&mut self, nic: &NicIdentity, ports: &mut PortTable) -> Option<MemoryDest> {
        match self {
            Packet::L2(p) => p.process(nic, ports),
            Packet::L3(p) => p.process(nic, ports),
            Packet::L4(p) => p.process(ports),
        }
    }

    pub fn serialize(&self) -> String {
        match self {
            Packet::L2(p) => p.serialize(),
            Packet::L3(p) => p.serialize(),
            Packet::L4(p) => p.serialize(),
        }
    }
}

impl From<L2Packet> for Packet {
    fn from(p: L2Packet) -> Self {
        Packet::L2(p)
    }
}

impl From<L3Packet> for Packet {
    fn from(p: L3Packet) -> Self {
        Packet::L3(p)
    }
}

impl From<L4Segment> for Packet {
    fn from(p: L4Segment) -> Self {
        Packet::L4(p)
    }
}
