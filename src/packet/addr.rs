//! 链路层 / 网络层地址
//!
//! MAC 地址文本形式为 `xx:xx:xx:xx:xx:xx`（小写十六进制），
//! IPv4 地址文本形式为 `d.d.d.d`（十进制）。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ParseError;

pub const MAC_SIZE: usize = 6;
pub const IP_V4_SIZE: usize = 4;

/// MAC 地址
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddr(pub [u8; MAC_SIZE]);

impl MacAddr {
    pub fn octets(&self) -> &[u8; MAC_SIZE] {
        &self.0
    }

    /// 判断文本是否符合 `hh:hh:hh:hh:hh:hh` 形式（大小写均可）。
    pub fn looks_like(s: &str) -> bool {
        let mut parts = 0;
        for part in s.split(':') {
            parts += 1;
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
                return false;
            }
        }
        parts == MAC_SIZE
    }
}

impl FromStr for MacAddr {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !Self::looks_like(s) {
            return Err(ParseError::BadMac(s.to_string()));
        }
        let mut out = [0u8; MAC_SIZE];
        for (slot, part) in out.iter_mut().zip(s.split(':')) {
            *slot = u8::from_str_radix(part, 16).map_err(|_| ParseError::BadMac(s.to_string()))?;
        }
        Ok(MacAddr(out))
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl TryFrom<String> for MacAddr {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<MacAddr> for String {
    fn from(mac: MacAddr) -> Self {
        mac.to_string()
    }
}

/// IPv4 地址
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ipv4(pub [u8; IP_V4_SIZE]);

impl Ipv4 {
    pub fn octets(&self) -> &[u8; IP_V4_SIZE] {
        &self.0
    }

    /// 判断文本是否符合点分十进制形式（每段 1~3 位数字，不检查取值范围）。
    pub fn looks_like(s: &str) -> bool {
        let mut parts = 0;
        for part in s.split('.') {
            parts += 1;
            if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return false;
            }
        }
        parts == IP_V4_SIZE
    }

    /// 在前缀长度 `mask` 下，`self` 与 `net` 是否处于同一网段。
    ///
    /// `mask` 超过 32 时按 32 处理；`mask == 0` 时任何地址都在网段内。
    pub fn same_net(&self, net: &Ipv4, mask: u8) -> bool {
        let bits = u32::from(mask.min(32));
        let netmask = if bits == 0 { 0 } else { u32::MAX << (32 - bits) };
        (u32::from_be_bytes(self.0) & netmask) == (u32::from_be_bytes(net.0) & netmask)
    }
}

impl FromStr for Ipv4 {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !Self::looks_like(s) {
            return Err(ParseError::BadIpv4(s.to_string()));
        }
        let mut out = [0u8; IP_V4_SIZE];
        for (slot, part) in out.iter_mut().zip(s.split('.')) {
            *slot = part.parse().map_err(|_| ParseError::BadIpv4(s.to_string()))?;
        }
        Ok(Ipv4(out))
    }
}

impl fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{a}.{b}.{c}.{d}")
    }
}

impl TryFrom<String> for Ipv4 {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Ipv4> for String {
    fn from(ip: Ipv4) -> Self {
        ip.to_string()
    }
}
