mod addresses;
mod engine;

use crate::nic::PortTable;
use crate::packet::{Ipv4, MacAddr, NicIdentity};

/// 测试用网卡：00:1a:2b:3c:4d:5e, 10.0.0.5/24
pub(crate) fn test_nic() -> NicIdentity {
    NicIdentity {
        mac: "00:1a:2b:3c:4d:5e".parse().expect("mac"),
        ip: "10.0.0.5".parse().expect("ip"),
        mask: 24,
    }
}

pub(crate) fn ip(s: &str) -> Ipv4 {
    s.parse().expect("ip")
}

pub(crate) fn mac(s: &str) -> MacAddr {
    s.parse().expect("mac")
}

pub(crate) fn ports(pairs: &[(u16, u16)]) -> PortTable {
    pairs.iter().copied().collect()
}
