//! 三层数据包模型
//!
//! 定义 L2/L3/L4 数据包、文本记录解析、校验和以及分类器。

// 子模块声明
mod addr;
mod checksum;
mod classify;
mod error;
mod fields;
mod l2;
mod l3;
mod l4;
mod generic;

// 重新导出公共接口
pub use addr::{IP_V4_SIZE, Ipv4, MAC_SIZE, MacAddr};
pub use checksum::Checksum16;
pub use classify::{RecordKind, classify, parse_packet};
pub use error::ParseError;
pub use fields::{FIELD_DELIM, extract_between_delimiters};
pub use l2::L2Packet;
pub use l3::L3Packet;
pub use l4::L4Segment;
pub use generic::{MemoryDest, NicIdentity, Packet};
