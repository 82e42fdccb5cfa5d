//! 16 位回绕累加校验和
//!
//! 不做进位回卷：每次累加都按 `u16` 溢出回绕。字段的累加顺序是线上格式的一部分。

/// 校验和累加器
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Checksum16(u16);

impl Checksum16 {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn add_byte(self, b: u8) -> Self {
        Self(self.0.wrapping_add(u16::from(b)))
    }

    pub fn add_bytes(self, bytes: &[u8]) -> Self {
        bytes.iter().fold(self, |acc, &b| acc.add_byte(b))
    }

    /// 先高字节后低字节
    pub fn add_u16(self, v: u16) -> Self {
        let [hi, lo] = v.to_be_bytes();
        self.add_byte(hi).add_byte(lo)
    }

    /// 32 位地址字段：累加 `v >> 8` 与 `v & 0xff`。
    ///
    /// 对小于 65536 的地址，这正好是高字节 + 低字节。
    pub fn add_address(self, v: u32) -> Self {
        Self(self.0.wrapping_add((v >> 8) as u16).wrapping_add((v & 0xff) as u16))
    }

    pub fn value(self) -> u16 {
        self.0
    }
}
