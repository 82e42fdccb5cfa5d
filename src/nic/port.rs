//! 开放端口表
//!
//! 每个开放端口由 (src_port, dst_port) 唯一标识，并拥有一块固定大小的本地缓冲区。
//! 缓冲区在整个仿真过程中存在，只被匹配的 L4 分段原地改写。

/// 每个端口缓冲区的字节数
pub const DATA_ARR_SIZE: usize = 20;

/// 开放端口
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenPort {
    pub src_port: u16,
    pub dst_port: u16,
    data: [u8; DATA_ARR_SIZE],
}

impl OpenPort {
    pub fn new(src_port: u16, dst_port: u16) -> Self {
        Self {
            src_port,
            dst_port,
            data: [0; DATA_ARR_SIZE],
        }
    }

    pub fn matches(&self, src_port: u16, dst_port: u16) -> bool {
        self.src_port == src_port && self.dst_port == dst_port
    }

    pub fn data(&self) -> &[u8; DATA_ARR_SIZE] {
        &self.data
    }

    /// 从 `address` 开始写入 `bytes`。
    ///
    /// 越界时不做任何修改并返回 `false`。
    pub fn write_at(&mut self, address: u32, bytes: &[u8]) -> bool {
        let Ok(start) = usize::try_from(address) else {
            return false;
        };
        let Some(end) = start.checked_add(bytes.len()) else {
            return false;
        };
        if end > DATA_ARR_SIZE {
            return false;
        }
        self.data[start..end].copy_from_slice(bytes);
        true
    }
}

/// 开放端口表（按加载顺序保存）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortTable {
    ports: Vec<OpenPort>,
}

impl PortTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, src_port: u16, dst_port: u16) {
        self.ports.push(OpenPort::new(src_port, dst_port));
    }

    /// 查找第一个匹配的端口
    pub fn find(&self, src_port: u16, dst_port: u16) -> Option<&OpenPort> {
        self.ports.iter().find(|p| p.matches(src_port, dst_port))
    }

    pub fn find_mut(&mut self, src_port: u16, dst_port: u16) -> Option<&mut OpenPort> {
        self.ports.iter_mut().find(|p| p.matches(src_port, dst_port))
    }

    pub fn iter(&self) -> impl Iterator<Item = &OpenPort> {
        self.ports.iter()
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }
}

impl FromIterator<(u16, u16)> for PortTable {
    fn from_iter<I: IntoIterator<Item = (u16, u16)>>(iter: I) -> Self {
        Self {
            ports: iter.into_iter().map(|(s, d)| OpenPort::new(s, d)).collect(),
        }
    }
}
