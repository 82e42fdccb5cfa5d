//! 统计信息
//!
//! 定义转发引擎的逐行统计数据结构。

use serde::{Deserialize, Serialize};

/// 转发统计信息
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    /// 非空输入行数
    pub lines: u64,
    /// 无法识别或无法解析的行
    pub malformed: u64,
    /// 校验未通过
    pub rejected: u64,
    /// 校验通过但处理失败（TTL 耗尽、越界写入、无匹配端口等）
    pub dropped: u64,
    pub local: u64,
    pub to_rq: u64,
    pub to_tq: u64,
}
