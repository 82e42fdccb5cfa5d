//! 转发引擎
//!
//! 对每一行输入依次执行：分类 -> 校验 -> 处理 -> 序列化 -> 放入目的位置。
//! 任何一行的失败都只影响该行本身，不会中断整个运行。

use std::io::{self, BufRead};

use tracing::{debug, info, trace};

use super::params::NicParams;
use super::port::PortTable;
use super::report::Report;
use super::stats::EngineStats;
use crate::packet::{MemoryDest, NicIdentity, parse_packet};

/// 单行输入的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// 空行，直接跳过
    Blank,
    /// 无法识别或无法解析
    Malformed,
    /// 校验未通过
    Rejected,
    /// 处理过程中被丢弃
    Dropped,
    /// 成功存放
    Stored(MemoryDest),
}

/// 转发引擎：独占端口表与两个队列
#[derive(Debug)]
pub struct ForwardingEngine {
    nic: NicIdentity,
    ports: PortTable,
    rq: Vec<String>,
    tq: Vec<String>,
    pub stats: EngineStats,
}

impl ForwardingEngine {
    pub fn new(nic: NicIdentity, ports: PortTable) -> Self {
        Self {
            nic,
            ports,
            rq: Vec::new(),
            tq: Vec::new(),
            stats: EngineStats::default(),
        }
    }

    pub fn from_params(params: &NicParams) -> Self {
        Self::new(params.identity(), params.port_table())
    }

    pub fn ports(&self) -> &PortTable {
        &self.ports
    }

    pub fn reception_queue(&self) -> &[String] {
        &self.rq
    }

    pub fn transmission_queue(&self) -> &[String] {
        &self.tq
    }

    /// 处理一行输入
    #[tracing::instrument(skip(self, line))]
    pub fn handle_line(&mut self, line_no: usize, line: &str) -> LineOutcome {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            return LineOutcome::Blank;
        }
        self.stats.lines += 1;

        let mut pkt = match parse_packet(line) {
            Ok(pkt) => pkt,
            Err(err) => {
                debug!(%err, "无法解析，跳过该行");
                self.stats.malformed += 1;
                return LineOutcome::Malformed;
            }
        };
        trace!(kind = pkt.kind(), "解析完成");

        if !pkt.validate(&self.nic, &self.ports) {
            debug!(kind = pkt.kind(), "校验未通过，丢弃");
            self.stats.rejected += 1;
            return LineOutcome::Rejected;
        }

        let Some(dest) = pkt.process(&self.nic, &mut self.ports) else {
            debug!(kind = pkt.kind(), "处理失败，丢弃");
            self.stats.dropped += 1;
            return LineOutcome::Dropped;
        };

        match dest {
            MemoryDest::ReceptionQueue => {
                self.rq.push(pkt.serialize());
                self.stats.to_rq += 1;
            }
            MemoryDest::TransmissionQueue => {
                self.tq.push(pkt.serialize());
                self.stats.to_tq += 1;
            }
            // 端口缓冲区已在 process 中原地写入
            MemoryDest::LocalMemory => self.stats.local += 1,
        }
        debug!(kind = pkt.kind(), dest = ?dest, "数据包已存放");
        LineOutcome::Stored(dest)
    }

    /// 按顺序处理所有行
    pub fn run<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (i, line) in lines.into_iter().enumerate() {
            self.handle_line(i + 1, line.as_ref());
        }
        self.log_summary();
    }

    /// 从任意 `BufRead` 逐行读取并处理。
    ///
    /// 只有真正的 I/O 错误才会返回 `Err`；不是合法 UTF-8 的行按无法解析处理。
    pub fn run_reader<R: BufRead>(&mut self, reader: R) -> io::Result<()> {
        for (i, raw) in reader.split(b'\n').enumerate() {
            self.handle_raw_line(i + 1, raw?);
        }
        self.log_summary();
        Ok(())
    }

    fn handle_raw_line(&mut self, line_no: usize, raw: Vec<u8>) -> LineOutcome {
        match String::from_utf8(raw) {
            Ok(line) => self.handle_line(line_no, &line),
            Err(err) => {
                debug!(line_no, %err, "不是合法 UTF-8，跳过该行");
                self.stats.lines += 1;
                self.stats.malformed += 1;
                LineOutcome::Malformed
            }
        }
    }

    fn log_summary(&self) {
        let s = &self.stats;
        info!(
            lines = s.lines,
            malformed = s.malformed,
            rejected = s.rejected,
            dropped = s.dropped,
            local = s.local,
            rq = s.to_rq,
            tq = s.to_tq,
            "转发完成"
        );
    }

    /// 导出最终状态
    pub fn report(&self) -> Report {
        Report::from_engine(self)
    }
}
