//! 结果输出
//!
//! 运行结束后导出三部分：各开放端口的本地缓冲区、接收队列、发送队列。
//! 文本格式用于标准输出，JSON 格式用于 `--json-out`。

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use super::engine::ForwardingEngine;
use super::stats::EngineStats;

/// 一个端口缓冲区的快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortDump {
    pub src_port: u16,
    pub dst_port: u16,
    /// 空格分隔的两位小写十六进制
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub local_dram: Vec<PortDump>,
    pub rq: Vec<String>,
    pub tq: Vec<String>,
    pub stats: EngineStats,
}

fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

impl Report {
    pub fn from_engine(engine: &ForwardingEngine) -> Self {
        Self {
            local_dram: engine
                .ports()
                .iter()
                .map(|p| PortDump {
                    src_port: p.src_port,
                    dst_port: p.dst_port,
                    data: hex_bytes(p.data()),
                })
                .collect(),
            rq: engine.reception_queue().to_vec(),
            tq: engine.transmission_queue().to_vec(),
            stats: engine.stats,
        }
    }

    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "LOCAL DRAM:")?;
        for port in &self.local_dram {
            writeln!(out, "{} {}: {}", port.src_port, port.dst_port, port.data)?;
        }
        writeln!(out)?;

        writeln!(out, "RQ:")?;
        for pkt in &self.rq {
            writeln!(out, "{pkt}")?;
        }
        writeln!(out)?;

        writeln!(out, "TQ:")?;
        for pkt in &self.tq {
            writeln!(out, "{pkt}")?;
        }
        Ok(())
    }

    pub fn to_text(&self) -> String {
        let mut buf = Vec::new();
        self.write_text(&mut buf).expect("write to Vec");
        String::from_utf8_lossy(&buf).into_owned()
    }
}
