//! 网卡参数加载
//!
//! 文本格式：
//! ```text
//! 00:1a:2b:3c:4d:5e
//! 10.0.0.5/24
//! src_prt:80, dst_port:8080
//! ```
//! 第一行 MAC，第二行 `IP/掩码`，之后每个包含 `src_prt:<n>, dst_port:<m>`
//! 的行声明一个开放端口，其它行忽略。以 `.json` 结尾的文件按 JSON 解析。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::port::PortTable;
use crate::packet::{Ipv4, MacAddr, NicIdentity, ParseError};

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("failed to read parameter file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode parameter json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("parameter file is missing the MAC address line")]
    MissingMac,
    #[error("parameter file is missing the `ip/mask` line")]
    MissingIp,
    #[error("line {line}: {source}")]
    BadAddress {
        line: usize,
        #[source]
        source: ParseError,
    },
    #[error("line {line}: invalid mask `{text}` (expected 0..=32)")]
    BadMask { line: usize, text: String },
    #[error("line {line}: invalid open port `{text}`")]
    BadPort { line: usize, text: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSpec {
    pub src_port: u16,
    pub dst_port: u16,
}

/// 网卡参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NicParams {
    pub mac: MacAddr,
    pub ip: Ipv4,
    pub mask: u8,
    #[serde(default)]
    pub open_ports: Vec<PortSpec>,
}

impl NicParams {
    pub fn load(path: &Path) -> Result<Self, ParamsError> {
        let raw = fs::read_to_string(path)?;
        if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
            Self::from_json(&raw)
        } else {
            Self::from_text(&raw)
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, ParamsError> {
        let params: NicParams = serde_json::from_str(raw)?;
        if params.mask > 32 {
            return Err(ParamsError::BadMask {
                line: 0,
                text: params.mask.to_string(),
            });
        }
        Ok(params)
    }

    pub fn from_text(raw: &str) -> Result<Self, ParamsError> {
        let mut lines = raw.lines().enumerate().map(|(i, l)| (i + 1, l.trim()));

        let (mac_line, mac_str) = lines.next().ok_or(ParamsError::MissingMac)?;
        let mac = mac_str.parse().map_err(|source| ParamsError::BadAddress {
            line: mac_line,
            source,
        })?;

        let (ip_line, ip_str) = lines.next().ok_or(ParamsError::MissingIp)?;
        let (ip_part, mask_part) = ip_str.split_once('/').ok_or(ParamsError::MissingIp)?;
        let ip = ip_part.parse().map_err(|source| ParamsError::BadAddress {
            line: ip_line,
            source,
        })?;
        let mask = mask_part
            .trim()
            .parse::<u8>()
            .ok()
            .filter(|m| *m <= 32)
            .ok_or_else(|| ParamsError::BadMask {
                line: ip_line,
                text: mask_part.to_string(),
            })?;

        let mut open_ports = Vec::new();
        for (line_no, line) in lines {
            if let Some(spec) = parse_port_line(line_no, line)? {
                open_ports.push(spec);
            }
        }

        Ok(Self {
            mac,
            ip,
            mask,
            open_ports,
        })
    }

    pub fn identity(&self) -> NicIdentity {
        NicIdentity {
            mac: self.mac,
            ip: self.ip,
            mask: self.mask,
        }
    }

    /// 按声明顺序创建端口表，缓冲区全部清零
    pub fn port_table(&self) -> PortTable {
        self.open_ports
            .iter()
            .map(|p| (p.src_port, p.dst_port))
            .collect()
    }
}

/// 把开头的一串十进制数字与剩余部分分开；没有数字时返回 `None`
fn split_digits(s: &str) -> Option<(&str, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    (end > 0).then(|| s.split_at(end))
}

/// 解析 `src_prt:<n>, dst_port:<m>`（`, dst_port:` 必须紧跟源端口数字）；
/// 不含该模式的行返回 `Ok(None)`
fn parse_port_line(line_no: usize, line: &str) -> Result<Option<PortSpec>, ParamsError> {
    const SRC_KEY: &str = "src_prt:";
    const DST_KEY: &str = ", dst_port:";

    let Some(at) = line.find(SRC_KEY) else {
        return Ok(None);
    };
    let Some((src, rest)) = split_digits(&line[at + SRC_KEY.len()..]) else {
        return Ok(None);
    };
    let Some((dst, _)) = rest.strip_prefix(DST_KEY).and_then(split_digits) else {
        return Ok(None);
    };

    let bad = || ParamsError::BadPort {
        line: line_no,
        text: line.to_string(),
    };
    Ok(Some(PortSpec {
        src_port: src.parse().map_err(|_| bad())?,
        dst_port: dst.parse().map_err(|_| bad())?,
    }))
}
