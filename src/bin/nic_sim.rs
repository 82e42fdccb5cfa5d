//! 网卡转发仿真
//!
//! 读取网卡参数文件与数据包文件，按顺序处理每个数据包，最后打印本地内存、RQ 和 TQ。

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use nic_sim::nic::{ForwardingEngine, NicParams};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "nic-sim", about = "网卡转发仿真：校验、处理并存放文本数据包")]
struct Args {
    /// 网卡参数文件（MAC、IP/掩码、开放端口；`.json` 按 JSON 解析）
    #[arg(long)]
    params: PathBuf,
    /// 数据包文件，每行一条记录
    #[arg(long)]
    packets: PathBuf,
    /// 额外输出 JSON 格式的结果
    #[arg(long)]
    json_out: Option<PathBuf>,
}

fn main() -> ExitCode {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();

    let params = match NicParams::load(&args.params) {
        Ok(p) => p,
        Err(err) => {
            error!(path = %args.params.display(), %err, "加载网卡参数失败");
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        mac = %params.mac,
        ip = %params.ip,
        mask = params.mask,
        ports = params.open_ports.len(),
        "网卡参数已加载"
    );

    let mut engine = ForwardingEngine::from_params(&params);
    let reader = match File::open(&args.packets) {
        Ok(f) => BufReader::new(f),
        Err(err) => {
            eprintln!("error: failed to open {}: {err}", args.packets.display());
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = engine.run_reader(reader) {
        eprintln!("error: failed to read {}: {err}", args.packets.display());
        return ExitCode::FAILURE;
    }

    let report = engine.report();
    if let Err(err) = report.write_text(&mut io::stdout().lock()) {
        eprintln!("error: failed to write results: {err}");
        return ExitCode::FAILURE;
    }

    if let Some(path) = &args.json_out {
        let json = match serde_json::to_string_pretty(&report) {
            Ok(j) => j,
            Err(err) => {
                eprintln!("error: failed to encode results: {err}");
                return ExitCode::FAILURE;
            }
        };
        if let Err(err) = fs::write(path, json) {
            eprintln!("error: failed to write {}: {err}", path.display());
            return ExitCode::FAILURE;
        }
        eprintln!("wrote results to {}", path.display());
    }

    ExitCode::SUCCESS
}
