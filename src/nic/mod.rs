//! 网卡模拟模块
//!
//! 此模块包含开放端口表、网卡参数加载、转发引擎和结果输出。

// 子模块声明
mod engine;
mod params;
mod port;
mod report;
mod stats;

// 重新导出公共接口
pub use engine::{ForwardingEngine, LineOutcome};
pub use params::{NicParams, ParamsError, PortSpec};
pub use port::{DATA_ARR_SIZE, OpenPort, PortTable};
pub use report::{PortDump, Report};
pub use stats::EngineStats;
