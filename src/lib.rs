// ==========================================
// 零售补货计划系统 - 核心库
// ==========================================
// 流程: 生产排程 → 需求发运分配 → 托盘换算 → 整车装载调度
// 系统定位: 批量计算库（无持久化、无命令行）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 分配与装车规则
pub mod engine;

// 导入层 - 外部表格
pub mod importer;

// 导出层 - 结果表格
pub mod exporter;

// 配置层 - 计划参数
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use config::{ConfigError, PlanningConfig};

pub use domain::{
    DeploymentPriority, DeploymentRecord, LaneKey, LaneState, ProductionLot,
    ProductionScheduleRow, SentTracker, ShipmentEntry, ShipmentRecord, ShipmentRow,
    StoreDemandRow,
};

pub use engine::{
    DemandDeploymentEngine, DeploymentOutcome, DeploymentSummary, EngineError, PalletConverter,
    PipelineError, PipelineResult, ReplenishmentPipeline, ShipmentSummary, TruckLoadScheduler,
};

pub use importer::{FieldMapper, ImportError, RawTable};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "零售补货计划系统";
