// ==========================================
// 零售补货计划系统 - 引擎层
// ==========================================
// 职责: 实现分配与装车规则，不做 IO
// 红线: 按日顺序推进的状态（SentTracker / LaneState）显式传递，不放全局
// ==========================================

pub mod deployment;
pub mod error;
pub mod orchestrator;
pub mod pallet_converter;
pub mod truck_loader;

// 重导出核心引擎
pub use deployment::{DemandDeploymentEngine, DeploymentOutcome, DeploymentSummary};
pub use error::{EngineError, EngineResult};
pub use orchestrator::{PipelineError, PipelineResult, ReplenishmentPipeline};
pub use pallet_converter::PalletConverter;
pub use truck_loader::{
    schedule_shipments, LaneCarryover, LaneSchedule, ShipmentSummary, TruckLoadScheduler,
};
