// ==========================================
// 零售补货计划系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、策略常量
// 红线: 不含 IO 逻辑,不含引擎逻辑
// ==========================================

pub mod demand;
pub mod deployment;
pub mod production;
pub mod shipment;
pub mod types;

// 重导出核心类型
pub use demand::StoreDemandRow;
pub use deployment::{DeploymentRecord, SentTracker};
pub use production::{ProductionLot, ProductionScheduleRow};
pub use shipment::{EntryKey, LaneKey, LaneState, ShipmentEntry, ShipmentRecord, ShipmentRow};
pub use types::{priority_rank, DeploymentPriority};
