// ==========================================
// 零售补货计划系统 - 配置层
// ==========================================
// 职责: 计划参数（计划天数、整车容量）
// ==========================================

pub mod planning_config;

pub use planning_config::{
    ConfigError, PlanningConfig, DEFAULT_HORIZON_DAYS, DEFAULT_TRUCK_CAPACITY,
};
