// ==========================================
// 零售补货计划系统 - 需求发运引擎
// ==========================================
// 职责: 逐日、按优先级瀑布将生产批次分配到门店
// 输入: 生产排程 + 门店需求 + 计划天数
// 输出: DeploymentRecord 列表 + 汇总
// ==========================================
// 红线: 日期严格递增（SentTracker 跨日累计）
// 红线: 单批次四轮固定顺序 critical → safety → buffer → leftover
// 红线: 单批次分配总量 == available_quantity
// ==========================================

mod core;
mod summary;
mod waterfall;


pub use core::DemandDeploymentEngine;
pub use summary::{DeploymentOutcome, DeploymentSummary};
pub use waterfall::split_with_remainder;
