// ==========================================
// 发运结果汇总
// ==========================================

use crate::domain::deployment::DeploymentRecord;
use crate::domain::types::{DeploymentPriority, QUANTITY_TOLERANCE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 发运汇总（用于日志与守恒校验）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentSummary {
    pub horizon_days: u32,

    // ===== 数量 =====
    pub total_production: f64,     // 计划期内产量合计（不含期初库存）
    pub total_available: f64,      // 可发运批次数量合计
    pub total_deployed: f64,       // 已发运合计
    pub dropped_quantity: f64,     // 无服务门店而丢弃的数量
    pub deployed_by_priority: BTreeMap<DeploymentPriority, f64>,

    // ===== 批次计数 =====
    pub lots_deployed: usize,
    pub lots_skipped_empty: usize,     // available_quantity <= 0
    pub lots_skipped_no_stores: usize, // 无匹配门店行
}

impl DeploymentSummary {
    pub(super) fn add_records(&mut self, records: &[DeploymentRecord]) {
        for record in records {
            self.total_deployed += record.quantity;
            *self.deployed_by_priority.entry(record.priority).or_insert(0.0) +=
                record.quantity;
        }
    }

    /// 守恒校验: 已发运 == 可发运 − 丢弃（相对容差）
    pub fn is_conserved(&self) -> bool {
        let expected = self.total_available - self.dropped_quantity;
        let tolerance = QUANTITY_TOLERANCE * expected.abs().max(1.0);
        (self.total_deployed - expected).abs() <= tolerance
    }

    /// 某优先级的发运合计
    pub fn deployed_for(&self, priority: DeploymentPriority) -> f64 {
        self.deployed_by_priority.get(&priority).copied().unwrap_or(0.0)
    }
}

/// 发运引擎输出
#[derive(Debug, Clone, Default)]
pub struct DeploymentOutcome {
    pub records: Vec<DeploymentRecord>,
    pub summary: DeploymentSummary,
}

