// ==========================================
// 零售补货计划系统 - 发运记录领域模型
// ==========================================
// 职责: DeploymentRecord + 全程已发运累计 (SentTracker)
// ==========================================

use crate::domain::types::DeploymentPriority;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// DeploymentRecord - 发运记录
// ==========================================
// 红线: 生成后不可变, quantity >= 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub day: u32,
    pub plant_id: String,
    pub item_id: String,
    pub store_id: String,
    pub quantity: f64,
    pub arrival_day: u32, // day + transit_time_days
    pub priority: DeploymentPriority,
}

// ==========================================
// SentTracker - 已发运累计
// ==========================================
// key: (store_id, item_id)
// 作用域: 单次运行，跨日不重置；不区分发货工厂
// 注意: 不按 arrival_day 扣减在途，已发即视为到店
#[derive(Debug, Clone, Default)]
pub struct SentTracker {
    sent: HashMap<(String, String), f64>,
}

impl SentTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 查询某门店某品项累计已发运数量
    pub fn already_sent(&self, store_id: &str, item_id: &str) -> f64 {
        // HashMap<(String, String), _> 无法用 (&str, &str) 借用查询
        self.sent
            .get(&(store_id.to_string(), item_id.to_string()))
            .copied()
            .unwrap_or(0.0)
    }

    /// 累加发运数量
    pub fn record(&mut self, store_id: &str, item_id: &str, quantity: f64) {
        *self
            .sent
            .entry((store_id.to_string(), item_id.to_string()))
            .or_insert(0.0) += quantity;
    }

    /// 已跟踪的 (store, item) 数量
    pub fn len(&self) -> usize {
        self.sent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sent.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sent_tracker_accumulates() {
        let mut tracker = SentTracker::new();
        assert_eq!(tracker.already_sent("S1", "SKU1"), 0.0);

        tracker.record("S1", "SKU1", 5.0);
        tracker.record("S1", "SKU1", 10.0);
        tracker.record("S1", "SKU2", 1.0);

        assert_eq!(tracker.already_sent("S1", "SKU1"), 15.0);
        assert_eq!(tracker.already_sent("S1", "SKU2"), 1.0);
        assert_eq!(tracker.already_sent("S2", "SKU1"), 0.0);
        assert_eq!(tracker.len(), 2);
    }
}
