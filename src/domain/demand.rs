// ==========================================
// 零售补货计划系统 - 门店需求领域模型
// ==========================================

use crate::domain::types::{
    BUFFER_MULTIPLIER, FALLBACK_BUFFER_RATIO, NO_STOCKOUT_DAYS, RISK_PERIOD_EXTRA_DAYS,
};
use serde::{Deserialize, Serialize};

// ==========================================
// StoreDemandRow - 门店需求行
// ==========================================
// 一行表示一个门店在某 (plant, item, day) 上的库存位置
// 同一生产批次可服务多个门店
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreDemandRow {
    pub store_id: String,
    pub item_id: String,
    pub day: u32,
    pub plant_id: String,

    // ===== 库存位置 =====
    pub projection: f64,          // 预计库存 (件)
    pub avg_daily_demand: f64,    // 日均需求 (>= 0)
    pub transit_time_days: u32,   // 在途天数
    pub safety_stock_static: f64, // 静态安全库存 (>= 0)
}

impl StoreDemandRow {
    /// 风险期（天）= 在途天数 + 2
    pub fn risk_period_days(&self) -> u32 {
        self.transit_time_days + RISK_PERIOD_EXTRA_DAYS
    }

    /// 可售天数；日均需求 <= 0 时返回 NO_STOCKOUT_DAYS
    pub fn days_until_stockout(&self, current_stock: f64) -> f64 {
        if self.avg_daily_demand > 0.0 {
            current_stock / self.avg_daily_demand
        } else {
            NO_STOCKOUT_DAYS
        }
    }

    /// 缓冲比 = 有效库存 / 安全库存；安全库存 <= 0 时兜底为 1
    pub fn buffer_ratio(&self, effective_stock: f64) -> f64 {
        if self.safety_stock_static > 0.0 {
            effective_stock / self.safety_stock_static
        } else {
            FALLBACK_BUFFER_RATIO
        }
    }

    /// 缓冲库存目标 = 2 × 安全库存
    pub fn buffer_target(&self) -> f64 {
        BUFFER_MULTIPLIER * self.safety_stock_static
    }
}
