// ==========================================
// 零售补货计划系统 - 领域类型定义
// ==========================================
// 职责: 发运优先级 + 策略阈值常量
// 红线: 阈值是业务策略，不是数值技巧，不可随意调整
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 策略阈值常量
// ==========================================

/// 日均需求 ≤ 0 时的"可售天数"哨兵值，表示永不断货
pub const NO_STOCKOUT_DAYS: f64 = 999.0;

/// 风险期 = 在途天数 + 该附加天数
pub const RISK_PERIOD_EXTRA_DAYS: u32 = 2;

/// 缓冲库存目标 = 安全库存 × 该倍数
pub const BUFFER_MULTIPLIER: f64 = 2.0;

/// 安全库存 ≤ 0 时的缓冲比兜底值
pub const FALLBACK_BUFFER_RATIO: f64 = 1.0;

/// 结转托盘数 ≤ 该值视为已清空
pub const CARRYOVER_EPSILON: f64 = 1e-9;

/// 托盘规格量化倍数（作为 map key 前取整到 1e-6）
pub const PALLET_SIZE_SCALE: f64 = 1e6;

/// 数量守恒校验容差
pub const QUANTITY_TOLERANCE: f64 = 1e-6;

/// 未知优先级字符串的排序等级（最后发运，不报错）
pub const UNKNOWN_PRIORITY_RANK: u32 = 99;

// ==========================================
// 发运优先级 (Deployment Priority)
// ==========================================
// 顺序: CriticalRisk < SafetyStock < BufferStock < Leftover
// 序列化格式: snake_case (与输出表一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentPriority {
    CriticalRisk, // 断货风险
    SafetyStock,  // 补足安全库存
    BufferStock,  // 补足缓冲库存
    Leftover,     // 剩余按需求比例分配
}

impl DeploymentPriority {
    /// 全部优先级（按瀑布顺序）
    pub const ALL: [DeploymentPriority; 4] = [
        DeploymentPriority::CriticalRisk,
        DeploymentPriority::SafetyStock,
        DeploymentPriority::BufferStock,
        DeploymentPriority::Leftover,
    ];

    /// 输出表中的标签
    pub fn label(&self) -> &'static str {
        match self {
            DeploymentPriority::CriticalRisk => "critical_risk",
            DeploymentPriority::SafetyStock => "safety_stock",
            DeploymentPriority::BufferStock => "buffer_stock",
            DeploymentPriority::Leftover => "leftover",
        }
    }

    /// 装车排序等级（越小越先发）
    pub fn rank(&self) -> u32 {
        match self {
            DeploymentPriority::CriticalRisk => 1,
            DeploymentPriority::SafetyStock => 2,
            DeploymentPriority::BufferStock => 3,
            DeploymentPriority::Leftover => 4,
        }
    }

    /// 从标签解析（精确匹配，大小写或空白不同均视为未知）
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.label() == label)
    }
}

impl fmt::Display for DeploymentPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 优先级标签 → 排序等级；未知标签返回 UNKNOWN_PRIORITY_RANK
pub fn priority_rank(label: &str) -> u32 {
    DeploymentPriority::from_label(label)
        .map(|p| p.rank())
        .unwrap_or(UNKNOWN_PRIORITY_RANK)
}

/// 托盘规格量化（浮点规格不可直接作为 key）
pub fn quantize_pallet_size(pallet_size: f64) -> i64 {
    (pallet_size * PALLET_SIZE_SCALE).round() as i64
}
