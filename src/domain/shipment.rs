// ==========================================
// 零售补货计划系统 - 装车发运领域模型
// ==========================================
// 职责: 装车输入行、线路键、合并条目、线路结转状态、装车结果
// ==========================================

use crate::domain::types::{priority_rank, quantize_pallet_size, CARRYOVER_EPSILON};
use serde::{Deserialize, Serialize};

// ==========================================
// ShipmentRow - 装车输入行（托盘数）
// ==========================================
// 对应输入表: day, plant_id, store_id, item_id, priority, pallet_size, store_pallet_total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRow {
    pub day: u32,
    pub plant_id: String,
    pub store_id: String,
    pub item_id: String,
    pub priority: String,        // 优先级标签（允许未知值）
    pub pallet_size: f64,        // 每托盘件数 (> 0)
    pub store_pallet_total: f64, // 托盘数 (>= 0)
}

impl ShipmentRow {
    pub fn lane(&self) -> LaneKey {
        LaneKey {
            plant_id: self.plant_id.clone(),
            store_id: self.store_id.clone(),
        }
    }

    pub fn entry_key(&self) -> EntryKey {
        EntryKey::new(&self.item_id, &self.priority, self.pallet_size)
    }
}

// ==========================================
// LaneKey - 线路 (plant → store)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LaneKey {
    pub plant_id: String,
    pub store_id: String,
}

// ==========================================
// EntryKey - 线路内合并键 (item, priority, pallet_size)
// ==========================================
// pallet_size 量化为整数后参与比较
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryKey {
    pub item_id: String,
    pub priority: String,
    pub pallet_key: i64,
}

impl EntryKey {
    pub fn new(item_id: &str, priority: &str, pallet_size: f64) -> Self {
        Self {
            item_id: item_id.to_string(),
            priority: priority.to_string(),
            pallet_key: quantize_pallet_size(pallet_size),
        }
    }
}

// ==========================================
// ShipmentEntry - 合并后的待装车条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentEntry {
    pub item_id: String,
    pub priority: String,
    pub priority_rank: u32,
    pub pallet_size: f64,
    pub pallets: f64,
}

impl ShipmentEntry {
    pub fn new(item_id: &str, priority: &str, pallet_size: f64, pallets: f64) -> Self {
        Self {
            item_id: item_id.to_string(),
            priority: priority.to_string(),
            priority_rank: priority_rank(priority),
            pallet_size,
            pallets,
        }
    }

    pub fn key(&self) -> EntryKey {
        EntryKey::new(&self.item_id, &self.priority, self.pallet_size)
    }
}

// ==========================================
// LaneState - 线路结转状态
// ==========================================
// 作用域: 单条线路的逐日遍历；线路之间互不共享
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaneState {
    pub carryover: Vec<ShipmentEntry>,
}

impl LaneState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由当日装车结果生成次日结转（结转 <= EPSILON 的条目丢弃）
    pub fn from_records(records: &[ShipmentRecord]) -> Self {
        let carryover = records
            .iter()
            .filter(|r| r.pallets_carryover > CARRYOVER_EPSILON)
            .map(|r| {
                ShipmentEntry::new(&r.item_id, &r.priority, r.pallet_size, r.pallets_carryover)
            })
            .collect();
        Self { carryover }
    }

    pub fn is_empty(&self) -> bool {
        self.carryover.is_empty()
    }

    /// 结转托盘总数
    pub fn total_pallets(&self) -> f64 {
        self.carryover.iter().map(|e| e.pallets).sum()
    }
}

// ==========================================
// ShipmentRecord - 装车结果（每日每线路每条目一行）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    pub day: u32,
    pub plant_id: String,
    pub store_id: String,
    pub item_id: String,
    pub priority: String,
    pub pallet_size: f64,

    // ===== 托盘 =====
    pub pallets_available: f64,
    pub pallets_sent: f64,
    pub pallets_carryover: f64,

    // ===== 件数 (托盘 × pallet_size) =====
    pub qty_available: f64,
    pub qty_sent: f64,
    pub qty_carryover: f64,

    pub trucks_sent: u32, // 当日该线路整车数
}
