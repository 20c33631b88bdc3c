// ==========================================
// 零售补货计划系统 - 生产批次领域模型
// ==========================================
// 来源: 上游生产排程（外部协作方，仅约定表结构）
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// ProductionScheduleRow - 生产排程行
// ==========================================
// 对应输入表: plant_id, item_id, day, production_quantity, starting_inventory_plant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionScheduleRow {
    pub plant_id: String,
    pub item_id: String,
    pub day: u32,                      // 计划日 (>= 1)
    pub production_quantity: f64,      // 当日产量
    pub starting_inventory_plant: f64, // 工厂期初库存
}

impl ProductionScheduleRow {
    /// 转换为可发运批次
    pub fn to_lot(&self) -> ProductionLot {
        ProductionLot {
            plant_id: self.plant_id.clone(),
            item_id: self.item_id.clone(),
            day: self.day,
            available_quantity: self.production_quantity + self.starting_inventory_plant,
        }
    }
}

// ==========================================
// ProductionLot - 可发运批次
// ==========================================
// 红线: available_quantity <= 0 的批次整体跳过，不产生记录、不改状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionLot {
    pub plant_id: String,
    pub item_id: String,
    pub day: u32,
    pub available_quantity: f64, // 当日产量 + 工厂期初库存
}

impl ProductionLot {
    /// 是否有可分配数量
    pub fn is_deployable(&self) -> bool {
        self.available_quantity > 0.0
    }
}
