// ==========================================
// 零售补货计划系统 - 件数 → 托盘换算
// ==========================================
// 职责: 发运记录按 (day, plant, store, item, priority) 汇总后换算为托盘数
// 输出: 装车调度输入 ShipmentRow
// ==========================================

use crate::domain::deployment::DeploymentRecord;
use crate::domain::shipment::ShipmentRow;
use crate::domain::types::DeploymentPriority;
use crate::engine::error::{EngineError, EngineResult};
use std::collections::{BTreeMap, HashMap};

/// 汇总 key: (day, plant_id, store_id, item_id, priority)
type ShipmentKey = (u32, String, String, String, DeploymentPriority);

#[derive(Debug, Clone, Default)]
pub struct PalletConverter {
    pallet_sizes: HashMap<String, f64>, // item_id → 每托盘件数
}

impl PalletConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由 (item_id, pallet_size) 列表构造
    pub fn from_sizes<I, S>(sizes: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            pallet_sizes: sizes.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// 设置品项托盘规格
    pub fn with_pallet_size(mut self, item_id: &str, pallet_size: f64) -> Self {
        self.pallet_sizes.insert(item_id.to_string(), pallet_size);
        self
    }

    /// 查询品项托盘规格（缺失或非正视为错误）
    pub fn pallet_size(&self, item_id: &str) -> EngineResult<f64> {
        match self.pallet_sizes.get(item_id) {
            Some(&size) if size.is_finite() && size > 0.0 => Ok(size),
            _ => Err(EngineError::MissingPalletSize(item_id.to_string())),
        }
    }

    /// 发运记录 → 装车输入行
    ///
    /// 同 (day, plant, store, item, priority) 件数先相加再除以托盘规格，
    /// 托盘数保留小数（不取整）。
    pub fn to_shipment_rows(&self, records: &[DeploymentRecord]) -> EngineResult<Vec<ShipmentRow>> {
        let mut grouped: BTreeMap<ShipmentKey, f64> = BTreeMap::new();
        for record in records {
            let key = (
                record.day,
                record.plant_id.clone(),
                record.store_id.clone(),
                record.item_id.clone(),
                record.priority,
            );
            *grouped.entry(key).or_insert(0.0) += record.quantity;
        }

        grouped
            .into_iter()
            .map(|((day, plant_id, store_id, item_id, priority), quantity)| {
                let pallet_size = self.pallet_size(&item_id)?;
                Ok(ShipmentRow {
                    day,
                    plant_id,
                    store_id,
                    item_id,
                    priority: priority.label().to_string(),
                    pallet_size,
                    store_pallet_total: quantity / pallet_size,
                })
            })
            .collect()
    }
}
