// ==========================================
// 装车结果汇总
// ==========================================

use crate::domain::shipment::{LaneKey, ShipmentRecord};
use crate::domain::types::CARRYOVER_EPSILON;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 线路期末结转
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneCarryover {
    pub plant_id: String,
    pub store_id: String,
    pub last_day: u32,
    pub pallets: f64,
}

/// 装车汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipmentSummary {
    pub lanes: usize,
    pub lane_days: usize,
    pub total_trucks: u64,      // 每个线路日只计一次
    pub pallets_sent: f64,
    pub qty_sent: f64,
    pub final_carryover: Vec<LaneCarryover>, // 仅列出期末仍有结转的线路
}

impl ShipmentSummary {
    /// 由装车结果统计
    pub fn from_records(records: &[ShipmentRecord]) -> Self {
        // (lane, day) → (trucks, carryover)
        let mut lane_days: BTreeMap<(LaneKey, u32), (u32, f64)> = BTreeMap::new();
        let mut summary = ShipmentSummary::default();

        for record in records {
            summary.pallets_sent += record.pallets_sent;
            summary.qty_sent += record.qty_sent;

            let lane = LaneKey {
                plant_id: record.plant_id.clone(),
                store_id: record.store_id.clone(),
            };
            let slot = lane_days
                .entry((lane, record.day))
                .or_insert((record.trucks_sent, 0.0));
            slot.1 += record.pallets_carryover;
        }

        summary.lane_days = lane_days.len();
        summary.total_trucks = lane_days.values().map(|(trucks, _)| *trucks as u64).sum();

        // BTreeMap 有序：同一线路最后一个 key 即期末
        let mut last_by_lane: BTreeMap<LaneKey, (u32, f64)> = BTreeMap::new();
        for ((lane, day), (_, carryover)) in lane_days {
            last_by_lane.insert(lane, (day, carryover));
        }
        summary.lanes = last_by_lane.len();
        summary.final_carryover = last_by_lane
            .into_iter()
            .filter(|(_, (_, pallets))| *pallets > CARRYOVER_EPSILON)
            .map(|(lane, (last_day, pallets))| LaneCarryover {
                plant_id: lane.plant_id,
                store_id: lane.store_id,
                last_day,
                pallets,
            })
            .collect();

        summary
    }

    /// 期末结转托盘合计
    pub fn total_final_carryover(&self) -> f64 {
        self.final_carryover.iter().map(|c| c.pallets).sum()
    }
}
