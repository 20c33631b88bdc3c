use crate::domain::shipment::{
    EntryKey, LaneKey, LaneState, ShipmentEntry, ShipmentRecord, ShipmentRow,
};
use crate::domain::types::CARRYOVER_EPSILON;
use crate::engine::error::{EngineError, EngineResult};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// 单条线路的调度结果
#[derive(Debug, Clone, Default)]
pub struct LaneSchedule {
    pub records: Vec<ShipmentRecord>,
    pub final_state: LaneState, // 计划期末仍未发出的结转
}

// ==========================================
// TruckLoadScheduler - 装车调度引擎
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct TruckLoadScheduler {
    truck_capacity: f64,
}

impl TruckLoadScheduler {
    /// 构造函数
    ///
    /// # 参数
    /// - `truck_capacity`: 整车容量（托盘单位，必须为正）
    pub fn new(truck_capacity: f64) -> EngineResult<Self> {
        if !truck_capacity.is_finite() || truck_capacity <= 0.0 {
            return Err(EngineError::InvalidTruckCapacity(truck_capacity));
        }
        Ok(Self { truck_capacity })
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 调度全部线路
    ///
    /// 线路之间相互独立，线路内按日期顺序处理；结果按
    /// (day, plant_id, store_id, priority, item_id) 排序。
    #[instrument(skip(self, rows), fields(rows = rows.len(), truck_capacity = self.truck_capacity))]
    pub fn schedule(&self, rows: &[ShipmentRow]) -> Vec<ShipmentRecord> {
        let lanes = group_by_lane(rows);
        let lane_count = lanes.len();

        let mut records = Vec::new();
        for (lane, lane_rows) in lanes {
            records.extend(self.schedule_lane(&lane, &lane_rows).records);
        }
        sort_records(&mut records);

        info!(lanes = lane_count, records = records.len(), "装车调度完成");
        records
    }

    /// 并发调度：每条线路在阻塞线程池中独立执行
    ///
    /// 结果与 `schedule` 完全一致（最终统一排序）。
    pub async fn schedule_concurrent(&self, rows: &[ShipmentRow]) -> EngineResult<Vec<ShipmentRecord>> {
        let scheduler = *self;
        let tasks = group_by_lane(rows).into_iter().map(|(lane, lane_rows)| {
            let owned: Vec<ShipmentRow> = lane_rows.into_iter().cloned().collect();
            tokio::task::spawn_blocking(move || {
                let refs: Vec<&ShipmentRow> = owned.iter().collect();
                scheduler.schedule_lane(&lane, &refs).records
            })
        });

        let lane_results = futures::future::try_join_all(tasks)
            .await
            .map_err(|e| EngineError::LaneTaskFailed(e.to_string()))?;

        let mut records: Vec<ShipmentRecord> = lane_results.into_iter().flatten().collect();
        sort_records(&mut records);
        Ok(records)
    }

    /// 单条线路逐日调度
    pub fn schedule_lane(&self, lane: &LaneKey, rows: &[&ShipmentRow]) -> LaneSchedule {
        let mut by_day: BTreeMap<u32, Vec<&ShipmentRow>> = BTreeMap::new();
        for &row in rows {
            by_day.entry(row.day).or_default().push(row);
        }

        // 每条线路从空结转开始
        let mut state = LaneState::new();
        let mut records = Vec::new();

        for (day, todays) in by_day {
            let entries = merge_entries(&state, &todays);
            let day_records = self.load_day(lane, day, &entries);
            state = LaneState::from_records(&day_records);
            records.extend(day_records);
        }

        LaneSchedule {
            records,
            final_state: state,
        }
    }

    /// 单线路单日装车
    ///
    /// 1) 整车数 = floor(总托盘 / 容量)，只发整车
    /// 2) 按排序依次发 min(可用, 剩余可发)
    /// 3) 剩余可发为 0 后，后续条目全部结转
    fn load_day(&self, lane: &LaneKey, day: u32, entries: &[ShipmentEntry]) -> Vec<ShipmentRecord> {
        let total_pallets: f64 = entries.iter().map(|e| e.pallets).sum();
        let num_full_trucks = if total_pallets > 0.0 {
            (total_pallets / self.truck_capacity).floor() as u32
        } else {
            0
        };
        let mut remaining_to_send = num_full_trucks as f64 * self.truck_capacity;

        debug!(
            plant_id = %lane.plant_id,
            store_id = %lane.store_id,
            day,
            total_pallets,
            trucks = num_full_trucks,
            "线路装车"
        );

        entries
            .iter()
            .map(|entry| {
                let available = entry.pallets;
                let sent = if remaining_to_send > 0.0 {
                    available.min(remaining_to_send)
                } else {
                    0.0
                };
                remaining_to_send -= sent;
                if remaining_to_send < CARRYOVER_EPSILON {
                    remaining_to_send = 0.0;
                }
                let carryover = available - sent;

                ShipmentRecord {
                    day,
                    plant_id: lane.plant_id.clone(),
                    store_id: lane.store_id.clone(),
                    item_id: entry.item_id.clone(),
                    priority: entry.priority.clone(),
                    pallet_size: entry.pallet_size,
                    pallets_available: available,
                    pallets_sent: sent,
                    pallets_carryover: carryover,
                    qty_available: available * entry.pallet_size,
                    qty_sent: sent * entry.pallet_size,
                    qty_carryover: carryover * entry.pallet_size,
                    trucks_sent: num_full_trucks,
                }
            })
            .collect()
    }
}

/// 以函数形式调度（校验容量后执行）
pub fn schedule_shipments(rows: &[ShipmentRow], truck_capacity: f64) -> EngineResult<Vec<ShipmentRecord>> {
    Ok(TruckLoadScheduler::new(truck_capacity)?.schedule(rows))
}

// ==========================================
// 辅助函数
// ==========================================

/// 按线路分组（BTreeMap 保证线路遍历顺序确定）
fn group_by_lane(rows: &[ShipmentRow]) -> BTreeMap<LaneKey, Vec<&ShipmentRow>> {
    let mut lanes: BTreeMap<LaneKey, Vec<&ShipmentRow>> = BTreeMap::new();
    for row in rows {
        lanes.entry(row.lane()).or_default().push(row);
    }
    lanes
}

/// 合并昨日结转与今日新增：同 (item, priority, pallet_size) 托盘数相加，
/// 再按 (priority_rank, item_id) 稳定排序
fn merge_entries(state: &LaneState, todays: &[&ShipmentRow]) -> Vec<ShipmentEntry> {
    let mut combined: BTreeMap<EntryKey, ShipmentEntry> = BTreeMap::new();

    for entry in &state.carryover {
        combined
            .entry(entry.key())
            .and_modify(|e| e.pallets += entry.pallets)
            .or_insert_with(|| entry.clone());
    }
    for row in todays {
        combined
            .entry(row.entry_key())
            .and_modify(|e| e.pallets += row.store_pallet_total)
            .or_insert_with(|| {
                ShipmentEntry::new(&row.item_id, &row.priority, row.pallet_size, row.store_pallet_total)
            });
    }

    let mut entries: Vec<ShipmentEntry> = combined.into_values().collect();
    entries.sort_by(|a, b| {
        a.priority_rank
            .cmp(&b.priority_rank)
            .then_with(|| a.item_id.cmp(&b.item_id))
    });
    entries
}

/// 输出排序: (day, plant_id, store_id, priority, item_id)，pallet_size 兜底
fn sort_records(records: &mut [ShipmentRecord]) {
    records.sort_by(|a, b| {
        a.day
            .cmp(&b.day)
            .then_with(|| a.plant_id.cmp(&b.plant_id))
            .then_with(|| a.store_id.cmp(&b.store_id))
            .then_with(|| a.priority.cmp(&b.priority))
            .then_with(|| a.item_id.cmp(&b.item_id))
            .then_with(|| a.pallet_size.total_cmp(&b.pallet_size))
    });
}
