use super::summary::{DeploymentOutcome, DeploymentSummary};
use super::waterfall::LotWaterfall;
use crate::domain::demand::StoreDemandRow;
use crate::domain::deployment::SentTracker;
use crate::domain::production::ProductionScheduleRow;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, instrument};

/// 门店行索引 key: (plant_id, item_id, day)
type StoreKey<'a> = (&'a str, &'a str, u32);

// ==========================================
// DemandDeploymentEngine - 需求发运引擎
// ==========================================
pub struct DemandDeploymentEngine {
    // 无状态引擎，SentTracker 由调用方或 deploy 内部持有
}

impl DemandDeploymentEngine {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 执行整个计划期的发运分配
    ///
    /// 规则:
    /// 1) 日期 1..=horizon_days 严格递增
    /// 2) 同日批次按输入顺序处理
    /// 3) available_quantity <= 0 或无匹配门店的批次跳过
    ///
    /// # 参数
    /// - `production`: 生产排程
    /// - `demand`: 门店需求
    /// - `horizon_days`: 计划天数
    ///
    /// # 返回
    /// 发运记录 + 汇总
    #[instrument(skip(self, production, demand), fields(
        production_rows = production.len(),
        demand_rows = demand.len(),
        horizon_days = horizon_days
    ))]
    pub fn deploy(
        &self,
        production: &[ProductionScheduleRow],
        demand: &[StoreDemandRow],
        horizon_days: u32,
    ) -> DeploymentOutcome {
        let mut tracker = SentTracker::new();
        self.deploy_with_tracker(production, demand, horizon_days, &mut tracker)
    }

    /// 使用外部 SentTracker 执行分配（便于续算/检查累计状态）
    pub fn deploy_with_tracker(
        &self,
        production: &[ProductionScheduleRow],
        demand: &[StoreDemandRow],
        horizon_days: u32,
        tracker: &mut SentTracker,
    ) -> DeploymentOutcome {
        let store_index = index_stores(demand);
        let production_by_day = group_production_by_day(production, horizon_days);

        let mut outcome = DeploymentOutcome {
            records: Vec::new(),
            summary: DeploymentSummary {
                horizon_days,
                ..Default::default()
            },
        };

        for (day, rows) in production_by_day {
            debug!(day, lots = rows.len(), "处理计划日");

            for row in rows {
                outcome.summary.total_production += row.production_quantity;

                let lot = row.to_lot();
                if !lot.is_deployable() {
                    outcome.summary.lots_skipped_empty += 1;
                    continue;
                }
                outcome.summary.total_available += lot.available_quantity;

                let key: StoreKey = (lot.plant_id.as_str(), lot.item_id.as_str(), day);
                let stores = match store_index.get(&key) {
                    Some(stores) if !stores.is_empty() => stores,
                    _ => {
                        // 无去向的产量直接丢弃，不视为错误
                        debug!(
                            plant_id = %lot.plant_id,
                            item_id = %lot.item_id,
                            day,
                            quantity = lot.available_quantity,
                            "批次无服务门店，跳过"
                        );
                        outcome.summary.lots_skipped_no_stores += 1;
                        outcome.summary.dropped_quantity += lot.available_quantity;
                        continue;
                    }
                };

                let records = LotWaterfall::new(&lot, stores, tracker).run();
                outcome.summary.add_records(&records);
                outcome.summary.lots_deployed += 1;
                outcome.records.extend(records);
            }
        }

        info!(
            records = outcome.records.len(),
            total_available = outcome.summary.total_available,
            total_deployed = outcome.summary.total_deployed,
            dropped_quantity = outcome.summary.dropped_quantity,
            lots_deployed = outcome.summary.lots_deployed,
            "发运分配完成"
        );

        outcome
    }
}

// ==========================================
// 辅助函数
// ==========================================

/// 按 (plant, item, day) 建立门店行索引，保持输入顺序
fn index_stores(demand: &[StoreDemandRow]) -> HashMap<StoreKey<'_>, Vec<&StoreDemandRow>> {
    let mut index: HashMap<StoreKey<'_>, Vec<&StoreDemandRow>> = HashMap::new();
    for row in demand {
        index
            .entry((row.plant_id.as_str(), row.item_id.as_str(), row.day))
            .or_default()
            .push(row);
    }
    index
}

/// 按日分组生产排程（仅保留 1..=horizon_days）
fn group_production_by_day(
    production: &[ProductionScheduleRow],
    horizon_days: u32,
) -> BTreeMap<u32, Vec<&ProductionScheduleRow>> {
    let mut by_day: BTreeMap<u32, Vec<&ProductionScheduleRow>> = BTreeMap::new();
    for row in production {
        if (1..=horizon_days).contains(&row.day) {
            by_day.entry(row.day).or_default().push(row);
        }
    }
    by_day
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for DemandDeploymentEngine {
    fn default() -> Self {
        Self::new()
    }
}
