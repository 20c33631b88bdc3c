// ==========================================
// 单批次四轮瀑布分配
// ==========================================

use crate::domain::demand::StoreDemandRow;
use crate::domain::deployment::{DeploymentRecord, SentTracker};
use crate::domain::production::ProductionLot;
use crate::domain::types::{DeploymentPriority, BUFFER_MULTIPLIER};
use tracing::trace;

/// 单个候选门店（need 在该轮开始前计算）
struct Candidate<'a> {
    store: &'a StoreDemandRow,
    need: f64,
    sort_key: f64,
}

/// 单批次分配上下文
///
/// remaining 从 available_quantity 开始递减，任一轮中 remaining <= 0 即短路。
pub(super) struct LotWaterfall<'a> {
    lot: &'a ProductionLot,
    stores: &'a [&'a StoreDemandRow],
    tracker: &'a mut SentTracker,
    records: Vec<DeploymentRecord>,
    remaining: f64,
}

impl<'a> LotWaterfall<'a> {
    pub(super) fn new(
        lot: &'a ProductionLot,
        stores: &'a [&'a StoreDemandRow],
        tracker: &'a mut SentTracker,
    ) -> Self {
        Self {
            lot,
            stores,
            tracker,
            records: Vec::new(),
            remaining: lot.available_quantity,
        }
    }

    /// 依次执行四轮，返回本批次发运记录
    pub(super) fn run(mut self) -> Vec<DeploymentRecord> {
        self.critical_risk_pass();
        if self.remaining > 0.0 {
            self.safety_stock_pass();
        }
        if self.remaining > 0.0 {
            self.buffer_stock_pass();
        }
        if self.remaining > 0.0 {
            self.leftover_pass();
        }
        self.records
    }

    /// 门店当前库存 = 预计库存 + 全程已发运
    fn current_stock(&self, store: &StoreDemandRow) -> f64 {
        store.projection + self.tracker.already_sent(&store.store_id, &self.lot.item_id)
    }

    // ==========================================
    // 第 1 轮: 断货风险
    // ==========================================
    // 可售天数 < 在途 + 2 的门店，按可售天数升序补至风险期需求
    fn critical_risk_pass(&mut self) {
        let stores = self.stores;
        let mut critical: Vec<Candidate<'a>> = Vec::new();
        for &store in stores {
            let current_stock = self.current_stock(store);
            let days_until_oos = store.days_until_stockout(current_stock);
            let risk_period = store.risk_period_days() as f64;

            if days_until_oos < risk_period {
                critical.push(Candidate {
                    store,
                    need: (risk_period * store.avg_daily_demand - current_stock).max(0.0),
                    sort_key: days_until_oos,
                });
            }
        }

        // 稳定排序: 同可售天数保持输入顺序
        critical.sort_by(|a, b| a.sort_key.total_cmp(&b.sort_key));
        self.serve(critical, DeploymentPriority::CriticalRisk);
    }

    // ==========================================
    // 第 2 轮: 安全库存
    // ==========================================
    // 按输入顺序，有效库存低于静态安全库存的门店补足差额
    fn safety_stock_pass(&mut self) {
        let stores = self.stores;
        for &store in stores {
            if self.remaining <= 0.0 {
                break;
            }
            let effective_stock = self.current_stock(store);
            if effective_stock < store.safety_stock_static {
                let need = store.safety_stock_static - effective_stock;
                let send = need.min(self.remaining);
                self.send(store, send, DeploymentPriority::SafetyStock);
            }
        }
    }

    // ==========================================
    // 第 3 轮: 缓冲库存
    // ==========================================
    // 缓冲比 < 2 的门店按缓冲比升序补至 2 倍安全库存
    fn buffer_stock_pass(&mut self) {
        let stores = self.stores;
        let mut low_buffer: Vec<Candidate<'a>> = Vec::new();
        for &store in stores {
            let effective_stock = self.current_stock(store);
            let buffer_ratio = store.buffer_ratio(effective_stock);

            if buffer_ratio < BUFFER_MULTIPLIER {
                low_buffer.push(Candidate {
                    store,
                    need: (store.buffer_target() - effective_stock).max(0.0),
                    sort_key: buffer_ratio,
                });
            }
        }

        low_buffer.sort_by(|a, b| a.sort_key.total_cmp(&b.sort_key));
        self.serve(low_buffer, DeploymentPriority::BufferStock);
    }

    // ==========================================
    // 第 4 轮: 剩余分配
    // ==========================================
    // 按日均需求占比分配（总需求为 0 时均分），末位门店吸收尾差；
    // 本轮结束后 remaining 强制归零
    fn leftover_pass(&mut self) {
        let stores = self.stores;
        let weights: Vec<f64> = stores.iter().map(|s| s.avg_daily_demand).collect();
        let allocations = split_with_remainder(self.remaining, &weights);

        for (&store, allocated) in stores.iter().zip(allocations) {
            if allocated > 0.0 {
                self.emit(store, allocated, DeploymentPriority::Leftover);
            }
        }
        self.remaining = 0.0;
    }

    /// 按排序后的候选依次发运 min(need, remaining)；need 为 0 的候选也留下 0 数量记录
    fn serve(&mut self, candidates: Vec<Candidate<'a>>, priority: DeploymentPriority) {
        for candidate in candidates {
            if self.remaining <= 0.0 {
                break;
            }
            let send = candidate.need.min(self.remaining);
            self.send(candidate.store, send, priority);
        }
    }

    /// 发运并扣减 remaining
    fn send(&mut self, store: &StoreDemandRow, quantity: f64, priority: DeploymentPriority) {
        self.emit(store, quantity, priority);
        self.remaining -= quantity;
    }

    fn emit(&mut self, store: &StoreDemandRow, quantity: f64, priority: DeploymentPriority) {
        trace!(
            store_id = %store.store_id,
            item_id = %self.lot.item_id,
            quantity,
            priority = %priority,
            "门店发运"
        );

        self.records.push(DeploymentRecord {
            day: self.lot.day,
            plant_id: self.lot.plant_id.clone(),
            item_id: self.lot.item_id.clone(),
            store_id: store.store_id.clone(),
            quantity,
            arrival_day: self.lot.day + store.transit_time_days,
            priority,
        });
        self.tracker.record(&store.store_id, &self.lot.item_id, quantity);
    }
}

/// 按权重比例拆分 total，末位吸收尾差
///
/// 规则:
/// - 权重合计 > 0: 第 i 位分得 total × w_i / Σw
/// - 权重合计 = 0: 均分
/// - 最后一位分得 total − 前面各位之和（保证合计严格等于 total）
pub fn split_with_remainder(total: f64, weights: &[f64]) -> Vec<f64> {
    let count = weights.len();
    if count == 0 {
        return Vec::new();
    }

    let total_weight: f64 = weights.iter().sum();
    let mut distributed = 0.0;
    let mut allocations = Vec::with_capacity(count);

    for (i, weight) in weights.iter().enumerate() {
        let allocated = if i == count - 1 {
            total - distributed
        } else if total_weight > 0.0 {
            total * (weight / total_weight)
        } else {
            total / count as f64
        };
        if i < count - 1 {
            distributed += allocated;
        }
        allocations.push(allocated);
    }

    allocations
}
