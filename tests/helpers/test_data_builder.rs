// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use retail_replenishment::domain::{ProductionScheduleRow, ShipmentRow, StoreDemandRow};

// ==========================================
// ProductionScheduleRow 构建器
// ==========================================

pub struct ProductionBuilder {
    plant_id: String,
    item_id: String,
    day: u32,
    production_quantity: f64,
    starting_inventory_plant: f64,
}

impl ProductionBuilder {
    pub fn new(plant_id: &str, item_id: &str, day: u32) -> Self {
        Self {
            plant_id: plant_id.to_string(),
            item_id: item_id.to_string(),
            day,
            production_quantity: 0.0,
            starting_inventory_plant: 0.0,
        }
    }

    pub fn quantity(mut self, qty: f64) -> Self {
        self.production_quantity = qty;
        self
    }

    pub fn starting_inventory(mut self, qty: f64) -> Self {
        self.starting_inventory_plant = qty;
        self
    }

    pub fn build(self) -> ProductionScheduleRow {
        ProductionScheduleRow {
            plant_id: self.plant_id,
            item_id: self.item_id,
            day: self.day,
            production_quantity: self.production_quantity,
            starting_inventory_plant: self.starting_inventory_plant,
        }
    }
}

// ==========================================
// StoreDemandRow 构建器
// ==========================================

pub struct StoreDemandBuilder {
    row: StoreDemandRow,
}

impl StoreDemandBuilder {
    pub fn new(plant_id: &str, item_id: &str, day: u32, store_id: &str) -> Self {
        Self {
            row: StoreDemandRow {
                store_id: store_id.to_string(),
                item_id: item_id.to_string(),
                day,
                plant_id: plant_id.to_string(),
                projection: 0.0,
                avg_daily_demand: 0.0,
                transit_time_days: 0,
                safety_stock_static: 0.0,
            },
        }
    }

    pub fn projection(mut self, projection: f64) -> Self {
        self.row.projection = projection;
        self
    }

    pub fn demand(mut self, avg_daily_demand: f64) -> Self {
        self.row.avg_daily_demand = avg_daily_demand;
        self
    }

    pub fn transit(mut self, days: u32) -> Self {
        self.row.transit_time_days = days;
        self
    }

    pub fn safety_stock(mut self, qty: f64) -> Self {
        self.row.safety_stock_static = qty;
        self
    }

    pub fn build(self) -> StoreDemandRow {
        self.row
    }
}

// ==========================================
// ShipmentRow 构建器
// ==========================================

pub fn shipment_row(
    day: u32,
    plant_id: &str,
    store_id: &str,
    item_id: &str,
    priority: &str,
    pallet_size: f64,
    pallets: f64,
) -> ShipmentRow {
    ShipmentRow {
        day,
        plant_id: plant_id.to_string(),
        store_id: store_id.to_string(),
        item_id: item_id.to_string(),
        priority: priority.to_string(),
        pallet_size,
        store_pallet_total: pallets,
    }
}

// ==========================================
// 确定性伪随机数（线性同余），用于批量场景生成
// ==========================================

pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    /// [low, high)
    pub fn range(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }

    /// [0, n)
    pub fn below(&mut self, n: u32) -> u32 {
        ((self.next_f64() * n as f64) as u32).min(n.saturating_sub(1))
    }
}

// ==========================================
// 批量场景
// ==========================================

/// 生成多工厂、多品项、多门店、多日的发运场景
pub fn generate_deployment_scenario(
    seed: u64,
    days: u32,
) -> (Vec<ProductionScheduleRow>, Vec<StoreDemandRow>) {
    let mut rng = Lcg::new(seed);
    let mut production = Vec::new();
    let mut demand = Vec::new();

    for day in 1..=days {
        for plant in ["P1", "P2"] {
            for item in ["SKU1", "SKU2", "SKU3"] {
                // 约 1/5 的批次为零产量
                let qty = if rng.below(5) == 0 {
                    0.0
                } else {
                    rng.range(0.0, 400.0)
                };
                production.push(
                    ProductionBuilder::new(plant, item, day)
                        .quantity(qty)
                        .starting_inventory(if day == 1 { rng.range(0.0, 50.0) } else { 0.0 })
                        .build(),
                );

                // SKU3 在 P2 无服务门店
                if plant == "P2" && item == "SKU3" {
                    continue;
                }
                for store in ["S1", "S2", "S3", "S4"] {
                    let avg = if rng.below(4) == 0 { 0.0 } else { rng.range(0.5, 30.0) };
                    let ss = if rng.below(4) == 0 { 0.0 } else { rng.range(1.0, 120.0) };
                    demand.push(
                        StoreDemandBuilder::new(plant, item, day, store)
                            .projection(rng.range(-20.0, 150.0))
                            .demand(avg)
                            .transit(rng.below(6))
                            .safety_stock(ss)
                            .build(),
                    );
                }
            }
        }
    }

    (production, demand)
}
