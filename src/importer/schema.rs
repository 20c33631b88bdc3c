// ==========================================
// 零售补货计划系统 - 输入表结构
// ==========================================
// 职责: 列名规范化 + 必需列校验
// 红线: 缺列在任何分配计算之前报错，一次列出全部缺失列
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use std::collections::BTreeSet;

/// 生产排程必需列
pub const PRODUCTION_COLUMNS: &[&str] = &[
    "plant_id",
    "item_id",
    "day",
    "production_quantity",
    "starting_inventory_plant",
];

/// 门店需求必需列
pub const STORE_DEMAND_COLUMNS: &[&str] = &[
    "plant_id",
    "item_id",
    "day",
    "store_id",
    "projection",
    "avg_daily_demand",
    "transit_time_days",
    "safety_stock_static",
];

/// 装车输入必需列
pub const SHIPMENT_COLUMNS: &[&str] = &[
    "day",
    "plant_id",
    "store_id",
    "item_id",
    "priority",
    "pallet_size",
    "store_pallet_total",
];

/// 列名规范化: 去首尾空白、小写、空格转下划线
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// 校验必需列，返回按名称排序的全部缺失列
pub fn require_columns<S: AsRef<str>>(
    table: &str,
    headers: &[S],
    required: &[&str],
) -> ImportResult<()> {
    let present: BTreeSet<&str> = headers.iter().map(|h| h.as_ref()).collect();
    let missing: Vec<String> = required
        .iter()
        .filter(|col| !present.contains(**col))
        .map(|col| col.to_string())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ImportError::MissingColumns {
            table: table.to_string(),
            missing,
        })
    }
}
