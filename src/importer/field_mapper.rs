// ==========================================
// 零售补货计划系统 - 字段映射器实现
// ==========================================
// 职责: RawTable → 强类型输入行 + 类型转换 + 取值范围校验
// 红线: 必需列校验先于任何行映射
// ==========================================

use crate::domain::demand::StoreDemandRow;
use crate::domain::production::ProductionScheduleRow;
use crate::domain::shipment::ShipmentRow;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawRow, RawTable};
use crate::importer::schema::{
    require_columns, PRODUCTION_COLUMNS, SHIPMENT_COLUMNS, STORE_DEMAND_COLUMNS,
};
use tracing::debug;

pub struct FieldMapper;

impl FieldMapper {
    // ==========================================
    // 表级映射
    // ==========================================

    /// 生产排程表
    pub fn map_production(&self, table: &RawTable) -> ImportResult<Vec<ProductionScheduleRow>> {
        require_columns("production_schedule", &table.headers, PRODUCTION_COLUMNS)?;
        let rows = table
            .rows
            .iter()
            .map(|row| {
                Ok(ProductionScheduleRow {
                    plant_id: self.require_string(row, "plant_id")?,
                    item_id: self.require_string(row, "item_id")?,
                    day: self.parse_day(row)?,
                    production_quantity: self.parse_non_negative(row, "production_quantity")?,
                    starting_inventory_plant: self
                        .parse_non_negative(row, "starting_inventory_plant")?,
                })
            })
            .collect::<ImportResult<Vec<_>>>()?;

        debug!(rows = rows.len(), "生产排程映射完成");
        Ok(rows)
    }

    /// 门店需求表
    pub fn map_store_demand(&self, table: &RawTable) -> ImportResult<Vec<StoreDemandRow>> {
        require_columns("store_demand", &table.headers, STORE_DEMAND_COLUMNS)?;
        let rows = table
            .rows
            .iter()
            .map(|row| {
                Ok(StoreDemandRow {
                    store_id: self.require_string(row, "store_id")?,
                    item_id: self.require_string(row, "item_id")?,
                    day: self.parse_day(row)?,
                    plant_id: self.require_string(row, "plant_id")?,
                    // 预计库存允许为负（已欠货）
                    projection: self.parse_f64(row, "projection")?,
                    avg_daily_demand: self.parse_non_negative(row, "avg_daily_demand")?,
                    transit_time_days: self.parse_u32(row, "transit_time_days")?,
                    safety_stock_static: self.parse_non_negative(row, "safety_stock_static")?,
                })
            })
            .collect::<ImportResult<Vec<_>>>()?;

        debug!(rows = rows.len(), "门店需求映射完成");
        Ok(rows)
    }

    /// 装车输入表
    pub fn map_shipments(&self, table: &RawTable) -> ImportResult<Vec<ShipmentRow>> {
        require_columns("shipments", &table.headers, SHIPMENT_COLUMNS)?;
        let rows = table
            .rows
            .iter()
            .map(|row| {
                let pallet_size = self.parse_f64(row, "pallet_size")?;
                if pallet_size <= 0.0 {
                    return Err(ImportError::ValueRangeError {
                        row: row.row_number,
                        field: "pallet_size".to_string(),
                        value: pallet_size,
                        constraint: "> 0".to_string(),
                    });
                }
                Ok(ShipmentRow {
                    day: self.parse_u32(row, "day")?,
                    plant_id: self.require_string(row, "plant_id")?,
                    store_id: self.require_string(row, "store_id")?,
                    item_id: self.require_string(row, "item_id")?,
                    // 未知优先级原样保留，装车时排最后
                    priority: self.require_string(row, "priority")?,
                    pallet_size,
                    store_pallet_total: self.parse_non_negative(row, "store_pallet_total")?,
                })
            })
            .collect::<ImportResult<Vec<_>>>()?;

        debug!(rows = rows.len(), "装车输入映射完成");
        Ok(rows)
    }

    // ==========================================
    // 单元格转换
    // ==========================================

    /// 提取非空字符串
    fn require_string(&self, row: &RawRow, key: &str) -> ImportResult<String> {
        match row.get(key).map(str::trim) {
            Some(v) if !v.is_empty() => Ok(v.to_string()),
            _ => Err(ImportError::MissingValue {
                row: row.row_number,
                field: key.to_string(),
            }),
        }
    }

    /// 解析浮点数
    fn parse_f64(&self, row: &RawRow, key: &str) -> ImportResult<f64> {
        let value = self.require_string(row, key)?;
        let parsed = value
            .parse::<f64>()
            .map_err(|_| ImportError::TypeConversionError {
                row: row.row_number,
                field: key.to_string(),
                message: format!("无法解析为浮点数: {}", value),
            })?;
        if !parsed.is_finite() {
            return Err(ImportError::TypeConversionError {
                row: row.row_number,
                field: key.to_string(),
                message: format!("数值非有限: {}", value),
            });
        }
        Ok(parsed)
    }

    /// 解析非负浮点数
    fn parse_non_negative(&self, row: &RawRow, key: &str) -> ImportResult<f64> {
        let value = self.parse_f64(row, key)?;
        if value < 0.0 {
            return Err(ImportError::ValueRangeError {
                row: row.row_number,
                field: key.to_string(),
                value,
                constraint: ">= 0".to_string(),
            });
        }
        Ok(value)
    }

    /// 解析非负整数（兼容 "3.0" 这类表格导出的整数）
    fn parse_u32(&self, row: &RawRow, key: &str) -> ImportResult<u32> {
        let value = self.require_string(row, key)?;
        if let Ok(parsed) = value.parse::<u32>() {
            return Ok(parsed);
        }
        match value.parse::<f64>() {
            Ok(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => {
                Ok(f as u32)
            }
            _ => Err(ImportError::TypeConversionError {
                row: row.row_number,
                field: key.to_string(),
                message: format!("无法解析为非负整数: {}", value),
            }),
        }
    }

    /// 解析计划日（>= 1）
    fn parse_day(&self, row: &RawRow) -> ImportResult<u32> {
        let day = self.parse_u32(row, "day")?;
        if day == 0 {
            return Err(ImportError::ValueRangeError {
                row: row.row_number,
                field: "day".to_string(),
                value: 0.0,
                constraint: ">= 1".to_string(),
            });
        }
        Ok(day)
    }
}
