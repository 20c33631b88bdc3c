// ==========================================
// 零售补货计划系统 - 结果导出
// ==========================================
// 职责: 发运记录 / 装车记录写出为 CSV（列名与输出表一致）
// ==========================================

use crate::domain::deployment::DeploymentRecord;
use crate::domain::shipment::ShipmentRecord;
use crate::importer::error::ImportResult;
use serde::Serialize;
use std::io::Write;

/// 通用 CSV 写出（表头取自结构体字段名）
fn write_csv<W: Write, T: Serialize>(writer: W, records: &[T]) -> ImportResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// 写出发运记录
pub fn write_deployments_csv<W: Write>(writer: W, records: &[DeploymentRecord]) -> ImportResult<()> {
    write_csv(writer, records)
}

/// 写出装车记录
pub fn write_shipments_csv<W: Write>(writer: W, records: &[ShipmentRecord]) -> ImportResult<()> {
    write_csv(writer, records)
}
