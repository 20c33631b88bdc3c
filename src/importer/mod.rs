// ==========================================
// 零售补货计划系统 - 导入层
// ==========================================
// 职责: 外部表格导入,生成强类型输入行
// 支持: Excel, CSV, 内存记录
// ==========================================

pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod schema;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, ExcelParser, RawRow, RawTable, TableParser, UniversalFileParser};
pub use schema::{normalize_column_name, require_columns};
