// ==========================================
// 零售补货计划系统 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 输出: RawTable（表头已规范化）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::schema::normalize_column_name;
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;

// ==========================================
// RawTable - 原始表
// ==========================================

/// 原始数据行（row_number 为源文件行号，表头为第 1 行）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub row_number: usize,
    pub values: HashMap<String, String>,
}

impl RawRow {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(|v| v.as_str())
    }
}

/// 原始表（列名已规范化）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// 由内存记录构造（列名规范化；表头取所有记录键的并集）
    pub fn from_records(records: Vec<HashMap<String, String>>) -> Self {
        let mut headers: BTreeSet<String> = BTreeSet::new();
        let rows = records
            .into_iter()
            .enumerate()
            .map(|(idx, record)| {
                let values: HashMap<String, String> = record
                    .into_iter()
                    .map(|(k, v)| (normalize_column_name(&k), v.trim().to_string()))
                    .collect();
                headers.extend(values.keys().cloned());
                RawRow {
                    row_number: idx + 2,
                    values,
                }
            })
            .collect();

        Self {
            headers: headers.into_iter().collect(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 由表头 + 数据行组装 RawTable，跳过完全空白的行
fn build_table<I>(raw_headers: Vec<String>, data_rows: I) -> RawTable
where
    I: IntoIterator<Item = Vec<String>>,
{
    let headers: Vec<String> = raw_headers
        .iter()
        .map(|h| normalize_column_name(h))
        .collect();

    let mut rows = Vec::new();
    for (idx, cells) in data_rows.into_iter().enumerate() {
        let mut values = HashMap::new();
        for (col_idx, value) in cells.into_iter().enumerate() {
            if let Some(header) = headers.get(col_idx) {
                values.insert(header.clone(), value.trim().to_string());
            }
        }

        // 跳过完全空白的行
        if values.values().all(|v| v.is_empty()) {
            continue;
        }

        rows.push(RawRow {
            row_number: idx + 2,
            values,
        });
    }

    RawTable { headers, rows }
}

// ==========================================
// TableParser Trait
// ==========================================
pub trait TableParser {
    /// 解析文件为原始表
    fn parse_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}

/// 检查文件存在
fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 从任意 Reader 解析 CSV
    pub fn parse_reader<R: Read>(&self, reader: R) -> ImportResult<RawTable> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

        let mut data_rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            data_rows.push(record.iter().map(|v| v.to_string()).collect::<Vec<String>>());
        }

        Ok(build_table(headers, data_rows))
    }
}

impl TableParser for CsvParser {
    fn parse_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        ensure_exists(file_path)?;

        // 检查扩展名
        if let Some(ext) = file_path.extension() {
            if !ext.eq_ignore_ascii_case("csv") {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(file_path)?;
        self.parse_reader(file)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl TableParser for ExcelParser {
    fn parse_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        ensure_exists(file_path)?;

        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 按扩展名选择 xlsx / xls 读取器
        let mut workbook = open_workbook_auto(file_path)?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;
        let headers: Vec<String> = header_row.iter().map(|cell| cell.to_string()).collect();

        let data_rows = rows.map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<String>>());
        Ok(build_table(headers, data_rows))
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<RawTable> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_table(path),
            "xlsx" | "xls" => ExcelParser.parse_table(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
