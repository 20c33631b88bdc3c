// ==========================================
// 零售补货计划系统 - 计划参数
// ==========================================
// 职责: 计划天数 + 整车容量；纯参数，不绑定环境变量
// 存储: 可选 JSON 文件（缺省字段取默认值）
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// 默认计划天数
pub const DEFAULT_HORIZON_DAYS: u32 = 45;

/// 默认整车容量（托盘单位）
pub const DEFAULT_TRUCK_CAPACITY: f64 = 34.0;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("配置格式错误: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("配置值非法 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}

/// 计划参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningConfig {
    /// 计划天数（day 1..=horizon_days）
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,

    /// 整车容量（托盘单位）
    #[serde(default = "default_truck_capacity")]
    pub truck_capacity: f64,
}

fn default_horizon_days() -> u32 {
    DEFAULT_HORIZON_DAYS
}

fn default_truck_capacity() -> f64 {
    DEFAULT_TRUCK_CAPACITY
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            truck_capacity: DEFAULT_TRUCK_CAPACITY,
        }
    }
}

impl PlanningConfig {
    /// 校验参数
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.horizon_days == 0 {
            return Err(ConfigError::InvalidValue {
                key: "horizon_days".to_string(),
                value: self.horizon_days.to_string(),
                message: "计划天数必须 >= 1".to_string(),
            });
        }
        if !self.truck_capacity.is_finite() || self.truck_capacity <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "truck_capacity".to_string(),
                value: self.truck_capacity.to_string(),
                message: "整车容量必须为正数".to_string(),
            });
        }
        Ok(())
    }

    /// 从 JSON 字符串解析并校验
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: PlanningConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 文件加载并校验
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}
