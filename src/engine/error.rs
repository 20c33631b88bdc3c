// ==========================================
// 零售补货计划系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("整车容量非法: {0}（必须为正的有限数）")]
    InvalidTruckCapacity(f64),

    #[error("缺少品项托盘规格: {0}")]
    MissingPalletSize(String),

    #[error("线路调度任务失败: {0}")]
    LaneTaskFailed(String),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
