// ==========================================
// 零售补货计划系统 - 装车调度引擎
// ==========================================
// 职责: 按线路 (plant → store) 逐日合并托盘、整车装载、结转未发
// 输入: ShipmentRow 列表（托盘数） + 整车容量
// 输出: ShipmentRecord 列表
// ==========================================
// 红线: 只发整车，不发零担（即使零担能清空线路）
// 红线: 同一线路日期严格递增；结转只属于本线路
// 红线: 严格按优先级等级发运，高等级有结转时低等级不得发运
// ==========================================

mod core;
mod summary;


pub use core::{schedule_shipments, LaneSchedule, TruckLoadScheduler};
pub use summary::{LaneCarryover, ShipmentSummary};
