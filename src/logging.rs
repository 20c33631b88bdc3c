// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 引擎入口（deploy / schedule）带 #[instrument] span，
// 逐门店发运为 trace 级别，线路装车为 debug 级别
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 默认过滤器: 只看批次级汇总
const DEFAULT_FILTER: &str = "info";

/// 测试过滤器: 本库 debug（含线路装车明细），依赖库保持 warn
const TEST_FILTER: &str = "warn,retail_replenishment=debug";

/// RUST_LOG 优先，未设置或非法时取 fallback
fn env_filter_or(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: info）
///   例如: RUST_LOG=retail_replenishment::engine::deployment=trace 查看逐门店发运
///
/// # 示例
/// ```no_run
/// use retail_replenishment::logging;
/// logging::init();
/// ```
pub fn init() {
    fmt()
        .with_env_filter(env_filter_or(DEFAULT_FILTER))
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// 初始化测试环境的日志系统（重复调用无副作用）
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new(TEST_FILTER))
        .with_test_writer()
        .try_init();
}
