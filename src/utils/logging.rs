/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::models::Report;

/// 初始化日志
///
/// 日志级别由 `RUST_LOG` 控制，默认 `info`；重复调用不会报错
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `flow`: 流程名称
/// - `model`: 使用的模型（部署）名称
pub fn log_startup(flow: &str, model: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - {}", flow);
    info!("🤖 模型部署: {}", model);
    info!(
        "🕒 启动时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(report: &Report) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部评估完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!(
        "✅ 成功: {}/{}",
        report.successful_requests, report.total_requests
    );
    info!("❌ 失败: {}", report.failed_requests);
    info!("⏱ 平均耗时: {:.2}s", report.average_duration);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（字符数）
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
