/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use tracing_subscriber::EnvFilter;
use tracing::info;

/// 初始化 tracing 日志
///
/// 优先读取 `RUST_LOG`，未设置时默认 `info`
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
/// - `total_users`: 待处理用户数
/// - `model_name`: 使用的模型
pub fn log_startup(total_users: usize, model_name: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - Classroom 自动交作业");
    info!("👥 待处理用户: {}", total_users);
    info!("🤖 模型: {}", model_name);
    info!("{}", "=".repeat(60));
}

/// 记录用户开始处理
pub fn log_user_start(index: usize, total: usize, email: &str) {
    info!("\n{}", "─".repeat(60));
    info!("👤 开始处理第 {}/{} 个用户: {}", index, total, email);
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `turned_in`: 成功交作业数量
/// - `skipped`: 没有作业或没有提交记录的数量
/// - `failed`: 授权、上传、交作业等失败数量
/// - `total`: 用户总数
pub fn print_final_stats(turned_in: usize, skipped: usize, failed: usize, total: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 已交作业: {}/{}", turned_in, total);
    info!("⏭️ 跳过: {}", skipped);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
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
