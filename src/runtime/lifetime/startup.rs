use crate::config::AppConfig;
use crate::errors::Result;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;

/// 初始化日志
///
/// 日志写入 stderr，stdout 只留给报表输出。
/// 开发环境输出带文件和行号的可读格式，其余环境输出 JSON。
/// 返回的 guard 必须在 main 中持有，否则缓冲中的日志会丢失。
pub fn init_tracing(config: &AppConfig) -> WorkerGuard {
    let stderr_log = std::io::stderr();
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(stderr_log);
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    guard
}

/// 打印启动信息
pub fn log_banner(binary: &str) {
    warn!(
        "Starting {}...
        Project: {}
        Version: {}
        Authors: {}",
        binary,
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_AUTHORS")
    );
}

/// 建立数据库连接并完成迁移
pub async fn prepare_storage(config: &AppConfig) -> Result<Arc<dyn Storage>> {
    let storage = crate::storage::create_storage(&config.database).await?;
    warn!("Storage backend initialized and migrations completed");
    Ok(storage)
}
