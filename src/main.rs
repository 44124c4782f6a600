use dotenv::dotenv;
use human_panic::setup_panic;
use std::process::ExitCode;
use tracing::{debug, error};

// 从 lib.rs 导入模块
use school_records::config::AppConfig;
use school_records::errors::Result;
use school_records::models::reports::responses::ReportParams;
use school_records::runtime::lifetime;
use school_records::services::ReportService;
use school_records::services::report::ReportFormat;
use school_records::storage::Storage;
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();

    let start = chrono::Utc::now();

    // 初始化配置
    setup_panic!();
    AppConfig::init().expect("Failed to initialize configuration");
    let config = AppConfig::get();

    // 初始化日志
    let _guard = lifetime::startup::init_tracing(config);
    lifetime::startup::log_banner("school-report");

    let storage = match lifetime::startup::prepare_storage(config).await {
        Ok(storage) => storage,
        Err(e) => {
            error!("{e}");
            eprintln!("{}", e.format_simple());
            return ExitCode::FAILURE;
        }
    };

    let result = run_report(storage.clone(), config).await;

    // 无论成功与否都关闭连接
    lifetime::shutdown::close_storage(storage).await;

    debug!(
        "Report finished in {} ms",
        chrono::Utc::now()
            .signed_duration_since(start)
            .num_milliseconds()
    );

    match result {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Report failed: {e}");
            eprintln!("{}", e.format_simple());
            ExitCode::FAILURE
        }
    }
}

async fn run_report(storage: Arc<dyn Storage>, config: &AppConfig) -> Result<String> {
    let format: ReportFormat = config.report.format.parse()?;
    let params = ReportParams {
        subject_id: config.report.subject_id,
        group_id: config.report.group_id,
        teacher_id: config.report.teacher_id,
    };

    let service = ReportService::new(storage);
    let report = service.build_report(params).await?;
    service.render(&report, format)
}
