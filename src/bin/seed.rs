use dotenv::dotenv;
use human_panic::setup_panic;
use std::process::ExitCode;
use tracing::{error, info};

use school_records::config::AppConfig;
use school_records::runtime::lifetime;
use school_records::services::SeedService;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();

    setup_panic!();
    AppConfig::init().expect("Failed to initialize configuration");
    let config = AppConfig::get();

    let _guard = lifetime::startup::init_tracing(config);
    lifetime::startup::log_banner("school-seed");

    let storage = match lifetime::startup::prepare_storage(config).await {
        Ok(storage) => storage,
        Err(e) => {
            error!("{e}");
            eprintln!("{}", e.format_simple());
            return ExitCode::FAILURE;
        }
    };

    let result = SeedService::new(storage.clone()).run(&config.seed).await;

    lifetime::shutdown::close_storage(storage).await;

    match result {
        Ok(summary) => {
            info!("Database seeded successfully");
            println!(
                "Database seeded successfully: {} groups created ({} reused), {} teachers, {} subjects, {} students, {} grades.",
                summary.groups_created,
                summary.groups_reused,
                summary.teachers,
                summary.subjects,
                summary.students,
                summary.grades
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e.format_simple());
            ExitCode::FAILURE
        }
    }
}
