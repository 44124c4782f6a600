pub mod build;
pub mod render;

pub use render::ReportFormat;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::reports::responses::{ReportParams, SchoolReport};
use crate::storage::Storage;

pub struct ReportService {
    storage: Arc<dyn Storage>,
}

impl ReportService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) fn get_storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// 依次执行七个报表查询
    pub async fn build_report(&self, params: ReportParams) -> Result<SchoolReport> {
        build::build_report(self, params).await
    }

    pub fn render(&self, report: &SchoolReport, format: ReportFormat) -> Result<String> {
        render::render_report(report, format)
    }
}
