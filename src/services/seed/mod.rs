pub mod generator;
pub mod integrity;
pub mod run;

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::config::SeedConfig;
use crate::errors::Result;
use crate::models::SchoolIndex;
use crate::models::seed::entities::SeedSummary;
use crate::storage::Storage;

pub struct SeedService {
    storage: Arc<dyn Storage>,
}

impl SeedService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) fn get_storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// 以当前时间为窗口终点生成并写入填充数据
    pub async fn run(&self, config: &SeedConfig) -> Result<SeedSummary> {
        run::run_seed(self, config, Utc::now()).await
    }

    pub async fn run_at(&self, config: &SeedConfig, now: DateTime<Utc>) -> Result<SeedSummary> {
        run::run_seed(self, config, now).await
    }

    /// 检查外键引用完整性并输出班组人数
    pub async fn verify_integrity(&self) -> Result<SchoolIndex> {
        integrity::verify_integrity(self).await
    }
}
