use crate::storage::Storage;
use std::sync::Arc;
use tracing::{error, warn};

/// 关闭连接池，失败只记录日志
pub async fn close_storage(storage: Arc<dyn Storage>) {
    match storage.close().await {
        Ok(()) => warn!("Database connection closed"),
        Err(e) => error!("Failed to close database connection: {e}"),
    }
}
