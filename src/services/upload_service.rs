//! 上传服务 - 业务能力层
//!
//! 只负责"上传文件并拿到远程 ID"能力，失败时不返回 ID

use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

use crate::clients::StorageApi;

pub const TEXT_PLAIN: &str = "text/plain";

/// 上传服务
pub struct UploadService {
    storage: Arc<dyn StorageApi>,
}

impl UploadService {
    pub fn new(storage: Arc<dyn StorageApi>) -> Self {
        Self { storage }
    }

    /// 上传文件
    ///
    /// # 返回
    /// 成功返回远程文件 ID；任何错误都记录日志并返回 `None`
    pub async fn upload(&self, local_path: &Path, mime_type: &str) -> Option<String> {
        match self.storage.create_file(local_path, mime_type).await {
            Ok(file_id) => {
                info!("☁️ 已上传文件，ID: {}", file_id);
                Some(file_id)
            }
            Err(e) => {
                error!("❌ 上传文件失败 ({}): {}", local_path.display(), e);
                None
            }
        }
    }
}
