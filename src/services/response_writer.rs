//! 回答写入服务 - 业务能力层
//!
//! 只负责"把回答写进本地文件"能力，不关心流程

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::error::FileError;

/// 回答写入服务
///
/// 职责：
/// - 覆盖写入固定路径的文本文件
/// - 写入失败只记录日志，不向上抛出
pub struct ResponseWriter {
    file_path: PathBuf,
}

impl ResponseWriter {
    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// 写入文本
    ///
    /// # 返回
    /// 返回是否成功写入
    pub fn write_text(&self, content: &str) -> bool {
        match write_file(&self.file_path, content) {
            Ok(()) => {
                info!("📝 已写入文件: {}", self.file_path.display());
                true
            }
            Err(e) => {
                error!("❌ {}", e);
                false
            }
        }
    }
}

/// 句柄在作用域结束时关闭，任何返回路径都不会泄漏
fn write_file(path: &Path, content: &str) -> Result<(), FileError> {
    let wrap = |source| FileError::WriteFailed {
        path: path.display().to_string(),
        source,
    };

    debug!("写入 {} 字节到 {}", content.len(), path.display());

    let mut file = File::create(path).map_err(wrap)?;
    file.write_all(content.as_bytes()).map_err(wrap)?;
    file.flush().map_err(wrap)?;
    Ok(())
}
