/// Drive API 客户端
///
/// 只负责把本地文件上传成 Drive 上的新文件
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::auth::TokenSource;
use crate::clients::classroom_client::google_error_message;
use crate::error::{ApiError, AppError, AppResult};

const BOUNDARY: &str = "classroom_autosubmit_boundary";

/// 存储能力
#[async_trait]
pub trait StorageApi: Send + Sync {
    /// 上传本地文件，返回远程文件 ID
    async fn create_file(&self, local_path: &Path, mime_type: &str) -> AppResult<String>;
}

#[derive(Debug, Deserialize)]
struct CreatedFile {
    id: Option<String>,
}

/// Drive REST 客户端
pub struct DriveClient {
    http: Client,
    upload_base_url: String,
    tokens: Arc<dyn TokenSource>,
}

impl DriveClient {
    pub fn new(http: Client, upload_base_url: &str, tokens: Arc<dyn TokenSource>) -> Self {
        Self {
            http,
            upload_base_url: upload_base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }
}

/// 构建 `multipart/related` 上传体：第一段是元数据 JSON，第二段是文件内容
fn build_multipart_body(file_name: &str, mime_type: &str, content: &[u8]) -> Vec<u8> {
    let metadata = json!({
        "name": file_name,
        "mimeType": mime_type,
    });

    let mut body = Vec::with_capacity(content.len() + 256);
    body.extend_from_slice(
        format!(
            "--{b}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{meta}\r\n--{b}\r\nContent-Type: {mime}\r\n\r\n",
            b = BOUNDARY,
            meta = metadata,
            mime = mime_type
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

#[async_trait]
impl StorageApi for DriveClient {
    async fn create_file(&self, local_path: &Path, mime_type: &str) -> AppResult<String> {
        let endpoint = "files.create";
        let path_str = local_path.display().to_string();

        let content = tokio::fs::read(local_path)
            .await
            .map_err(|e| AppError::file_read_failed(&path_str, e))?;

        let file_name = local_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path_str.clone());

        let token = self.tokens.access_token().await?;
        let url = format!("{}/upload/drive/v3/files", self.upload_base_url);

        debug!("上传文件 {} ({} 字节, {})", file_name, content.len(), mime_type);

        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .query(&[("uploadType", "multipart"), ("fields", "id")])
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={}", BOUNDARY),
            )
            .body(build_multipart_body(&file_name, mime_type, &content))
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::api_bad_response(
                endpoint,
                status.as_u16(),
                google_error_message(&text),
            ));
        }

        let created: CreatedFile = response
            .json()
            .await
            .map_err(|e| AppError::api_json_failed(endpoint, e))?;

        created.id.ok_or_else(|| {
            ApiError::MissingField {
                endpoint: endpoint.to_string(),
                field: "id".to_string(),
            }
            .into()
        })
    }
}
