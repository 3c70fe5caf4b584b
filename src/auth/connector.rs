use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::auth::credential_store::{CredentialStore, TokenSource};
use crate::clients::{ClassroomApi, ClassroomClient};
use crate::error::AppResult;

/// 为指定用户建立已授权的 Classroom 客户端
#[async_trait]
pub trait ClassroomConnector: Send + Sync {
    async fn connect(&self, identity: &str) -> AppResult<Arc<dyn ClassroomApi>>;
}

/// 通过凭据存储授权的连接器
pub struct OAuthClassroomConnector {
    store: CredentialStore,
    http: reqwest::Client,
    base_url: String,
}

impl OAuthClassroomConnector {
    pub fn new(store: CredentialStore, http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            store,
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ClassroomConnector for OAuthClassroomConnector {
    async fn connect(&self, identity: &str) -> AppResult<Arc<dyn ClassroomApi>> {
        let session = self.store.acquire_session(identity).await?;
        debug!("已建立 Classroom 会话: {}", session.identity());
        let tokens: Arc<dyn TokenSource> = Arc::new(session);

        Ok(Arc::new(ClassroomClient::new(
            self.http.clone(),
            &self.base_url,
            tokens,
        )))
    }
}
