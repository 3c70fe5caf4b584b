//! 凭据存储
//!
//! 每个用户一个令牌文件 `<email>_token.json`。文件存在时直接复用（过期由 OAuth 库自动刷新），
//! 不存在时走一次浏览器授权流程并写入该文件。

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use yup_oauth2::authenticator::DefaultAuthenticator;
use yup_oauth2::{InstalledFlowAuthenticator, InstalledFlowReturnMethod};

use crate::error::{AppError, AppResult, AuthError};

/// 申请的全部授权范围
pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/classroom.courses",
    "https://www.googleapis.com/auth/classroom.coursework.me",
    "https://www.googleapis.com/auth/classroom.coursework.students",
    "https://www.googleapis.com/auth/classroom.courseworkmaterials",
    "https://www.googleapis.com/auth/classroom.student-submissions.students.readonly",
    "https://www.googleapis.com/auth/drive.file",
];

/// 能提供 access token 的会话
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// 返回当前可用的 access token，必要时刷新
    async fn access_token(&self) -> AppResult<String>;
}

/// 基于 OAuth 已安装应用流程的会话
pub struct OAuthSession {
    identity: String,
    auth: DefaultAuthenticator,
}

impl OAuthSession {
    pub fn identity(&self) -> &str {
        &self.identity
    }
}

#[async_trait]
impl TokenSource for OAuthSession {
    async fn access_token(&self) -> AppResult<String> {
        let token = self
            .auth
            .token(SCOPES)
            .await
            .map_err(|e| AppError::auth_flow_failed(&self.identity, e))?;

        token
            .token()
            .map(str::to_string)
            .ok_or_else(|| {
                AuthError::EmptyToken {
                    identity: self.identity.clone(),
                }
                .into()
            })
    }
}

/// 凭据存储
#[derive(Debug, Clone)]
pub struct CredentialStore {
    client_secret_path: PathBuf,
    token_dir: PathBuf,
}

impl CredentialStore {
    pub fn new(client_secret_path: impl Into<PathBuf>, token_dir: impl Into<PathBuf>) -> Self {
        Self {
            client_secret_path: client_secret_path.into(),
            token_dir: token_dir.into(),
        }
    }

    /// 用户令牌文件路径
    pub fn token_file_path(&self, identity: &str) -> PathBuf {
        self.token_dir.join(format!("{}_token.json", identity))
    }

    /// 是否已有该用户的令牌文件
    pub fn has_cached_token(&self, identity: &str) -> bool {
        self.token_file_path(identity).exists()
    }

    /// 获取用户的 Classroom 会话
    ///
    /// 返回前会先取一次 token，保证首次授权后令牌文件已经落盘。
    pub async fn acquire_session(&self, identity: &str) -> AppResult<OAuthSession> {
        let token_path = self.token_file_path(identity);

        if self.has_cached_token(identity) {
            info!("🔑 复用已保存的令牌: {}", token_path.display());
        } else {
            info!("🌐 未找到令牌文件，开始浏览器授权: {}", identity);
        }

        let auth = self.build_authenticator(identity, Some(&token_path)).await?;
        let session = OAuthSession {
            identity: identity.to_string(),
            auth,
        };
        session.access_token().await?;

        debug!("会话就绪: {}", identity);
        Ok(session)
    }

    /// 获取存储服务会话
    ///
    /// 每次运行只授权一次，令牌只保存在内存中。
    pub async fn acquire_storage_session(&self) -> AppResult<OAuthSession> {
        info!("🌐 为存储服务进行浏览器授权");

        let identity = "drive";
        let auth = self.build_authenticator(identity, None).await?;
        let session = OAuthSession {
            identity: identity.to_string(),
            auth,
        };
        session.access_token().await?;

        Ok(session)
    }

    async fn build_authenticator(
        &self,
        identity: &str,
        token_path: Option<&Path>,
    ) -> AppResult<DefaultAuthenticator> {
        let secret = yup_oauth2::read_application_secret(&self.client_secret_path)
            .await
            .map_err(|e| AuthError::ClientSecretInvalid {
                path: self.client_secret_path.display().to_string(),
                source: Box::new(e),
            })?;

        let mut builder =
            InstalledFlowAuthenticator::builder(secret, InstalledFlowReturnMethod::HTTPRedirect);
        if let Some(path) = token_path {
            builder = builder.persist_tokens_to_disk(path);
        }

        builder
            .build()
            .await
            .map_err(|e| AppError::auth_flow_failed(identity, e))
    }
}
