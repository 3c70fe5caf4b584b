//! 多用户批量处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责多用户的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：创建 HTTP 客户端、LLM 客户端，授权一次 Drive 会话
//! 2. **逐个处理**：按顺序为每个用户授权 Classroom 会话并运行 `UserFlow`
//! 3. **失败隔离**：单个用户的任何失败只记录日志，循环继续
//! 4. **全局统计**：汇总所有用户的处理结果
//!
//! ## 设计特点
//!
//! - **严格顺序**：同一时刻只处理一个用户，共享的 `response.txt` 不会被并发写入
//! - **资源所有者**：唯一持有 Drive 会话和 LLM 客户端的模块
//! - **向下委托**：委托 `UserFlow` 处理单个用户

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{error, info};

use crate::auth::{ClassroomConnector, CredentialStore, OAuthClassroomConnector};
use crate::clients::{CompletionApi, DriveClient, LlmClient, StorageApi};
use crate::config::Config;
use crate::utils::logging::{log_startup, log_user_start, print_final_stats};
use crate::workflow::{UserCtx, UserFlow, UserOutcome};

/// 应用主结构
pub struct App {
    users: Vec<String>,
    connector: Arc<dyn ClassroomConnector>,
    flow: UserFlow,
}

impl App {
    /// 初始化应用
    ///
    /// Drive 会话在这里授权一次，整个运行期间复用；授权失败视为启动失败
    pub async fn initialize(config: Config) -> Result<Self> {
        let completion = LlmClient::new(&config);
        log_startup(config.user_emails.len(), completion.model_name());

        let http = reqwest::Client::new();
        let store = CredentialStore::new(&config.client_secret_path, &config.token_dir);

        info!("🔑 正在授权 Drive 会话...");
        let storage_session = store
            .acquire_storage_session()
            .await
            .context("Drive 授权失败")?;

        let storage = DriveClient::new(
            http.clone(),
            &config.drive_upload_base_url,
            Arc::new(storage_session),
        );

        let connector =
            OAuthClassroomConnector::new(store, http, config.classroom_api_base_url.clone());

        Ok(Self::with_parts(
            &config,
            Arc::new(connector),
            Arc::new(completion),
            Arc::new(storage),
        ))
    }

    /// 使用已构建的组件创建应用
    pub fn with_parts(
        config: &Config,
        connector: Arc<dyn ClassroomConnector>,
        completion: Arc<dyn CompletionApi>,
        storage: Arc<dyn StorageApi>,
    ) -> Self {
        Self {
            users: config.user_emails.clone(),
            connector,
            flow: UserFlow::new(config, completion, storage),
        }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<ProcessingStats> {
        let stats = self.process_users(&self.users).await;

        print_final_stats(stats.turned_in, stats.skipped, stats.failed, stats.total);

        Ok(stats)
    }

    /// 按顺序处理所有用户
    pub async fn process_users(&self, emails: &[String]) -> ProcessingStats {
        let mut stats = ProcessingStats {
            total: emails.len(),
            ..Default::default()
        };

        for (idx, email) in emails.iter().enumerate() {
            let ctx = UserCtx::new(email.as_str(), idx + 1);
            log_user_start(ctx.user_index, emails.len(), email);

            match self.process_user(&ctx).await {
                Ok(outcome) => stats.record(&outcome),
                Err(e) => {
                    error!("{} ❌ 处理过程中发生错误: {:#}", ctx, e);
                    stats.failed += 1;
                }
            }
        }

        stats
    }

    /// 授权并处理单个用户
    async fn process_user(&self, ctx: &UserCtx) -> Result<UserOutcome> {
        let classroom = self
            .connector
            .connect(&ctx.email)
            .await
            .with_context(|| format!("{} 授权失败", ctx))?;

        info!("{} ✓ 已授权", ctx);

        self.flow.run(classroom.as_ref(), ctx).await
    }
}

/// 处理统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessingStats {
    pub turned_in: usize,
    /// 没有作业或没有提交记录
    pub skipped: usize,
    pub failed: usize,
    pub total: usize,
}

impl ProcessingStats {
    pub fn record(&mut self, outcome: &UserOutcome) {
        match outcome {
            UserOutcome::TurnedIn { .. } => self.turned_in += 1,
            UserOutcome::NoAssignment | UserOutcome::NoSubmission => self.skipped += 1,
            UserOutcome::UploadFailed | UserOutcome::TurnInFailed => self.failed += 1,
        }
    }
}
