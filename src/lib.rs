//! # Classroom Autosubmit
//!
//! 为多个学生账号自动完成 Google Classroom 最新作业并提交的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 接入层（Auth / Clients）
//! - `auth/` - OAuth 授权，按用户持久化令牌文件 `<email>_token.json`
//! - `clients/` - Classroom / Drive / LLM 三个 HTTP 适配器，均以 trait 暴露
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `AssignmentService` - 查找最新作业
//! - `ResponseWriter` - 写 response.txt
//! - `UploadService` - 上传到 Drive
//! - `SubmissionService` - 定位提交记录并交作业
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个用户"的完整处理流程
//! - `UserCtx` - 上下文封装（email + user_index）
//! - `UserFlow` - 流程编排（作业 → LLM → 写文件 → 上传 → 交作业）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 多用户处理器，管理会话和统计
//!
//! ## 模块结构

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use orchestrator::{App, ProcessingStats};
pub use workflow::{UserCtx, UserFlow, UserOutcome};
