//! 用户处理流程 - 流程层
//!
//! 核心职责：定义"一个用户"的完整处理流程
//!
//! 流程顺序（只进不退，任何一步结束都只影响当前用户）：
//! 1. 查找最新作业（没有 → 结束）
//! 2. LLM 生成回答
//! 3. 写入本地文件（失败 → 结束）
//! 4. 上传到 Drive（失败 → 结束）
//! 5. 定位提交记录（没有 → 结束）
//! 6. 附加文件并交作业

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use crate::clients::{ClassroomApi, CompletionApi, StorageApi};
use crate::config::Config;
use crate::services::{
    AssignmentService, ResponseWriter, SubmissionService, UploadService, TEXT_PLAIN,
};
use crate::utils::logging::truncate_text;
use crate::workflow::user_ctx::UserCtx;

/// 用户处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserOutcome {
    /// 所有课程都没有作业
    NoAssignment,
    /// 上传失败，没有拿到文件 ID
    UploadFailed,
    /// 作业没有提交记录
    NoSubmission,
    /// 附件或交作业请求失败
    TurnInFailed,
    /// 已交作业
    TurnedIn {
        submission_id: String,
        file_id: String,
    },
}

/// 用户处理流程
///
/// - 编排单个用户的完整处理流程
/// - 不负责授权，Classroom 会话由编排层传入
/// - 只依赖业务能力（services）
pub struct UserFlow {
    assignment_service: AssignmentService,
    completion: Arc<dyn CompletionApi>,
    writer: ResponseWriter,
    upload_service: UploadService,
    submission_service: SubmissionService,
    verbose_logging: bool,
}

impl UserFlow {
    /// 创建新的用户处理流程
    pub fn new(
        config: &Config,
        completion: Arc<dyn CompletionApi>,
        storage: Arc<dyn StorageApi>,
    ) -> Self {
        Self {
            assignment_service: AssignmentService::default(),
            completion,
            writer: ResponseWriter::with_path(&config.response_file),
            upload_service: UploadService::new(storage),
            submission_service: SubmissionService::new(config.match_any_submission),
            verbose_logging: config.verbose_logging,
        }
    }

    pub async fn run(&self, classroom: &dyn ClassroomApi, ctx: &UserCtx) -> Result<UserOutcome> {
        // ========== 1. 查找最新作业 ==========
        let assignment = self
            .assignment_service
            .find_latest_assignment(classroom)
            .await
            .with_context(|| format!("{} 获取作业失败", ctx))?;

        let Some(assignment) = assignment else {
            info!("{} 📭 没有找到作业", ctx);
            return Ok(UserOutcome::NoAssignment);
        };

        let prompt = assignment.description_or_default();
        info!(
            "{} 📋 最新作业: {} - {}",
            ctx,
            assignment.title,
            self.preview(prompt)
        );

        // ========== 2. 生成回答 ==========
        let answer = self
            .completion
            .complete(prompt)
            .await
            .with_context(|| format!("{} 生成回答失败", ctx))?;

        info!("{} 🤖 AI 回答: {}", ctx, self.preview(&answer));

        // ========== 3. 写入本地文件 ==========
        // 写入失败时文件里可能还是上一个用户的回答，不能上传
        if !self.writer.write_text(&answer) {
            warn!("{} ⚠️ 写入回答失败，跳过上传", ctx);
            return Ok(UserOutcome::UploadFailed);
        }

        // ========== 4. 上传 ==========
        let Some(file_id) = self
            .upload_service
            .upload(self.writer.path(), TEXT_PLAIN)
            .await
        else {
            warn!("{} ⚠️ 上传失败，跳过后续步骤", ctx);
            return Ok(UserOutcome::UploadFailed);
        };

        // ========== 5. 定位提交记录 ==========
        let submission = self
            .submission_service
            .locate_submission(classroom, &assignment)
            .await
            .with_context(|| format!("{} 获取提交记录失败", ctx))?;

        let Some(submission) = submission else {
            warn!("{} ⚠️ 作业 {} 没有提交记录", ctx, assignment.title);
            return Ok(UserOutcome::NoSubmission);
        };

        // ========== 6. 交作业 ==========
        if self
            .submission_service
            .submit_file_as_student(classroom, &assignment, &submission, &file_id)
            .await
        {
            Ok(UserOutcome::TurnedIn {
                submission_id: submission.id,
                file_id,
            })
        } else {
            Ok(UserOutcome::TurnInFailed)
        }
    }

    fn preview(&self, text: &str) -> String {
        if self.verbose_logging {
            text.to_string()
        } else {
            truncate_text(text, 80)
        }
    }
}
