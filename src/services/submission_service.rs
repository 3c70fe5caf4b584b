//! 提交服务 - 业务能力层
//!
//! 负责定位提交记录、更新提交记录、附加文件并交作业

use tracing::{error, info, warn};

use crate::clients::ClassroomApi;
use crate::error::AppResult;
use crate::models::{Attachment, CourseWork, StudentSubmission, SubmissionPatch, SubmissionState};

/// 只查询当前授权学生自己的提交记录
const CURRENT_STUDENT: &str = "me";

/// 提交服务
///
/// 职责：
/// - 取作业的第一条提交记录
/// - 附加 Drive 文件并交作业
/// - 更新草稿分数 / 状态
pub struct SubmissionService {
    match_any_submission: bool,
}

impl SubmissionService {
    /// # 参数
    /// - `match_any_submission`: 兼容模式。为 `true` 时不按学生过滤，直接取列表第一条
    pub fn new(match_any_submission: bool) -> Self {
        if match_any_submission {
            warn!("⚠️ 已开启兼容模式：提交记录不按当前学生过滤");
        }
        Self {
            match_any_submission,
        }
    }

    /// 定位作业的提交记录
    ///
    /// # 返回
    /// 返回列表中的第一条；列表为空时返回 `None`
    pub async fn locate_submission(
        &self,
        classroom: &dyn ClassroomApi,
        assignment: &CourseWork,
    ) -> AppResult<Option<StudentSubmission>> {
        let user_filter = if self.match_any_submission {
            None
        } else {
            Some(CURRENT_STUDENT)
        };

        let submissions = classroom
            .list_submissions(&assignment.course_id, &assignment.id, user_filter)
            .await?;

        info!(
            "🔎 作业 {} 共有 {} 条提交记录",
            assignment.title,
            submissions.len()
        );

        Ok(submissions.into_iter().next())
    }

    /// 以学生身份提交文件：先附加 Drive 文件，再交作业
    ///
    /// # 返回
    /// 返回是否成功交作业，错误只记录日志
    pub async fn submit_file_as_student(
        &self,
        classroom: &dyn ClassroomApi,
        assignment: &CourseWork,
        submission: &StudentSubmission,
        file_id: &str,
    ) -> bool {
        let course_id = &assignment.course_id;
        let course_work_id = &assignment.id;

        if let Err(e) = classroom
            .modify_attachments(
                course_id,
                course_work_id,
                &submission.id,
                &[Attachment::drive_file(file_id)],
            )
            .await
        {
            error!("❌ 添加附件失败: {}", e);
            return false;
        }

        match classroom
            .turn_in(course_id, course_work_id, &submission.id)
            .await
        {
            Ok(()) => {
                info!("✅ 作业已提交 (submission: {})", submission.id);
                true
            }
            Err(e) => {
                error!("❌ 交作业失败: {}", e);
                false
            }
        }
    }

    /// 更新草稿分数
    pub async fn update_draft_grade(
        &self,
        classroom: &dyn ClassroomApi,
        assignment: &CourseWork,
        submission: &StudentSubmission,
        draft_grade: f64,
    ) -> bool {
        self.apply_patch(
            classroom,
            assignment,
            submission,
            SubmissionPatch::draft_grade(draft_grade),
        )
        .await
    }

    /// 将提交记录状态改为 RETURNED
    pub async fn mark_returned(
        &self,
        classroom: &dyn ClassroomApi,
        assignment: &CourseWork,
        submission: &StudentSubmission,
    ) -> bool {
        self.apply_patch(
            classroom,
            assignment,
            submission,
            SubmissionPatch::state(SubmissionState::Returned),
        )
        .await
    }

    async fn apply_patch(
        &self,
        classroom: &dyn ClassroomApi,
        assignment: &CourseWork,
        submission: &StudentSubmission,
        patch: SubmissionPatch,
    ) -> bool {
        if patch.is_empty() {
            return false;
        }

        match classroom
            .patch_submission(
                &assignment.course_id,
                &assignment.id,
                &submission.id,
                &patch,
            )
            .await
        {
            Ok(_) => {
                info!("✓ 已更新提交记录 ({})", patch.update_mask());
                true
            }
            Err(e) => {
                error!("❌ 更新提交记录失败: {}", e);
                false
            }
        }
    }
}
