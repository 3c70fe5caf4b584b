//! 作业查找服务 - 业务能力层
//!
//! 只负责"找到最近截止的作业"能力，不关心流程

use tracing::info;

use crate::clients::ClassroomApi;
use crate::error::AppResult;
use crate::models::CourseWork;

/// 作业查找服务
///
/// 按服务端返回的课程顺序逐个询问"截止日期最晚的一项作业"，
/// 第一个有结果的课程胜出并立即停止，不做跨课程的日期比较。
#[derive(Debug, Default)]
pub struct AssignmentService;

impl AssignmentService {
    /// 查找最新作业
    ///
    /// # 返回
    /// - `Ok(Some(_))`: 找到的作业
    /// - `Ok(None)`: 没有课程，或所有课程都没有作业
    pub async fn find_latest_assignment(
        &self,
        classroom: &dyn ClassroomApi,
    ) -> AppResult<Option<CourseWork>> {
        let courses = classroom.list_courses().await?;

        if courses.is_empty() {
            info!("📭 没有找到任何课程");
            return Ok(None);
        }

        for course in &courses {
            info!("📚 正在获取课程作业: {} (ID: {})", course.name, course.id);

            let mut items = classroom.list_course_work(&course.id, 1).await?;
            if items.is_empty() {
                continue;
            }

            let assignment = items.swap_remove(0);
            info!(
                "✓ {} 的最新作业: {} (截止: {})",
                course.name,
                assignment.title,
                assignment
                    .due_on()
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "无".to_string())
            );
            return Ok(Some(assignment));
        }

        info!("📭 所有课程中都没有作业");
        Ok(None)
    }
}
