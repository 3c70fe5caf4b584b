/// Classroom API 客户端
///
/// 封装所有与 Google Classroom REST API 相关的调用逻辑
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

use crate::auth::TokenSource;
use crate::error::{AppError, AppResult};
use crate::models::classroom::{
    Attachment, Course, CourseWork, ListCourseWorkResponse, ListCoursesResponse,
    ListStudentSubmissionsResponse, StudentSubmission, SubmissionPatch,
};
use crate::utils::logging::truncate_text;

/// Classroom 能力
#[async_trait]
pub trait ClassroomApi: Send + Sync {
    /// 列出当前账号的课程（顺序由服务端决定）
    async fn list_courses(&self) -> AppResult<Vec<Course>>;

    /// 列出课程作业，按截止日期倒序，最多 `page_size` 条
    async fn list_course_work(&self, course_id: &str, page_size: u32) -> AppResult<Vec<CourseWork>>;

    /// 列出作业的提交记录，`user_id` 为 `Some("me")` 时只返回当前学生的
    async fn list_submissions(
        &self,
        course_id: &str,
        course_work_id: &str,
        user_id: Option<&str>,
    ) -> AppResult<Vec<StudentSubmission>>;

    /// 部分更新提交记录
    async fn patch_submission(
        &self,
        course_id: &str,
        course_work_id: &str,
        submission_id: &str,
        patch: &SubmissionPatch,
    ) -> AppResult<StudentSubmission>;

    /// 为提交记录添加附件
    async fn modify_attachments(
        &self,
        course_id: &str,
        course_work_id: &str,
        submission_id: &str,
        attachments: &[Attachment],
    ) -> AppResult<StudentSubmission>;

    /// 交作业
    async fn turn_in(
        &self,
        course_id: &str,
        course_work_id: &str,
        submission_id: &str,
    ) -> AppResult<()>;
}

/// Classroom REST 客户端
pub struct ClassroomClient {
    http: Client,
    base_url: String,
    tokens: Arc<dyn TokenSource>,
}

impl ClassroomClient {
    /// 创建新的 Classroom 客户端
    ///
    /// # 参数
    /// - `http`: 共享的 HTTP 客户端
    /// - `base_url`: API 根地址，例如 `https://classroom.googleapis.com`
    /// - `tokens`: 当前用户的令牌来源
    pub fn new(http: Client, base_url: &str, tokens: Arc<dyn TokenSource>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    fn submission_url(&self, course_id: &str, course_work_id: &str, submission_id: &str) -> String {
        format!(
            "{}/v1/courses/{}/courseWork/{}/studentSubmissions/{}",
            self.base_url, course_id, course_work_id, submission_id
        )
    }

    /// 带上 Bearer 令牌发送请求并解析 JSON
    async fn send_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> AppResult<T> {
        let token = self.tokens.access_token().await?;

        debug!("调用 Classroom API: {}", endpoint);

        let response = request
            .bearer_auth(token)
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

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::api_json_failed(endpoint, e))
    }
}

#[async_trait]
impl ClassroomApi for ClassroomClient {
    async fn list_courses(&self) -> AppResult<Vec<Course>> {
        let url = format!("{}/v1/courses", self.base_url);
        let resp: ListCoursesResponse = self.send_json("courses.list", self.http.get(url)).await?;
        Ok(resp.courses)
    }

    async fn list_course_work(&self, course_id: &str, page_size: u32) -> AppResult<Vec<CourseWork>> {
        let url = format!("{}/v1/courses/{}/courseWork", self.base_url, course_id);
        let request = self.http.get(url).query(&[
            ("orderBy", "dueDate desc".to_string()),
            ("pageSize", page_size.to_string()),
        ]);

        let resp: ListCourseWorkResponse = self.send_json("courseWork.list", request).await?;
        Ok(resp.course_work)
    }

    async fn list_submissions(
        &self,
        course_id: &str,
        course_work_id: &str,
        user_id: Option<&str>,
    ) -> AppResult<Vec<StudentSubmission>> {
        let url = format!(
            "{}/v1/courses/{}/courseWork/{}/studentSubmissions",
            self.base_url, course_id, course_work_id
        );
        let mut request = self.http.get(url);
        if let Some(user_id) = user_id {
            request = request.query(&[("userId", user_id)]);
        }

        let resp: ListStudentSubmissionsResponse =
            self.send_json("studentSubmissions.list", request).await?;
        Ok(resp.student_submissions)
    }

    async fn patch_submission(
        &self,
        course_id: &str,
        course_work_id: &str,
        submission_id: &str,
        patch: &SubmissionPatch,
    ) -> AppResult<StudentSubmission> {
        let url = self.submission_url(course_id, course_work_id, submission_id);
        let request = self
            .http
            .patch(url)
            .query(&[("updateMask", patch.update_mask())])
            .json(patch);

        self.send_json("studentSubmissions.patch", request).await
    }

    async fn modify_attachments(
        &self,
        course_id: &str,
        course_work_id: &str,
        submission_id: &str,
        attachments: &[Attachment],
    ) -> AppResult<StudentSubmission> {
        let url = format!(
            "{}:modifyAttachments",
            self.submission_url(course_id, course_work_id, submission_id)
        );
        let request = self
            .http
            .post(url)
            .json(&json!({ "addAttachments": attachments }));

        self.send_json("studentSubmissions.modifyAttachments", request)
            .await
    }

    async fn turn_in(
        &self,
        course_id: &str,
        course_work_id: &str,
        submission_id: &str,
    ) -> AppResult<()> {
        let url = format!(
            "{}:turnIn",
            self.submission_url(course_id, course_work_id, submission_id)
        );
        let request = self.http.post(url).json(&json!({}));

        let _: serde_json::Value = self.send_json("studentSubmissions.turnIn", request).await?;
        Ok(())
    }
}

/// 提取 Google API 错误体中的 message 字段，取不到时退回截断后的原始响应体
pub(crate) fn google_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .or_else(|| {
            let raw = body.trim();
            (!raw.is_empty()).then(|| truncate_text(raw, 200))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_error_message_extracts_message() {
        let body = r#"{"error": {"code": 403, "message": "The caller does not have permission"}}"#;
        assert_eq!(
            google_error_message(body).as_deref(),
            Some("The caller does not have permission")
        );
    }

    #[test]
    fn test_google_error_message_non_json_falls_back_to_body() {
        let html = "<html><body>502 Bad Gateway</body></html>";
        assert_eq!(google_error_message(html).as_deref(), Some(html));
        assert_eq!(google_error_message("  "), None);
        assert_eq!(google_error_message(""), None);
    }

    #[test]
    fn test_google_error_message_truncates_long_body() {
        let body = "x".repeat(500);
        let message = google_error_message(&body).unwrap();
        assert_eq!(message.chars().count(), 203);
        assert!(message.ends_with("..."));
    }
}
