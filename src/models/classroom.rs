use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 课程
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_state: Option<String>,
}

/// 截止日期（Classroom 以年月日三段返回）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DueDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// 截止时间
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DueTime {
    #[serde(default)]
    pub hours: u32,
    #[serde(default)]
    pub minutes: u32,
}

/// 作业（coursework）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CourseWork {
    pub id: String,
    pub course_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DueDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_time: Option<DueTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_type: Option<String>,
}

pub const NO_DESCRIPTION: &str = "No description available.";

impl CourseWork {
    /// 作业描述，没有描述时使用占位文本
    pub fn description_or_default(&self) -> &str {
        match self.description.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => NO_DESCRIPTION,
        }
    }

    pub fn due_on(&self) -> Option<NaiveDate> {
        self.due_date
            .and_then(|d| NaiveDate::from_ymd_opt(d.year, d.month, d.day))
    }
}

/// 提交状态
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionState {
    SubmissionStateUnspecified,
    New,
    Created,
    TurnedIn,
    Returned,
    ReclaimedByStudent,
    #[serde(other)]
    Unknown,
}

/// Drive 文件引用
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DriveFileRef {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// 附件
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drive_file: Option<DriveFileRef>,
}

impl Attachment {
    pub fn drive_file(file_id: impl Into<String>) -> Self {
        Self {
            drive_file: Some(DriveFileRef {
                id: file_id.into(),
                title: None,
            }),
        }
    }
}

/// 学生提交记录
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentSubmission {
    pub id: String,
    #[serde(default)]
    pub course_id: String,
    #[serde(default)]
    pub course_work_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<SubmissionState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft_grade: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_grade: Option<f64>,
    #[serde(default)]
    pub late: bool,
}

/// 提交记录的部分更新
///
/// 只序列化有值的字段，`update_mask()` 给出对应的字段掩码。
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft_grade: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<SubmissionState>,
}

impl SubmissionPatch {
    pub fn draft_grade(grade: f64) -> Self {
        Self {
            draft_grade: Some(grade),
            ..Default::default()
        }
    }

    pub fn state(state: SubmissionState) -> Self {
        Self {
            state: Some(state),
            ..Default::default()
        }
    }

    pub fn update_mask(&self) -> String {
        let mut fields = Vec::new();
        if self.draft_grade.is_some() {
            fields.push("draftGrade");
        }
        if self.state.is_some() {
            fields.push("state");
        }
        fields.join(",")
    }

    pub fn is_empty(&self) -> bool {
        self.draft_grade.is_none() && self.state.is_none()
    }
}

// ========== 列表响应 ==========

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCoursesResponse {
    #[serde(default)]
    pub courses: Vec<Course>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCourseWorkResponse {
    #[serde(default)]
    pub course_work: Vec<CourseWork>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStudentSubmissionsResponse {
    #[serde(default)]
    pub student_submissions: Vec<StudentSubmission>,
    pub next_page_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_response_has_no_field() {
        // Classroom 在结果为空时直接省略数组字段
        let resp: ListCoursesResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.courses.is_empty());
    }

    #[test]
    fn test_course_work_parses_due_date() {
        let json = r#"{
            "id": "cw1",
            "courseId": "c1",
            "title": "Essay",
            "dueDate": {"year": 2026, "month": 10, "day": 19},
            "dueTime": {"hours": 23, "minutes": 59}
        }"#;
        let cw: CourseWork = serde_json::from_str(json).unwrap();
        assert_eq!(cw.due_on(), NaiveDate::from_ymd_opt(2026, 10, 19));
        assert_eq!(cw.description_or_default(), NO_DESCRIPTION);
    }

    #[test]
    fn test_unknown_submission_state() {
        let sub: StudentSubmission =
            serde_json::from_str(r#"{"id": "s1", "state": "SOMETHING_NEW"}"#).unwrap();
        assert_eq!(sub.state, Some(SubmissionState::Unknown));
    }

    #[test]
    fn test_patch_update_mask() {
        assert_eq!(SubmissionPatch::draft_grade(90.0).update_mask(), "draftGrade");
        assert_eq!(
            SubmissionPatch::state(SubmissionState::Returned).update_mask(),
            "state"
        );
        let both = SubmissionPatch {
            draft_grade: Some(1.0),
            state: Some(SubmissionState::Returned),
        };
        assert_eq!(both.update_mask(), "draftGrade,state");
        assert!(SubmissionPatch::default().is_empty());
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let body = serde_json::to_value(SubmissionPatch::state(SubmissionState::Returned)).unwrap();
        assert_eq!(body, serde_json::json!({"state": "RETURNED"}));
    }
}
