//! 测试用的内存实现
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use classroom_autosubmit::auth::ClassroomConnector;
use classroom_autosubmit::clients::{ClassroomApi, CompletionApi, StorageApi};
use classroom_autosubmit::error::{ApiError, AppResult, AuthError, LlmError};
use classroom_autosubmit::models::{
    Attachment, Course, CourseWork, DueDate, StudentSubmission, SubmissionPatch,
};
use classroom_autosubmit::Config;

/// 记录到的 Classroom 调用
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListCourses,
    ListCourseWork {
        course_id: String,
        page_size: u32,
    },
    ListSubmissions {
        course_id: String,
        course_work_id: String,
        user_id: Option<String>,
    },
    Patch {
        submission_id: String,
        update_mask: String,
    },
    ModifyAttachments {
        submission_id: String,
        file_ids: Vec<String>,
    },
    TurnIn {
        submission_id: String,
    },
}

#[derive(Default)]
pub struct FakeClassroom {
    pub courses: Vec<Course>,
    pub course_work: HashMap<String, Vec<CourseWork>>,
    pub submissions: Vec<StudentSubmission>,
    pub fail_turn_in: bool,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeClassroom {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ClassroomApi for FakeClassroom {
    async fn list_courses(&self) -> AppResult<Vec<Course>> {
        self.record(Call::ListCourses);
        Ok(self.courses.clone())
    }

    async fn list_course_work(&self, course_id: &str, page_size: u32) -> AppResult<Vec<CourseWork>> {
        self.record(Call::ListCourseWork {
            course_id: course_id.to_string(),
            page_size,
        });
        let items = self.course_work.get(course_id).cloned().unwrap_or_default();
        Ok(items.into_iter().take(page_size as usize).collect())
    }

    async fn list_submissions(
        &self,
        course_id: &str,
        course_work_id: &str,
        user_id: Option<&str>,
    ) -> AppResult<Vec<StudentSubmission>> {
        self.record(Call::ListSubmissions {
            course_id: course_id.to_string(),
            course_work_id: course_work_id.to_string(),
            user_id: user_id.map(str::to_string),
        });
        Ok(self.submissions.clone())
    }

    async fn patch_submission(
        &self,
        _course_id: &str,
        _course_work_id: &str,
        submission_id: &str,
        patch: &SubmissionPatch,
    ) -> AppResult<StudentSubmission> {
        self.record(Call::Patch {
            submission_id: submission_id.to_string(),
            update_mask: patch.update_mask(),
        });
        Ok(submission(submission_id))
    }

    async fn modify_attachments(
        &self,
        _course_id: &str,
        _course_work_id: &str,
        submission_id: &str,
        attachments: &[Attachment],
    ) -> AppResult<StudentSubmission> {
        self.record(Call::ModifyAttachments {
            submission_id: submission_id.to_string(),
            file_ids: attachments
                .iter()
                .filter_map(|a| a.drive_file.as_ref().map(|f| f.id.clone()))
                .collect(),
        });
        Ok(submission(submission_id))
    }

    async fn turn_in(
        &self,
        _course_id: &str,
        _course_work_id: &str,
        submission_id: &str,
    ) -> AppResult<()> {
        self.record(Call::TurnIn {
            submission_id: submission_id.to_string(),
        });
        if self.fail_turn_in {
            return Err(ApiError::BadResponse {
                endpoint: "studentSubmissions.turnIn".to_string(),
                status: 400,
                message: Some("Precondition check failed.".to_string()),
            }
            .into());
        }
        Ok(())
    }
}

/// 一次上传的记录
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub path: PathBuf,
    pub mime_type: String,
    pub content: String,
}

/// `file_id` 为 `None` 时上传失败
pub struct FakeStorage {
    pub file_id: Option<String>,
    pub uploads: Mutex<Vec<Upload>>,
}

impl FakeStorage {
    pub fn returning(file_id: &str) -> Self {
        Self {
            file_id: Some(file_id.to_string()),
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            file_id: None,
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn uploads(&self) -> Vec<Upload> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl StorageApi for FakeStorage {
    async fn create_file(&self, local_path: &Path, mime_type: &str) -> AppResult<String> {
        let content = std::fs::read_to_string(local_path).unwrap_or_default();
        self.uploads.lock().unwrap().push(Upload {
            path: local_path.to_path_buf(),
            mime_type: mime_type.to_string(),
            content,
        });

        self.file_id.clone().ok_or_else(|| {
            ApiError::BadResponse {
                endpoint: "files.create".to_string(),
                status: 500,
                message: None,
            }
            .into()
        })
    }
}

/// `answer` 为 `None` 时补全失败
pub struct FakeCompletion {
    pub answer: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeCompletion {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionApi for FakeCompletion {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer.clone().ok_or_else(|| {
            LlmError::EmptyContent {
                model: "fake".to_string(),
            }
            .into()
        })
    }
}

/// 所有用户共享同一个 Classroom；`rejected` 中的用户授权失败
pub struct FakeConnector {
    pub classroom: Arc<FakeClassroom>,
    pub rejected: Vec<String>,
    pub attempts: Mutex<Vec<String>>,
}

impl FakeConnector {
    pub fn new(classroom: Arc<FakeClassroom>) -> Self {
        Self {
            classroom,
            rejected: Vec::new(),
            attempts: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting(mut self, identity: &str) -> Self {
        self.rejected.push(identity.to_string());
        self
    }

    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClassroomConnector for FakeConnector {
    async fn connect(&self, identity: &str) -> AppResult<Arc<dyn ClassroomApi>> {
        self.attempts.lock().unwrap().push(identity.to_string());
        if self.rejected.iter().any(|r| r == identity) {
            return Err(AuthError::EmptyToken {
                identity: identity.to_string(),
            }
            .into());
        }
        let classroom: Arc<dyn ClassroomApi> = self.classroom.clone();
        Ok(classroom)
    }
}

// ========== 构造辅助 ==========

pub fn course(id: &str) -> Course {
    Course {
        id: id.to_string(),
        name: format!("Course {}", id),
        section: None,
        course_state: Some("ACTIVE".to_string()),
    }
}

pub fn course_work(course_id: &str, id: &str, description: Option<&str>) -> CourseWork {
    let tomorrow = chrono::Local::now().date_naive() + chrono::Duration::days(1);
    CourseWork {
        id: id.to_string(),
        course_id: course_id.to_string(),
        title: format!("Assignment {}", id),
        description: description.map(str::to_string),
        due_date: Some(DueDate {
            year: chrono::Datelike::year(&tomorrow),
            month: chrono::Datelike::month(&tomorrow),
            day: chrono::Datelike::day(&tomorrow),
        }),
        due_time: None,
        state: Some("PUBLISHED".to_string()),
        work_type: Some("ASSIGNMENT".to_string()),
    }
}

pub fn submission(id: &str) -> StudentSubmission {
    StudentSubmission {
        id: id.to_string(),
        course_id: String::new(),
        course_work_id: String::new(),
        user_id: None,
        state: None,
        draft_grade: None,
        assigned_grade: None,
        late: false,
    }
}

/// 单课程、单作业、给定提交记录的 Classroom
pub fn single_assignment_classroom(submission_ids: &[&str]) -> FakeClassroom {
    let mut work = HashMap::new();
    work.insert(
        "c1".to_string(),
        vec![course_work("c1", "cw1", Some("What is six times seven?"))],
    );

    FakeClassroom {
        courses: vec![course("c1")],
        course_work: work,
        submissions: submission_ids.iter().map(|id| submission(id)).collect(),
        ..Default::default()
    }
}

/// 回答文件写在临时目录里的配置
pub fn test_config(dir: &Path, users: &[&str]) -> Config {
    Config {
        user_emails: users.iter().map(|u| u.to_string()).collect(),
        response_file: dir.join("response.txt").display().to_string(),
        token_dir: dir.display().to_string(),
        llm_api_key: "test-key".to_string(),
        ..Default::default()
    }
}
