use crate::error::{AppError, AppResult, FileError};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;

/// 用户列表文件格式
///
/// ```toml
/// emails = ["a@school.edu", "b@school.edu"]
/// ```
#[derive(Debug, Deserialize)]
struct UserListFile {
    #[serde(default)]
    emails: Vec<String>,
}

/// 从 TOML 文件加载用户列表
pub fn load_user_list(path: impl AsRef<Path>) -> AppResult<Vec<String>> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    let content =
        std::fs::read_to_string(path).map_err(|e| AppError::file_read_failed(&path_str, e))?;

    let parsed: UserListFile = toml::from_str(&content).map_err(|e| FileError::TomlParseFailed {
        path: path_str.clone(),
        source: e,
    })?;

    tracing::info!("从 {} 加载 {} 个用户", path_str, parsed.emails.len());
    Ok(parsed.emails)
}

/// 解析逗号分隔的用户列表
pub fn parse_user_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").expect("valid email regex")
    })
}

/// 邮箱同时用作令牌文件名的一部分，不合法的条目直接丢弃
pub fn retain_valid_emails(emails: Vec<String>) -> Vec<String> {
    emails
        .into_iter()
        .filter(|email| {
            let ok = email_pattern().is_match(email);
            if !ok {
                tracing::warn!("⚠️ 跳过无效的用户标识: {}", email);
            }
            ok
        })
        .collect()
}
