use crate::error::{AppResult, ConfigError};
use crate::models::users;

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 待处理的用户（邮箱）列表
    pub user_emails: Vec<String>,
    /// OAuth 客户端密钥文件
    pub client_secret_path: String,
    /// 每个用户的令牌文件所在目录
    pub token_dir: String,
    /// 生成的回答文件
    pub response_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 兼容模式：不按当前学生过滤提交记录，直接取第一条
    pub match_any_submission: bool,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    // --- Google API 配置 ---
    pub classroom_api_base_url: String,
    pub drive_upload_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_emails: vec!["student@example.com".to_string()],
            client_secret_path: "credentials.json".to_string(),
            token_dir: "./".to_string(),
            response_file: "response.txt".to_string(),
            verbose_logging: false,
            match_any_submission: false,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o-mini".to_string(),
            classroom_api_base_url: "https://classroom.googleapis.com".to_string(),
            drive_upload_base_url: "https://www.googleapis.com".to_string(),
        }
    }
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// `OPENAI_API_KEY` 必须设置，其余均有默认值。
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 从任意键值来源加载配置
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();

        let llm_api_key = lookup("OPENAI_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::EnvVarNotFound {
                var_name: "OPENAI_API_KEY".to_string(),
            })?;

        let user_emails = if let Some(path) = lookup("USERS_FILE") {
            users::load_user_list(&path)?
        } else if let Some(raw) = lookup("USER_EMAILS") {
            users::parse_user_list(&raw)
        } else {
            default.user_emails
        };
        let user_emails = users::retain_valid_emails(user_emails);
        if user_emails.is_empty() {
            return Err(ConfigError::NoUsers.into());
        }

        Ok(Self {
            user_emails,
            client_secret_path: lookup("CLIENT_SECRET_PATH").unwrap_or(default.client_secret_path),
            token_dir: lookup("TOKEN_DIR").unwrap_or(default.token_dir),
            response_file: lookup("RESPONSE_FILE").unwrap_or(default.response_file),
            verbose_logging: parse_bool(&lookup, "VERBOSE_LOGGING", default.verbose_logging)?,
            match_any_submission: parse_bool(
                &lookup,
                "MATCH_ANY_SUBMISSION",
                default.match_any_submission,
            )?,
            llm_api_key,
            llm_api_base_url: lookup("OPENAI_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: lookup("OPENAI_MODEL_NAME").unwrap_or(default.llm_model_name),
            classroom_api_base_url: lookup("CLASSROOM_API_BASE_URL")
                .unwrap_or(default.classroom_api_base_url),
            drive_upload_base_url: lookup("DRIVE_UPLOAD_BASE_URL")
                .unwrap_or(default.drive_upload_base_url),
        })
    }
}

fn parse_bool<F>(lookup: &F, var_name: &str, default: bool) -> AppResult<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var_name) {
        None => Ok(default),
        Some(value) => value.trim().parse::<bool>().map_err(|_| {
            ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: "bool".to_string(),
            }
            .into()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_missing_api_key_fails_fast() {
        let result = Config::from_lookup(lookup_from(&[]));
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::EnvVarNotFound { .. }))
        ));
    }

    #[test]
    fn test_blank_api_key_is_rejected() {
        let result = Config::from_lookup(lookup_from(&[("OPENAI_API_KEY", "  ")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults_with_api_key() {
        let config = Config::from_lookup(lookup_from(&[("OPENAI_API_KEY", "sk-test")])).unwrap();
        assert_eq!(config.llm_api_key, "sk-test");
        assert_eq!(config.response_file, "response.txt");
        assert_eq!(config.client_secret_path, "credentials.json");
        assert!(!config.match_any_submission);
        assert_eq!(config.user_emails, Config::default().user_emails);
    }

    #[test]
    fn test_user_emails_override() {
        let config = Config::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("USER_EMAILS", "a@school.edu, not-an-email ,b@school.edu"),
        ]))
        .unwrap();
        assert_eq!(config.user_emails, vec!["a@school.edu", "b@school.edu"]);
    }

    #[test]
    fn test_no_valid_users_is_an_error() {
        let result = Config::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("USER_EMAILS", "nobody"),
        ]));
        assert!(matches!(result, Err(AppError::Config(ConfigError::NoUsers))));
    }

    #[test]
    fn test_bad_bool_is_reported() {
        let result = Config::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("MATCH_ANY_SUBMISSION", "yes please"),
        ]));
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::EnvVarParseFailed { .. }))
        ));
    }

    #[test]
    fn test_compat_flag_enabled() {
        let config = Config::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("MATCH_ANY_SUBMISSION", "true"),
        ]))
        .unwrap();
        assert!(config.match_any_submission);
    }
}
