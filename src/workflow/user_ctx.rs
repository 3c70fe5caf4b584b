//! 用户处理上下文
//!
//! 封装"我正在处理第几个用户、是谁"这一信息

use std::fmt::Display;

/// 用户处理上下文
#[derive(Debug, Clone)]
pub struct UserCtx {
    /// 用户标识（邮箱）
    pub email: String,

    /// 用户序号（从1开始，仅用于日志显示）
    pub user_index: usize,
}

impl UserCtx {
    pub fn new(email: impl Into<String>, user_index: usize) -> Self {
        Self {
            email: email.into(),
            user_index,
        }
    }
}

impl Display for UserCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[用户 {} {}]", self.user_index, self.email)
    }
}
