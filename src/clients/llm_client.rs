/// LLM API 客户端
///
/// 封装所有与 LLM API 相关的调用逻辑
///
/// ## 技术栈
/// - 使用 `async-openai` crate 进行 API 调用
/// - 兼容 OpenAI API 的服务都可以通过 `api_base` 接入
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, LlmError};

/// 单次回答的最大输出 token 数
pub const MAX_OUTPUT_TOKENS: u32 = 20;

/// 文本补全能力
#[async_trait]
pub trait CompletionApi: Send + Sync {
    /// 根据提示词生成一段文本
    async fn complete(&self, prompt: &str) -> AppResult<String>;
}

/// LLM 客户端
pub struct LlmClient {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl LlmClient {
    /// 创建新的 LLM 客户端
    pub fn new(config: &Config) -> Self {
        Self::with_endpoint(
            &config.llm_api_key,
            &config.llm_api_base_url,
            &config.llm_model_name,
        )
    }

    /// 使用自定义端点和模型创建
    pub fn with_endpoint(api_key: &str, api_base_url: &str, model_name: impl Into<String>) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: model_name.into(),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    fn build_error(&self, source: impl std::error::Error + Send + Sync + 'static) -> AppError {
        LlmError::BuildRequestFailed {
            model: self.model_name.clone(),
            source: Box::new(source),
        }
        .into()
    }
}

#[async_trait]
impl CompletionApi for LlmClient {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("提示词长度: {} 字符", prompt.len());

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| self.build_error(e))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
            .max_completion_tokens(MAX_OUTPUT_TOKENS)
            .n(1u8)
            .build()
            .map_err(|e| self.build_error(e))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            AppError::llm_api_failed(&self.model_name, e)
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| LlmError::EmptyContent {
                model: self.model_name.clone(),
            })?;

        Ok(content.trim().to_string())
    }
}
