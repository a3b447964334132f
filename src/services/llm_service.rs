//! LLM 服务 - 业务能力层
//!
//! 只负责"向模型发一轮对话并拿回文本"的能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 通过 `AzureConfig` 访问 Azure OpenAI 部署

use async_openai::{
    config::AzureConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartText,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        ChatCompletionRequestUserMessageContent, ChatCompletionRequestUserMessageContentPart,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::LlmSettings;
use crate::error::{AppError, AppResult, LlmError};

/// 对话模型能力
///
/// 评估流程和单页提取流程都只依赖这个 trait，测试时可以替换成脚本化的假模型
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// 模型（部署）名称，仅用于日志和错误信息
    fn model_name(&self) -> &str;

    /// 发送一轮对话，返回模型回复的原始文本
    ///
    /// `temperature` 为 `None` 时使用服务端默认采样参数
    async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
        temperature: Option<f32>,
    ) -> AppResult<String>;

    /// 与 `send_to_llm` 相同，但用户消息以纯字符串而不是文本分片发送
    async fn send_plain_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
        temperature: Option<f32>,
    ) -> AppResult<String> {
        self.send_to_llm(user_message, system_message, temperature)
            .await
    }
}

/// LLM 服务
///
/// 职责：
/// - 构建 system + user 两条消息的请求
/// - 调用 Azure OpenAI 聊天接口
/// - 提取第一条回复的文本
pub struct LlmService {
    client: Client<AzureConfig>,
    model_name: String,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(settings: &LlmSettings) -> Self {
        let azure_config = AzureConfig::new()
            .with_api_base(&settings.api_base)
            .with_api_key(&settings.api_key)
            .with_deployment_id(&settings.deployment)
            .with_api_version(&settings.api_version);

        Self {
            client: Client::with_config(azure_config),
            model_name: settings.deployment.clone(),
        }
    }

    fn build_messages(
        user_content: ChatCompletionRequestUserMessageContent,
        system_message: Option<&str>,
    ) -> AppResult<Vec<ChatCompletionRequestMessage>> {
        let mut messages = Vec::new();

        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()
                .map_err(request_build_failed)?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_content)
            .build()
            .map_err(request_build_failed)?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        Ok(messages)
    }

    async fn complete(
        &self,
        user_content: ChatCompletionRequestUserMessageContent,
        system_message: Option<&str>,
        temperature: Option<f32>,
    ) -> AppResult<String> {
        let messages = Self::build_messages(user_content, system_message)?;

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&self.model_name).messages(messages);
        if let Some(temperature) = temperature {
            args.temperature(temperature);
        }
        let request = args.build().map_err(request_build_failed)?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            AppError::llm_api_failed(&self.model_name, e)
        })?;

        debug!("LLM API 调用成功");

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                LlmError::EmptyContent {
                    model: self.model_name.clone(),
                }
                .into()
            })
    }
}

/// 用户消息作为单个文本分片
fn content_parts(user_message: &str) -> ChatCompletionRequestUserMessageContent {
    ChatCompletionRequestUserMessageContent::Array(vec![
        ChatCompletionRequestUserMessageContentPart::Text(
            ChatCompletionRequestMessageContentPartText {
                text: user_message.to_string(),
            },
        ),
    ])
}

#[async_trait]
impl ChatModel for LlmService {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
        temperature: Option<f32>,
    ) -> AppResult<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        self.complete(content_parts(user_message), system_message, temperature)
            .await
    }

    async fn send_plain_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
        temperature: Option<f32>,
    ) -> AppResult<String> {
        debug!("调用 LLM API（纯文本消息），模型: {}", self.model_name);

        self.complete(
            ChatCompletionRequestUserMessageContent::Text(user_message.to_string()),
            system_message,
            temperature,
        )
        .await
    }
}

fn request_build_failed(source: async_openai::error::OpenAIError) -> AppError {
    AppError::Llm(LlmError::RequestBuildFailed {
        source: Box::new(source),
    })
}
