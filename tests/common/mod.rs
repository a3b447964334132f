#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use prompt_eval::{AppError, AppResult, ChatModel};

/// 假模型的一条预设回复
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    /// 模拟网络 / 服务端错误
    ServiceDown,
}

pub fn text(s: &str) -> Reply {
    Reply::Text(s.to_string())
}

/// 假模型收到的一次调用
#[derive(Debug, Clone)]
pub struct Call {
    pub user_message: String,
    pub system_message: Option<String>,
    pub temperature: Option<f32>,
    /// 是否以纯字符串而不是文本分片发送用户消息
    pub plain_text: bool,
}

/// 按脚本依次回复的假模型
///
/// 克隆后共享同一份脚本和调用记录，方便测试在交给被测对象之后继续检查
#[derive(Clone, Default)]
pub struct ScriptedModel {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    calls: Arc<Mutex<Vec<Call>>>,
    delay: Option<Duration>,
}

impl ScriptedModel {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().collect())),
            calls: Arc::default(),
            delay: None,
        }
    }

    /// 每次调用前先等待一段时间，模拟网络延迟
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    fn model_name(&self) -> &str {
        "scripted"
    }

    async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
        temperature: Option<f32>,
    ) -> AppResult<String> {
        self.reply(Call {
            user_message: user_message.to_string(),
            system_message: system_message.map(str::to_string),
            temperature,
            plain_text: false,
        })
        .await
    }

    async fn send_plain_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
        temperature: Option<f32>,
    ) -> AppResult<String> {
        self.reply(Call {
            user_message: user_message.to_string(),
            system_message: system_message.map(str::to_string),
            temperature,
            plain_text: true,
        })
        .await
    }
}

impl ScriptedModel {
    async fn reply(&self, call: Call) -> AppResult<String> {
        self.calls.lock().unwrap().push(call);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Text(s)) => Ok(s),
            Some(Reply::ServiceDown) => Err(AppError::llm_api_failed(
                "scripted",
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"),
            )),
            None => Err(AppError::llm_api_failed(
                "scripted",
                std::io::Error::new(std::io::ErrorKind::Other, "script exhausted"),
            )),
        }
    }
}

/// 一次完整成功评估所需的七条回复（主评估 + 六个维度）
pub fn successful_run(primary: &str, scores: [&str; 6]) -> Vec<Reply> {
    let mut replies = vec![text(primary)];
    replies.extend(scores.iter().map(|s| text(s)));
    replies
}

pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("debug")
        .try_init();
}
