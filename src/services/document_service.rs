//! 文档分析服务 - 业务能力层
//!
//! 只负责"把一份文档交给分析服务并拿回版面结果"的能力
//!
//! 分析接口是长时操作：提交后服务返回 202 和 `Operation-Location`，
//! 之后轮询该地址直到状态变为 `succeeded` 或 `failed`

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::DocumentSettings;
use crate::error::{AppError, AppResult, DocumentError};
use crate::models::AnalyzeResult;

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const OPERATION_LOCATION_HEADER: &str = "operation-location";
const LAYOUT_MODEL_ID: &str = "prebuilt-layout";

/// 文档分析能力
#[async_trait]
pub trait DocumentAnalyzer: Send + Sync {
    /// 分析整份文档，返回所有页的版面结果
    async fn analyze(&self, document: &[u8]) -> AppResult<AnalyzeResult>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest<'a> {
    base64_source: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeOperation {
    status: String,
    #[serde(default)]
    analyze_result: Option<AnalyzeResult>,
}

/// 文档分析服务（REST）
pub struct DocumentService {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    api_version: String,
    poll_interval: Duration,
}

impl DocumentService {
    /// 创建新的文档分析服务
    pub fn new(settings: &DocumentSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            api_version: settings.api_version.clone(),
            poll_interval: Duration::from_millis(settings.poll_interval_ms),
        }
    }

    fn analyze_url(&self) -> String {
        format!(
            "{}/documentintelligence/documentModels/{}:analyze",
            self.endpoint, LAYOUT_MODEL_ID
        )
    }

    /// 提交分析请求，返回轮询地址
    async fn begin_analyze(&self, document: &[u8]) -> AppResult<String> {
        let url = self.analyze_url();
        let encoded = STANDARD.encode(document);
        debug!("提交文档分析，文档大小: {} 字节", document.len());

        let response = self
            .client
            .post(&url)
            .query(&[
                ("api-version", self.api_version.as_str()),
                ("outputContentFormat", "markdown"),
            ])
            .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
            .json(&AnalyzeRequest {
                base64_source: &encoded,
            })
            .send()
            .await
            .map_err(|e| request_failed(&url, e))?;

        let response = ensure_success(response).await?;

        response
            .headers()
            .get(OPERATION_LOCATION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| DocumentError::MissingOperationLocation.into())
    }

    /// 轮询直到分析结束
    async fn poll_result(&self, operation_url: &str) -> AppResult<AnalyzeResult> {
        let mut attempts = 0usize;
        loop {
            attempts += 1;
            let response = self
                .client
                .get(operation_url)
                .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
                .send()
                .await
                .map_err(|e| request_failed(operation_url, e))?;

            let response = ensure_success(response).await?;
            let wait = retry_after(response.headers()).unwrap_or(self.poll_interval);

            let operation: AnalyzeOperation = response
                .json()
                .await
                .map_err(|e| request_failed(operation_url, e))?;

            match operation.status.as_str() {
                "succeeded" => {
                    info!("文档分析完成，共轮询 {} 次", attempts);
                    return operation.analyze_result.ok_or_else(|| {
                        DocumentError::BadResponse {
                            status: 200,
                            body: "分析成功但缺少 analyzeResult".to_string(),
                        }
                        .into()
                    });
                }
                "failed" | "canceled" => {
                    return Err(DocumentError::AnalysisFailed {
                        status: operation.status,
                    }
                    .into());
                }
                status => {
                    debug!("文档分析状态: {}，{:?} 后重试", status, wait);
                    tokio::time::sleep(wait).await;
                }
            }
        }
    }
}

#[async_trait]
impl DocumentAnalyzer for DocumentService {
    async fn analyze(&self, document: &[u8]) -> AppResult<AnalyzeResult> {
        let operation_url = self.begin_analyze(document).await?;
        debug!("轮询地址: {}", operation_url);
        self.poll_result(&operation_url).await
    }
}

async fn ensure_success(response: reqwest::Response) -> AppResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(DocumentError::BadResponse {
        status: status.as_u16(),
        body,
    }
    .into())
}

/// 解析 `Retry-After`（秒）
fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

fn request_failed(endpoint: &str, source: reqwest::Error) -> AppError {
    AppError::Document(DocumentError::RequestFailed {
        endpoint: endpoint.to_string(),
        source: Box::new(source),
    })
}
