//! # LLM 服务测试
//!
//! 用 wiremock 模拟 Azure OpenAI 聊天接口，检查请求格式和回复提取

use prompt_eval::config::LlmSettings;
use prompt_eval::services::{ChatModel, LlmService};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chat_completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "gpt-4o",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content, "refusal": null },
            "finish_reason": "stop",
            "logprobs": null
        }],
        "usage": { "prompt_tokens": 42, "completion_tokens": 1, "total_tokens": 43 }
    })
}

fn settings(server: &MockServer) -> LlmSettings {
    LlmSettings {
        api_base: server.uri(),
        api_key: "test-key".to_string(),
        deployment: "gpt4o".to_string(),
        api_version: LlmSettings::DEFAULT_API_VERSION.to_string(),
    }
}

#[tokio::test]
async fn test_send_to_llm_against_azure_deployment() {
    // --- 1. Arrange ---
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/deployments/gpt4o/chat/completions"))
        .and(query_param("api-version", "2024-05-01-preview"))
        .and(header("api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion(" 7\n")))
        .expect(1)
        .mount(&server)
        .await;
    let service = LlmService::new(&settings(&server));

    // --- 2. Act ---
    let reply = service
        .send_to_llm(
            "Summarize the article.",
            Some("Rate the clarity of the following prompt."),
            Some(0.0),
        )
        .await;

    // --- 3. Assert ---
    assert!(reply.is_ok(), "send_to_llm failed: {:?}", reply.err());
    // 原样返回，去空白由调用方决定
    assert_eq!(reply.unwrap(), " 7\n");

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["model"], "gpt4o");
    assert_eq!(body["temperature"], 0.0);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(
        body["messages"][0]["content"],
        "Rate the clarity of the following prompt."
    );
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["messages"][1]["content"][0]["type"], "text");
    assert_eq!(
        body["messages"][1]["content"][0]["text"],
        "Summarize the article."
    );
}

#[tokio::test]
async fn test_default_sampling_omits_temperature() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/deployments/gpt4o/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion("details")))
        .mount(&server)
        .await;
    let service = LlmService::new(&settings(&server));

    let reply = service.send_to_llm("document text", None, None).await.unwrap();
    assert_eq!(reply, "details");

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("temperature").is_none());
    assert_eq!(body["messages"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_plain_user_message_is_a_string() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/deployments/gpt4o/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion("page details")))
        .expect(1)
        .mount(&server)
        .await;
    let service = LlmService::new(&settings(&server));

    let reply = service
        .send_plain_to_llm("Here is is the document: Appendix\n", Some("Extract details."), None)
        .await
        .unwrap();
    assert_eq!(reply, "page details");

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["messages"][0]["content"], "Extract details.");
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(
        body["messages"][1]["content"],
        "Here is is the document: Appendix\n"
    );
    assert!(body.get("temperature").is_none());
}
