use anyhow::Result;
use prompt_eval::config::{load_dotenv, EvaluationSettings, LlmSettings};
use prompt_eval::utils::logging;
use prompt_eval::EvaluationApp;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    load_dotenv();
    let llm = LlmSettings::from_env()?;
    let settings = EvaluationSettings::from_env()?;

    // 初始化并运行应用
    EvaluationApp::initialize(&llm, settings)
        .await?
        .run()
        .await?;

    Ok(())
}
