use anyhow::Result;
use prompt_eval::config::{load_dotenv, DocumentSettings, ExtractionSettings, LlmSettings};
use prompt_eval::utils::logging;
use prompt_eval::ExtractionApp;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    load_dotenv();
    let llm = LlmSettings::from_env()?;
    let document = DocumentSettings::from_env()?;
    let settings = ExtractionSettings::from_env()?;

    // 初始化并运行应用
    ExtractionApp::initialize(&llm, &document, settings)
        .run()
        .await?;

    Ok(())
}
