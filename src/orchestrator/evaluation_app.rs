//! 提示词评估应用 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：加载评分规则、构建 LLM 服务和评估器
//! 2. **模板渲染**：渲染评估系统提示词和每个待评估提示词
//! 3. **顺序评估**：逐个评估，单个失败只记录不中止
//! 4. **输出报告**：打印缩进的 JSON 报告

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::{EvaluationSettings, LlmSettings};
use crate::models::{load_rubric_or_default, TemplateLoader};
use crate::services::{ChatModel, LlmService, ResultWriter};
use crate::utils::logging::{log_startup, print_final_stats};
use crate::workflow::PromptEvaluator;

/// 评估应用
pub struct EvaluationApp<M: ChatModel> {
    settings: EvaluationSettings,
    templates: TemplateLoader,
    evaluator: PromptEvaluator<M>,
}

impl EvaluationApp<LlmService> {
    /// 使用 Azure OpenAI 部署初始化应用
    pub async fn initialize(llm: &LlmSettings, settings: EvaluationSettings) -> Result<Self> {
        let service = LlmService::new(llm);
        log_startup("提示词评估", service.model_name());
        Self::with_model(service, settings).await
    }
}

impl<M: ChatModel> EvaluationApp<M> {
    /// 使用给定模型初始化应用
    pub async fn with_model(llm: M, settings: EvaluationSettings) -> Result<Self> {
        let rubric = load_rubric_or_default(settings.rubric_file.as_deref())
            .await
            .context("无法加载评分规则")?;
        let evaluator = PromptEvaluator::new(
            llm,
            rubric,
            ResultWriter::with_path(settings.result_file.clone()),
        )
        .with_revision(settings.suggest_revision);

        Ok(Self {
            templates: TemplateLoader::new(settings.template_dir.clone()),
            settings,
            evaluator,
        })
    }

    pub fn evaluator(&self) -> &PromptEvaluator<M> {
        &self.evaluator
    }

    /// 运行应用主逻辑，返回最终报告（JSON）
    pub async fn run(&mut self) -> Result<String> {
        let system_prompt = self
            .templates
            .render(&self.settings.system_template)
            .context("无法渲染评估系统提示词")?;

        // 先渲染全部模板，模板有问题时不发出任何请求
        let mut prompts = Vec::with_capacity(self.settings.prompt_templates.len());
        for template_name in &self.settings.prompt_templates {
            let prompt = self
                .templates
                .render(template_name)
                .with_context(|| format!("无法渲染待评估提示词: {}", template_name))?;
            prompts.push((template_name.clone(), prompt));
        }

        let total = prompts.len();
        for (index, (template_name, prompt_to_evaluate)) in prompts.iter().enumerate() {
            info!("📄 [{}/{}] 评估模板: {}", index + 1, total, template_name);

            let result = self
                .evaluator
                .evaluate(&system_prompt, prompt_to_evaluate)
                .await;
            match result {
                Some(response) => println!("{}", response),
                None => warn!("[{}] 评估失败，已记录到报告", template_name),
            }
        }

        let report = self.evaluator.report();
        print_final_stats(&report);

        let json = report.to_pretty_json().context("无法序列化评估报告")?;
        println!("{}", json);
        Ok(json)
    }
}
