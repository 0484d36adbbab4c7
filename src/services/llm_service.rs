//! LLM 服务 - 业务能力层
//!
//! 只负责"生成"能力：合成摘要、提取主题，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（Anthropic 兼容端点、Azure 等）

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, ConfigError, LlmError};
use crate::models::Article;
use crate::services::traits::DigestGenerator;

/// 摘要合成的生成token上限
const SYNTHESIS_MAX_TOKENS: u32 = 1500;
/// 主题提取的生成token上限
const THEME_MAX_TOKENS: u32 = 50;
/// 未配置凭证时的回退主题
pub const DEFAULT_THEME: &str = "Weekly Update";

/// LLM 服务
///
/// 职责：
/// - 调用 LLM API 合成叙事摘要（一次运行一次调用）
/// - 调用 LLM API 提取主题词（一次运行一次调用）
/// - 凭证缺失时：合成报配置错误，主题提取优雅降级
/// - 只接收文章列表，不感知批次结构，也不关心流程顺序
pub struct LlmService {
    /// 凭证未配置时为 None
    client: Option<Client<OpenAIConfig>>,
    model_name: String,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        let client = config.llm_api_key.as_ref().map(|key| {
            let openai_config = OpenAIConfig::new()
                .with_api_key(key)
                .with_api_base(&config.llm_api_base_url);
            Client::with_config(openai_config)
        });

        Self {
            client,
            model_name: config.llm_model_name.clone(),
        }
    }

    /// 通用的 LLM 调用函数
    ///
    /// 这是最基础的 LLM 调用接口，合成和主题提取都基于此函数。
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    /// - `max_tokens`: 生成token上限
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（已去除首尾空白）
    pub async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
        max_tokens: u32,
    ) -> AppResult<String> {
        // 凭证检查在任何网络调用之前
        let client = self
            .client
            .as_ref()
            .ok_or(AppError::Config(ConfigError::MissingLlmApiKey))?;

        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let mut messages = Vec::new();

        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()
                .map_err(|e| {
                    AppError::Llm(LlmError::RequestBuildFailed {
                        source: Box::new(e),
                    })
                })?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(|e| {
                AppError::Llm(LlmError::RequestBuildFailed {
                    source: Box::new(e),
                })
            })?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .max_tokens(max_tokens)
            .build()
            .map_err(|e| {
                AppError::Llm(LlmError::RequestBuildFailed {
                    source: Box::new(e),
                })
            })?;

        // 调用失败不重试，直接向上传播
        let response = client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            AppError::llm_api_failed(&self.model_name, e)
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .ok_or_else(|| {
                AppError::Llm(LlmError::EmptyResponse {
                    model: self.model_name.clone(),
                })
            })?
            .message
            .content
            .clone()
            .ok_or_else(|| {
                AppError::Llm(LlmError::EmptyContent {
                    model: self.model_name.clone(),
                })
            })?;

        Ok(content.trim().to_string())
    }

    /// 构建摘要合成的 prompt
    ///
    /// 每篇文章的URL和（已截断的）正文都嵌入其中；
    /// 有抓取失败时附加失败数量说明。
    fn build_synthesis_prompt(articles: &[Article], failed_count: usize) -> String {
        let mut articles_text = String::new();
        for (i, article) in articles.iter().enumerate() {
            articles_text.push_str(&format!("\n\n--- Article {} ---\n", i + 1));
            articles_text.push_str(&format!("URL: {}\n", article.url));
            articles_text.push_str(&format!("Content: {}\n", article.content));
        }

        let failed_note = if failed_count > 0 {
            format!(
                "NOTE: {} articles could not be fetched this week due to errors.",
                failed_count
            )
        } else {
            String::new()
        };

        format!(
            r#"You are an expert EdTech industry analyst writing for product managers who need to understand the business landscape.

You have {} articles from this week's EdTech news. Your job is to synthesize them into a ~500-word narrative digest.

Requirements:
- Write in an engaging, journalistic style (not bullet points)
- Identify 2-3 key themes across the articles
- Connect dots between policy, startups, and market trends
- Cite sources inline using this format: "According to EdSurge (URL), ..."
- End with one forward-looking insight or implication for PMs
- NEVER fabricate quotes or facts - only use information from the articles provided

{}

{}

Now write the digest:"#,
            articles.len(),
            articles_text,
            failed_note
        )
    }

    /// 构建主题提取的 prompt
    fn build_theme_prompt(digest_text: &str) -> String {
        format!(
            r#"Read this EdTech industry digest and extract the ONE key theme in 3-6 words for an email subject line.

Digest:
{}

Respond with ONLY the theme, nothing else. Examples of good themes:
- "AI Tutoring Investment Surge"
- "Policy Changes Impact K-12 Tech"
- "Consolidation in EdTech Market"

Key theme:"#,
            digest_text
        )
    }
}

#[async_trait]
impl DigestGenerator for LlmService {
    async fn synthesize(&self, articles: &[Article], failed_count: usize) -> AppResult<String> {
        info!("📝 正在调用 LLM 合成摘要...");

        let prompt = Self::build_synthesis_prompt(articles, failed_count);
        self.send_to_llm(&prompt, None, SYNTHESIS_MAX_TOKENS).await
    }

    async fn extract_theme(&self, digest_text: &str) -> AppResult<String> {
        // 凭证缺失时优雅降级为固定主题
        if self.client.is_none() {
            warn!("LLM 凭证未配置，使用回退主题: {}", DEFAULT_THEME);
            return Ok(DEFAULT_THEME.to_string());
        }

        let prompt = Self::build_theme_prompt(digest_text);
        self.send_to_llm(&prompt, None, THEME_MAX_TOKENS).await
    }
}
