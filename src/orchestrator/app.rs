//! 应用编排器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一次运行的生命周期和终端状态汇报。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：输出启动横幅、加载文章URL列表
//! 2. **流程委托**：创建 DigestFlow 并执行一次完整运行
//! 3. **终端汇报**：按运行结果输出三种最终横幅之一
//!    （发送成功并附指标 / 质检失败并附预览 / 发送失败并附全文）

use anyhow::Result;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::models::loaders;
use crate::workflow::{DigestFlow, RunOutcome};

/// 应用主结构
pub struct App {
    config: Config,
    urls: Vec<String>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        // URL列表：配置文件存在时优先，否则使用配置中的列表
        let urls = match loaders::load_article_urls(&config.urls_file).await? {
            Some(urls) => urls,
            None => config.article_urls.clone(),
        };

        info!("待抓取文章数: {}\n", urls.len());

        Ok(Self { config, urls })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        // 流程创建会先校验邮件凭证，早于任何网络动作
        let flow = DigestFlow::new(&self.config)?;

        let outcome = flow.run(&self.urls).await?;

        match outcome {
            RunOutcome::Sent {
                subject,
                recipient,
                word_count,
                citation_count,
            } => {
                log_sent(&subject, &self.config.sender_address, &recipient, word_count, citation_count);
            }
            RunOutcome::NoArticles => {
                error!("\n❌ 错误: 没有抓取到任何文章，无法生成摘要");
            }
            RunOutcome::QualityRejected { preview, issues } => {
                log_quality_rejected(&preview, &issues);
            }
            RunOutcome::DeliveryFailed { digest, error } => {
                log_delivery_failed(&digest, &error);
            }
        }

        Ok(())
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 EdTech 摘要代理启动");
    info!("{}", "=".repeat(60));
    info!(
        "日期: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M")
    );
    info!("模型: {}", config.llm_model_name);
}

fn log_sent(subject: &str, sender: &str, recipient: &str, word_count: usize, citation_count: usize) {
    info!("\n{}", "=".repeat(60));
    info!("✅ 摘要发送成功");
    info!("{}", "=".repeat(60));
    info!("主题: {}", subject);
    info!("发件人: {}", sender);
    info!("收件人: {}", recipient);
    info!("词数: {}", word_count);
    info!("引用数: {}", citation_count);
}

fn log_quality_rejected(preview: &str, issues: &[String]) {
    warn!("\n❌ 摘要未通过质检，不发送邮件");
    for issue in issues {
        warn!("  - {}", issue);
    }
    info!("\n摘要预览:");
    info!("{}", "-".repeat(60));
    info!("{}", preview);
    info!("{}", "-".repeat(60));
}

fn log_delivery_failed(digest: &str, error: &str) {
    error!("\n{}", "=".repeat(60));
    error!("❌ 邮件发送失败: {}", error);
    error!("{}", "=".repeat(60));
    // 全文兜底输出，确保内容不丢失
    info!("\n摘要已生成但未发送:");
    info!("{}", "-".repeat(60));
    info!("{}", digest);
    info!("{}", "-".repeat(60));
}
