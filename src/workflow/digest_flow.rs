//! 摘要生成流程 - 流程层
//!
//! 核心职责：定义"一次运行"的完整处理流程
//!
//! 流程顺序（严格串行，无回退、无重试）：
//! 1. 抓取 → 无文章则终止
//! 2. 合成 → 质检 → 不通过则终止（保留预览）
//! 3. 提取主题 → 发送邮件 → Sent 或 DeliveryFailed（保留全文）

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::config::Config;
use crate::models::{ArticleBatch, Digest};
use crate::services::{
    quality_service, ArticleFetcher, DigestGenerator, DigestMailer, FetchService, LlmService,
    MailService,
};
use crate::utils::logging::truncate_text;

/// 质检未通过时保留的预览长度（字符数）
const PREVIEW_LEN: usize = 500;

/// 一次运行的终端状态
#[derive(Debug)]
pub enum RunOutcome {
    /// 邮件发送成功
    Sent {
        subject: String,
        recipient: String,
        word_count: usize,
        citation_count: usize,
    },
    /// 没有任何文章抓取成功，摘要未生成
    NoArticles,
    /// 摘要未通过质检，不发送；保留前500字符预览和全部问题
    QualityRejected {
        preview: String,
        issues: Vec<String>,
    },
    /// 摘要已生成但发送失败；保留全文
    DeliveryFailed { digest: String, error: String },
}

/// 摘要生成流程
///
/// - 编排一次运行的完整流程
/// - 决定何时抓取、何时合成、何时终止
/// - 只依赖业务能力（services），通过能力接口持有，便于测试替换
pub struct DigestFlow {
    fetcher: Arc<dyn ArticleFetcher>,
    generator: Arc<dyn DigestGenerator>,
    mailer: Arc<dyn DigestMailer>,
    verbose_logging: bool,
}

impl DigestFlow {
    /// 创建生产环境的流程
    ///
    /// 邮件凭证在此处校验，早于任何网络动作。
    pub fn new(config: &Config) -> Result<Self> {
        let mailer = MailService::new(config)?;
        Ok(Self {
            fetcher: Arc::new(FetchService::new(config)),
            generator: Arc::new(LlmService::new(config)),
            mailer: Arc::new(mailer),
            verbose_logging: config.verbose_logging,
        })
    }

    /// 使用自定义能力实现创建流程（测试用）
    pub fn with_services(
        fetcher: Arc<dyn ArticleFetcher>,
        generator: Arc<dyn DigestGenerator>,
        mailer: Arc<dyn DigestMailer>,
    ) -> Self {
        Self {
            fetcher,
            generator,
            mailer,
            verbose_logging: false,
        }
    }

    /// 执行一次完整运行
    pub async fn run(&self, urls: &[String]) -> Result<RunOutcome> {
        // ========== 阶段 1: 抓取 ==========
        let batch = self.fetch_all(urls).await;

        info!("\n✓ 成功抓取 {} 篇文章", batch.article_count());
        if batch.failed_count() > 0 {
            info!("✗ 抓取失败 {} 篇", batch.failed_count());
        }

        if batch.is_empty() {
            return Ok(RunOutcome::NoArticles);
        }

        // ========== 阶段 2: 合成 ==========
        // 合成失败（凭证缺失、API错误）是致命的，直接向上传播
        let text = self
            .generator
            .synthesize(&batch.articles, batch.failed_count())
            .await?;
        let digest = Digest::new(text);

        // ========== 阶段 3: 质检 ==========
        info!("\n🔍 正在运行质检...");
        let report = quality_service::evaluate(&digest, batch.article_count());

        if !report.passed {
            warn!("⚠️ 检测到质量问题:");
            for issue in &report.issues {
                warn!("  - {}", issue);
            }
            return Ok(RunOutcome::QualityRejected {
                preview: truncate_text(&digest.text, PREVIEW_LEN),
                issues: report.issues,
            });
        }
        info!("✓ 质检通过");

        // ========== 阶段 4: 提取主题 ==========
        info!("\n📋 正在提取邮件主题...");
        let theme = self.generator.extract_theme(&digest.text).await?;
        info!("主题: {}", theme);

        // ========== 阶段 5: 发送 ==========
        match self.mailer.send(&digest.text, &theme).await {
            Ok(()) => Ok(RunOutcome::Sent {
                subject: MailService::subject_for(&theme),
                recipient: self.mailer.recipient().to_string(),
                word_count: digest.word_count,
                citation_count: digest.citation_count,
            }),
            Err(e) => {
                // 发送失败不丢弃内容，交给编排层兜底输出
                Ok(RunOutcome::DeliveryFailed {
                    digest: digest.text,
                    error: e.to_string(),
                })
            }
        }
    }

    /// 顺序抓取所有URL
    ///
    /// 不并发：URL数量为个位数到十几个，串行足够。
    /// 每个URL恰好进入成功或失败列表之一，保持输入相对顺序。
    async fn fetch_all(&self, urls: &[String]) -> ArticleBatch {
        let mut batch = ArticleBatch::default();

        for url in urls {
            let result = self.fetcher.fetch(url).await;
            match &result.outcome {
                Ok(content) => {
                    info!("  ✓ 成功");
                    if self.verbose_logging {
                        info!("    内容长度: {} 字符", content.len());
                    }
                }
                Err(e) => warn!("  ❌ 失败: {}", e),
            }
            batch.push(result);
        }

        batch
    }
}