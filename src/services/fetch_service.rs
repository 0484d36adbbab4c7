//! 文章抓取服务 - 业务能力层
//!
//! 只负责"抓取单个URL"能力，不关心流程
//!
//! 失败模式：
//! - 网络超时
//! - 404/403/付费墙
//! - 其他传输错误

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Config;
use crate::models::{FetchError, FetchResult};
use crate::services::traits::ArticleFetcher;

/// 抓取时使用的客户端标识
const USER_AGENT: &str = "Mozilla/5.0 (compatible; EdTechDigestBot/1.0)";

/// 文章抓取服务
///
/// 职责：
/// - 对单个URL发起一次限时GET请求
/// - 截断正文内容，限制下游prompt体积
/// - 将失败原因分类后返回，单个URL失败不影响整次运行
/// - 不做重试，也不感知批次结构
pub struct FetchService {
    client: Client,
    content_cap: usize,
}

impl FetchService {
    /// 创建新的抓取服务
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            content_cap: config.content_cap,
        }
    }

    /// 将 reqwest 错误分类为 FetchError
    fn classify(error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = error.status() {
            FetchError::HttpStatus(status.as_u16())
        } else {
            FetchError::Other(error.to_string())
        }
    }
}

#[async_trait]
impl ArticleFetcher for FetchService {
    async fn fetch(&self, url: &str) -> FetchResult {
        info!("正在抓取: {}", url);

        let response = match self.client.get(url).send().await {
            Ok(resp) => resp,
            Err(e) => return FetchResult::failed(url, Self::classify(e)),
        };

        let status = response.status();
        if !status.is_success() {
            return FetchResult::failed(url, FetchError::HttpStatus(status.as_u16()));
        }

        match response.text().await {
            Ok(body) => {
                // 原始文本截断即可，HTML解析不在本阶段范围内
                let content: String = body.chars().take(self.content_cap).collect();
                debug!("抓取成功: {} ({} 字符)", url, content.len());
                FetchResult::fetched(url, content)
            }
            Err(e) => FetchResult::failed(url, Self::classify(e)),
        }
    }
}
