//! 边界能力接口
//!
//! 三个外部协作方（网页抓取、文本生成、邮件发送）各自收窄为一个
//! 异步 trait，生产实现是薄适配器，测试中可替换为确定性的假实现。

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{Article, FetchResult};

/// 文章抓取能力
#[async_trait]
pub trait ArticleFetcher: Send + Sync {
    /// 抓取单个URL，失败原因经过分类，不会传播错误
    async fn fetch(&self, url: &str) -> FetchResult;
}

/// 摘要生成能力（两次生成调用共用同一凭证）
#[async_trait]
pub trait DigestGenerator: Send + Sync {
    /// 将成功抓取的文章合成为一篇叙事摘要
    ///
    /// 前置条件：`articles` 非空（由调用方保证）。
    /// 凭证缺失或调用失败均为致命错误，向上传播。
    async fn synthesize(&self, articles: &[Article], failed_count: usize) -> AppResult<String>;

    /// 从摘要中提取邮件主题用的简短主题词
    ///
    /// 凭证缺失时返回固定的回退主题，不报错。
    async fn extract_theme(&self, digest_text: &str) -> AppResult<String>;
}

/// 邮件投递能力
#[async_trait]
pub trait DigestMailer: Send + Sync {
    /// 将摘要以HTML邮件发送给固定收件人
    ///
    /// 传输失败（认证、连接）以分类错误返回，调用方保留摘要内容。
    async fn send(&self, digest_text: &str, theme: &str) -> AppResult<()>;

    /// 收件人地址（用于运行总结）
    fn recipient(&self) -> &str;
}
