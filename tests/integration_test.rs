//! DigestFlow 端到端测试
//!
//! 三个边界能力（抓取 / 生成 / 发送）均以确定性假实现替换，
//! 验证流程状态机的每条终端路径，不触网。

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use edtech_digest::error::{AppError, AppResult};
use edtech_digest::models::{Article, FetchError, FetchResult};
use edtech_digest::services::{ArticleFetcher, DigestGenerator, DigestMailer};
use edtech_digest::workflow::{DigestFlow, RunOutcome};

// ========== 假实现 ==========

/// 按URL前缀决定成功或失败的假抓取器
struct FakeFetcher;

#[async_trait]
impl ArticleFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        if url.contains("bad") {
            FetchResult::failed(url, FetchError::HttpStatus(404))
        } else {
            FetchResult::fetched(url, format!("article body from {}", url))
        }
    }
}

/// 返回固定摘要文本的假生成器，并记录调用情况
struct FakeGenerator {
    digest_text: String,
    theme: String,
    synthesize_calls: Mutex<Vec<(usize, usize)>>,
    theme_calls: AtomicUsize,
}

impl FakeGenerator {
    fn new(digest_text: impl Into<String>) -> Self {
        Self {
            digest_text: digest_text.into(),
            theme: "AI Policy Shifts".to_string(),
            synthesize_calls: Mutex::new(Vec::new()),
            theme_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DigestGenerator for FakeGenerator {
    async fn synthesize(&self, articles: &[Article], failed_count: usize) -> AppResult<String> {
        self.synthesize_calls
            .lock()
            .unwrap()
            .push((articles.len(), failed_count));
        Ok(self.digest_text.clone())
    }

    async fn extract_theme(&self, _digest_text: &str) -> AppResult<String> {
        self.theme_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.theme.clone())
    }
}

/// 可配置成功/失败的假发送器，并记录发送内容
struct FakeMailer {
    fail: bool,
    sent: Mutex<Vec<(String, String)>>,
}

impl FakeMailer {
    fn new(fail: bool) -> Self {
        Self {
            fail,
            sent: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl DigestMailer for FakeMailer {
    async fn send(&self, digest_text: &str, theme: &str) -> AppResult<()> {
        if self.fail {
            return Err(AppError::Other("535 authentication failed".to_string()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((digest_text.to_string(), theme.to_string()));
        Ok(())
    }

    fn recipient(&self) -> &str {
        "recipient@example.com"
    }
}

// ========== 测试数据 ==========

/// 生成指定词数、指定引用数的摘要文本（无占位符）
fn digest_text(word_count: usize, citation_count: usize) -> String {
    let mut words: Vec<String> = Vec::with_capacity(word_count);
    for i in 0..citation_count {
        words.push(format!("https://source.example/{}", i));
    }
    for i in citation_count..word_count {
        words.push(format!("item{}", i));
    }
    words.join(" ")
}

fn urls(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// ========== 终端路径测试 ==========

/// 3个URL全部成功、500词4引用的摘要 → Sent，并带正确指标
#[tokio::test]
async fn test_full_run_ends_in_sent() {
    let generator = Arc::new(FakeGenerator::new(digest_text(500, 4)));
    let mailer = Arc::new(FakeMailer::new(false));
    let flow = DigestFlow::with_services(
        Arc::new(FakeFetcher),
        generator.clone(),
        mailer.clone(),
    );

    let outcome = flow
        .run(&urls(&["https://a.example", "https://b.example", "https://c.example"]))
        .await
        .unwrap();

    match outcome {
        RunOutcome::Sent {
            subject,
            recipient,
            word_count,
            citation_count,
        } => {
            assert_eq!(subject, "Weekly EdTech Digest: AI Policy Shifts");
            assert_eq!(recipient, "recipient@example.com");
            assert_eq!(word_count, 500);
            assert_eq!(citation_count, 4);
        }
        other => panic!("应为 Sent，实际: {:?}", other),
    }

    // 合成恰好调用一次，收到3篇文章、0个失败
    assert_eq!(*generator.synthesize_calls.lock().unwrap(), vec![(3, 0)]);
    assert_eq!(generator.theme_calls.load(Ordering::SeqCst), 1);
    assert_eq!(mailer.sent.lock().unwrap().len(), 1);
}

/// 全部抓取失败 → NoArticles，合成/主题/发送均未被调用
#[tokio::test]
async fn test_all_fetches_fail_aborts_early() {
    let generator = Arc::new(FakeGenerator::new(digest_text(500, 4)));
    let mailer = Arc::new(FakeMailer::new(false));
    let flow = DigestFlow::with_services(
        Arc::new(FakeFetcher),
        generator.clone(),
        mailer.clone(),
    );

    let outcome = flow
        .run(&urls(&["https://bad.example/1", "https://bad.example/2"]))
        .await
        .unwrap();

    assert!(matches!(outcome, RunOutcome::NoArticles));
    assert!(generator.synthesize_calls.lock().unwrap().is_empty());
    assert_eq!(generator.theme_calls.load(Ordering::SeqCst), 0);
    assert!(mailer.sent.lock().unwrap().is_empty());
}

/// 部分抓取失败时，失败数传入合成器
#[tokio::test]
async fn test_partial_failures_passed_to_synthesizer() {
    let generator = Arc::new(FakeGenerator::new(digest_text(450, 3)));
    let mailer = Arc::new(FakeMailer::new(false));
    let flow = DigestFlow::with_services(
        Arc::new(FakeFetcher),
        generator.clone(),
        mailer.clone(),
    );

    let outcome = flow
        .run(&urls(&[
            "https://a.example",
            "https://bad.example",
            "https://c.example",
        ]))
        .await
        .unwrap();

    assert!(matches!(outcome, RunOutcome::Sent { .. }));
    assert_eq!(*generator.synthesize_calls.lock().unwrap(), vec![(2, 1)]);
}

/// 摘要过短 → QualityRejected，带预览和问题列表，不发送
#[tokio::test]
async fn test_quality_rejection_keeps_preview() {
    let generator = Arc::new(FakeGenerator::new(digest_text(100, 4)));
    let mailer = Arc::new(FakeMailer::new(false));
    let flow = DigestFlow::with_services(
        Arc::new(FakeFetcher),
        generator.clone(),
        mailer.clone(),
    );

    let outcome = flow.run(&urls(&["https://a.example"])).await.unwrap();

    match outcome {
        RunOutcome::QualityRejected { preview, issues } => {
            assert!(!preview.is_empty());
            // 预览最多500字符（截断时附省略号）
            assert!(preview.chars().count() <= 503);
            assert_eq!(issues.len(), 1);
            assert!(issues[0].contains("Word count out of range: 100"));
        }
        other => panic!("应为 QualityRejected，实际: {:?}", other),
    }

    // 质检失败后不再提取主题、不发送
    assert_eq!(generator.theme_calls.load(Ordering::SeqCst), 0);
    assert!(mailer.sent.lock().unwrap().is_empty());
}

/// 发送失败 → DeliveryFailed，摘要全文可取回，不丢失
#[tokio::test]
async fn test_delivery_failure_retains_full_digest() {
    let text = digest_text(500, 4);
    let generator = Arc::new(FakeGenerator::new(text.clone()));
    let mailer = Arc::new(FakeMailer::new(true));
    let flow = DigestFlow::with_services(
        Arc::new(FakeFetcher),
        generator.clone(),
        mailer.clone(),
    );

    let outcome = flow
        .run(&urls(&["https://a.example", "https://b.example", "https://c.example"]))
        .await
        .unwrap();

    match outcome {
        RunOutcome::DeliveryFailed { digest, error } => {
            assert_eq!(digest, text);
            assert!(error.contains("authentication failed"));
        }
        other => panic!("应为 DeliveryFailed，实际: {:?}", other),
    }
}

/// 占位符摘要被拒，且大小写不敏感
#[tokio::test]
async fn test_placeholder_digest_rejected() {
    let mut text = digest_text(498, 4);
    text.push_str(" contains Placeholder text");

    let generator = Arc::new(FakeGenerator::new(text));
    let mailer = Arc::new(FakeMailer::new(false));
    let flow = DigestFlow::with_services(Arc::new(FakeFetcher), generator, mailer.clone());

    let outcome = flow
        .run(&urls(&["https://a.example", "https://b.example", "https://c.example"]))
        .await
        .unwrap();

    match outcome {
        RunOutcome::QualityRejected { issues, .. } => {
            assert!(issues.iter().any(|i| i.contains("PLACEHOLDER")));
        }
        other => panic!("应为 QualityRejected，实际: {:?}", other),
    }
    assert!(mailer.sent.lock().unwrap().is_empty());
}
