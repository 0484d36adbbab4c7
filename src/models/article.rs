//! 文章抓取结果数据模型
//!
//! 每个URL的抓取结果要么是正文内容，要么是一个已分类的失败原因，
//! 二者必居其一（由 Result 类型保证）。

use std::fmt;

/// 抓取失败的分类原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// 请求超时
    Timeout,
    /// HTTP 状态码错误（404/403/付费墙等）
    HttpStatus(u16),
    /// 其他传输或解析错误
    Other(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Timeout => write!(f, "Timeout"),
            FetchError::HttpStatus(code) => write!(f, "HTTP {}", code),
            FetchError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

/// 单个URL的抓取结果
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub url: String,
    /// 成功时为截断后的正文内容，失败时为分类原因
    pub outcome: Result<String, FetchError>,
}

impl FetchResult {
    /// 创建成功结果
    pub fn fetched(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            outcome: Ok(content.into()),
        }
    }

    /// 创建失败结果
    pub fn failed(url: impl Into<String>, error: FetchError) -> Self {
        Self {
            url: url.into(),
            outcome: Err(error),
        }
    }
}

/// 抓取成功的文章
#[derive(Debug, Clone)]
pub struct Article {
    pub url: String,
    pub content: String,
}

/// 抓取失败的记录
#[derive(Debug, Clone)]
pub struct FailedFetch {
    pub url: String,
    pub error: FetchError,
}

/// 一次运行的文章批次
///
/// 两个列表均保持输入URL的相对顺序；每个输入URL恰好出现在其中一个列表中。
#[derive(Debug, Default)]
pub struct ArticleBatch {
    pub articles: Vec<Article>,
    pub failed: Vec<FailedFetch>,
}

impl ArticleBatch {
    /// 按输入顺序收入一个抓取结果
    pub fn push(&mut self, result: FetchResult) {
        match result.outcome {
            Ok(content) => self.articles.push(Article {
                url: result.url,
                content,
            }),
            Err(error) => self.failed.push(FailedFetch {
                url: result.url,
                error,
            }),
        }
    }

    /// 成功文章数
    pub fn article_count(&self) -> usize {
        self.articles.len()
    }

    /// 失败数
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// 是否没有任何成功文章
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_partitions_every_url_exactly_once() {
        let results = vec![
            FetchResult::fetched("https://a.example/1", "body a"),
            FetchResult::failed("https://b.example/2", FetchError::Timeout),
            FetchResult::fetched("https://c.example/3", "body c"),
            FetchResult::failed("https://d.example/4", FetchError::HttpStatus(404)),
        ];
        let input_urls: Vec<String> = results.iter().map(|r| r.url.clone()).collect();

        let mut batch = ArticleBatch::default();
        for result in results {
            batch.push(result);
        }

        assert_eq!(batch.article_count() + batch.failed_count(), input_urls.len());
        for url in &input_urls {
            let in_articles = batch.articles.iter().filter(|a| &a.url == url).count();
            let in_failed = batch.failed.iter().filter(|f| &f.url == url).count();
            assert_eq!(in_articles + in_failed, 1, "URL {} 应恰好出现一次", url);
        }
    }

    #[test]
    fn test_batch_preserves_relative_order() {
        let mut batch = ArticleBatch::default();
        batch.push(FetchResult::fetched("u1", "c1"));
        batch.push(FetchResult::failed("u2", FetchError::Timeout));
        batch.push(FetchResult::fetched("u3", "c3"));
        batch.push(FetchResult::failed("u4", FetchError::Other("dns".into())));

        let article_urls: Vec<&str> = batch.articles.iter().map(|a| a.url.as_str()).collect();
        let failed_urls: Vec<&str> = batch.failed.iter().map(|f| f.url.as_str()).collect();
        assert_eq!(article_urls, vec!["u1", "u3"]);
        assert_eq!(failed_urls, vec!["u2", "u4"]);
    }

    #[test]
    fn test_fetch_error_display() {
        assert_eq!(FetchError::Timeout.to_string(), "Timeout");
        assert_eq!(FetchError::HttpStatus(403).to_string(), "HTTP 403");
        assert_eq!(
            FetchError::Other("connection refused".into()).to_string(),
            "connection refused"
        );
    }
}
