use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

/// articles.toml 文件结构
///
/// ```toml
/// urls = [
///     "https://example.com/article-1",
///     "https://example.com/article-2",
/// ]
/// ```
#[derive(Debug, Deserialize)]
struct ArticleList {
    urls: Vec<String>,
}

/// 从 TOML 文件加载本周的文章URL列表
///
/// 文件不存在时返回 `Ok(None)`（调用方回退到配置中的默认列表）；
/// 文件存在但无法解析时返回错误。
pub async fn load_article_urls(path: &str) -> Result<Option<Vec<String>>> {
    let file = Path::new(path);
    if !file.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(file)
        .await
        .with_context(|| format!("无法读取URL列表文件: {}", path))?;

    let list: ArticleList =
        toml::from_str(&content).with_context(|| format!("无法解析URL列表文件: {}", path))?;

    tracing::info!("已从 {} 加载 {} 个文章URL", path, list.urls.len());

    Ok(Some(list.urls))
}
