//! 摘要质检服务 - 业务能力层
//!
//! 纯函数，无副作用、无外部调用。三项检查相互独立，一次返回全部问题，
//! 不短路，便于一次性看到所有违规项。

use crate::models::{Digest, QualityReport};

/// 词数下限（含）
const WORD_COUNT_MIN: usize = 400;
/// 词数上限（含）
const WORD_COUNT_MAX: usize = 700;
/// 引用数基准线（文章不足3篇时按文章数放宽）
const CITATION_BAR: usize = 3;
/// 禁止出现的占位符（大小写不敏感）
const PLACEHOLDERS: [&str; 4] = ["[ARTICLE]", "[INSERT]", "[TODO]", "PLACEHOLDER"];

/// 对摘要运行质检
///
/// # 参数
/// - `digest`: 待检摘要（词数、引用数已派生）
/// - `article_count`: 本次成功抓取的文章数，决定引用数门槛
pub fn evaluate(digest: &Digest, article_count: usize) -> QualityReport {
    let mut issues = Vec::new();

    // 检查 1: 词数范围
    if digest.word_count < WORD_COUNT_MIN || digest.word_count > WORD_COUNT_MAX {
        issues.push(format!(
            "Word count out of range: {} (expected {}-{})",
            digest.word_count, WORD_COUNT_MIN, WORD_COUNT_MAX
        ));
    }

    // 检查 2: 引用数量（文章少于3篇时门槛相应降低）
    let required = CITATION_BAR.min(article_count);
    if digest.citation_count < required {
        issues.push(format!(
            "Too few citations: {} (expected at least {})",
            digest.citation_count, required
        ));
    }

    // 检查 3: 占位符文本
    let lowered = digest.text.to_lowercase();
    for placeholder in PLACEHOLDERS {
        if lowered.contains(&placeholder.to_lowercase()) {
            issues.push(format!("Contains placeholder text: {}", placeholder));
        }
    }

    QualityReport::new(issues)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 生成指定词数、指定引用数、无占位符的摘要文本
    fn make_digest(word_count: usize, citation_count: usize) -> Digest {
        assert!(word_count >= citation_count);
        let mut words: Vec<String> = Vec::with_capacity(word_count);
        for i in 0..citation_count {
            words.push(format!("https://example.com/{}", i));
        }
        for i in citation_count..word_count {
            words.push(format!("word{}", i));
        }
        Digest::new(words.join(" "))
    }

    #[test]
    fn test_word_count_boundaries() {
        // 400 和 700 恰好通过
        assert!(evaluate(&make_digest(400, 3), 5).passed);
        assert!(evaluate(&make_digest(700, 3), 5).passed);

        // 399 和 701 各产生且仅产生一条词数问题
        let low = evaluate(&make_digest(399, 3), 5);
        assert!(!low.passed);
        assert_eq!(low.issues.len(), 1);
        assert!(low.issues[0].contains("399"));

        let high = evaluate(&make_digest(701, 3), 5);
        assert!(!high.passed);
        assert_eq!(high.issues.len(), 1);
        assert!(high.issues[0].contains("701"));
    }

    #[test]
    fn test_citation_bar_with_many_articles() {
        // 5篇文章时门槛为 min(3,5)=3，2处引用不通过
        let report = evaluate(&make_digest(500, 2), 5);
        assert!(!report.passed);
        assert_eq!(report.issues.len(), 1);
        assert!(report.issues[0].contains("Too few citations: 2"));
        assert!(report.issues[0].contains("at least 3"));
    }

    #[test]
    fn test_citation_bar_relaxes_with_few_articles() {
        // 1篇文章时门槛为 min(3,1)=1，1处引用即通过
        assert!(evaluate(&make_digest(500, 1), 1).passed);
    }

    #[test]
    fn test_placeholder_detection_case_insensitive() {
        let base = make_digest(498, 3).text;

        let lower = evaluate(&Digest::new(format!("{} Placeholder here", base)), 5);
        let upper = evaluate(&Digest::new(format!("{} PLACEHOLDER here", base)), 5);
        assert!(!lower.passed);
        assert!(!upper.passed);
        assert_eq!(lower.issues, upper.issues);

        let bracketed = evaluate(&Digest::new(format!("{} see [Article] two", base)), 5);
        assert!(!bracketed.passed);
        assert!(bracketed.issues[0].contains("[ARTICLE]"));
    }

    #[test]
    fn test_all_checks_reported_independently() {
        // 词数不足 + 引用不足 + 两个占位符 = 4 条问题，一次全部报出
        let digest = Digest::new("[TODO] short placeholder text".to_string());
        let report = evaluate(&digest, 5);
        assert!(!report.passed);
        assert_eq!(report.issues.len(), 4);
    }

    #[test]
    fn test_pure_function_deterministic() {
        let digest = make_digest(500, 4);
        let first = evaluate(&digest, 3);
        let second = evaluate(&digest, 3);
        assert_eq!(first.passed, second.passed);
        assert_eq!(first.issues, second.issues);
        assert_eq!(first.passed, first.issues.is_empty());
    }
}
