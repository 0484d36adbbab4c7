//! 摘要数据模型

/// 一次运行生成的叙事摘要
///
/// 词数和引用数在构造时派生，此后只读。
#[derive(Debug, Clone)]
pub struct Digest {
    pub text: String,
    pub word_count: usize,
    pub citation_count: usize,
}

impl Digest {
    pub fn new(text: String) -> Self {
        let word_count = text.split_whitespace().count();
        // 引用计数按 "http" 子串出现次数统计（与质检规则保持一致）
        let citation_count = text.matches("http").count();
        Self {
            text,
            word_count,
            citation_count,
        }
    }
}

/// 质检报告
///
/// `passed` 为真当且仅当 `issues` 为空。
#[derive(Debug, Clone)]
pub struct QualityReport {
    pub passed: bool,
    pub issues: Vec<String>,
}

impl QualityReport {
    pub fn new(issues: Vec<String>) -> Self {
        Self {
            passed: issues.is_empty(),
            issues,
        }
    }
}
