/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 本周待抓取的文章URL列表
    pub article_urls: Vec<String>,
    /// 文章URL列表的TOML配置文件路径（存在时优先于默认列表）
    pub urls_file: String,
    /// 单篇文章抓取超时（秒）
    pub fetch_timeout_secs: u64,
    /// 单篇文章内容截断上限（字符数）
    pub content_cap: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- LLM 配置 ---
    pub llm_api_key: Option<String>,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    // --- 邮件配置 ---
    pub smtp_host: String,
    pub sender_address: String,
    pub mail_app_password: Option<String>,
    pub recipient_address: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            article_urls: vec![
                "https://marketbrief.edweek.org/product-development/as-ai-moves-quickly-lego-education-bets-on-foundations-over-fomo/2026/02".to_string(),
                "https://marketbrief.edweek.org/strategy-operations/longtime-ed-tech-veteran-on-new-role-urgent-literary-needs-in-k-12/2026/01".to_string(),
                "https://www.edweek.org/technology/not-meant-for-children-adults-favor-age-restrictions-on-social-media-ai/2026/02".to_string(),
                "https://www.edweek.org/technology/microsoft-joins-other-companies-in-trying-to-fill-ai-training-gap-in-schools/2026/02".to_string(),
                "https://www.edsurge.com/news/2026-02-06-new-report-card-grades-states-on-laws-banning-phones-in-schools".to_string(),
                "https://techcrunch.com/2026/01/21/language-learning-marketplace-preplys-unicorn-status-embodies-ukrainian-resilience/".to_string(),
                "https://techcrunch.com/2025/12/17/coursera-and-udemy-enter-a-merger-agreement-valued-at-around-2-5b/".to_string(),
            ],
            urls_file: "articles.toml".to_string(),
            fetch_timeout_secs: 10,
            content_cap: 5000,
            verbose_logging: false,
            llm_api_key: None,
            llm_api_base_url: "https://api.anthropic.com/v1".to_string(),
            llm_model_name: "claude-sonnet-4-20250514".to_string(),
            smtp_host: "smtp.gmail.com".to_string(),
            sender_address: "serenaetang@gmail.com".to_string(),
            mail_app_password: None,
            recipient_address: "serenatang@microsoft.com".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            article_urls: std::env::var("ARTICLE_URLS")
                .ok()
                .map(|v| v.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
                .unwrap_or(default.article_urls),
            urls_file: std::env::var("ARTICLE_URLS_FILE").unwrap_or(default.urls_file),
            fetch_timeout_secs: std::env::var("FETCH_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.fetch_timeout_secs),
            content_cap: std::env::var("CONTENT_CAP").ok().and_then(|v| v.parse().ok()).unwrap_or(default.content_cap),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            llm_api_key: std::env::var("LLM_API_KEY").ok().filter(|v| !v.is_empty()),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            smtp_host: std::env::var("SMTP_HOST").unwrap_or(default.smtp_host),
            sender_address: std::env::var("SENDER_ADDRESS").unwrap_or(default.sender_address),
            mail_app_password: std::env::var("MAIL_APP_PASSWORD").ok().filter(|v| !v.is_empty()),
            recipient_address: std::env::var("RECIPIENT_ADDRESS").unwrap_or(default.recipient_address),
        }
    }
}
