use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// 配置错误
    Config(ConfigError),
    /// LLM 服务错误
    Llm(LlmError),
    /// 邮件发送错误
    Mail(MailError),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "配置错误: {}", e),
            AppError::Llm(e) => write!(f, "LLM错误: {}", e),
            AppError::Mail(e) => write!(f, "邮件错误: {}", e),
            AppError::Other(msg) => write!(f, "错误: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(e) => Some(e),
            AppError::Llm(e) => Some(e),
            AppError::Mail(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// 配置错误
#[derive(Debug)]
pub enum ConfigError {
    /// LLM API Key 未设置
    MissingLlmApiKey,
    /// 邮箱应用密码未设置
    MissingMailPassword,
    /// 环境变量解析失败
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingLlmApiKey => {
                write!(f, "LLM_API_KEY 未设置，请执行: export LLM_API_KEY=sk-...")
            }
            ConfigError::MissingMailPassword => {
                write!(
                    f,
                    "MAIL_APP_PASSWORD 未设置，请执行: export MAIL_APP_PASSWORD=..."
                )
            }
            ConfigError::EnvVarParseFailed {
                var_name,
                value,
                expected_type,
            } => {
                write!(
                    f,
                    "环境变量 {} 解析失败: 值 '{}' 无法转换为 {}",
                    var_name, value, expected_type
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// LLM 服务错误
#[derive(Debug)]
pub enum LlmError {
    /// API 调用失败
    ApiCallFailed {
        model: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 返回结果为空
    EmptyResponse {
        model: String,
    },
    /// 返回内容为空
    EmptyContent {
        model: String,
    },
    /// 请求构建失败
    RequestBuildFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::ApiCallFailed { model, source } => {
                write!(f, "LLM API调用失败 (模型: {}): {}", model, source)
            }
            LlmError::EmptyResponse { model } => {
                write!(f, "LLM返回结果为空 (模型: {})", model)
            }
            LlmError::EmptyContent { model } => {
                write!(f, "LLM返回内容为空 (模型: {})", model)
            }
            LlmError::RequestBuildFailed { source } => {
                write!(f, "LLM请求构建失败: {}", source)
            }
        }
    }
}

impl std::error::Error for LlmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LlmError::ApiCallFailed { source, .. } | LlmError::RequestBuildFailed { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 邮件发送错误
#[derive(Debug)]
pub enum MailError {
    /// 邮箱地址解析失败
    InvalidMailbox {
        address: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// MIME 消息构建失败
    MessageBuildFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// SMTP 传输失败（认证失败、连接失败等）
    TransportFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for MailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MailError::InvalidMailbox { address, source } => {
                write!(f, "邮箱地址无效 ({}): {}", address, source)
            }
            MailError::MessageBuildFailed { source } => {
                write!(f, "邮件消息构建失败: {}", source)
            }
            MailError::TransportFailed { source } => {
                write!(f, "SMTP发送失败: {}", source)
            }
        }
    }
}

impl std::error::Error for MailError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MailError::InvalidMailbox { source, .. }
            | MailError::MessageBuildFailed { source }
            | MailError::TransportFailed { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
        }
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建LLM API调用错误
    pub fn llm_api_failed(
        model: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Llm(LlmError::ApiCallFailed {
            model: model.into(),
            source: Box::new(source),
        })
    }

    /// 创建邮箱地址解析错误
    pub fn invalid_mailbox(
        address: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Mail(MailError::InvalidMailbox {
            address: address.into(),
            source: Box::new(source),
        })
    }

    /// 创建SMTP传输错误
    pub fn mail_transport_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        AppError::Mail(MailError::TransportFailed {
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
