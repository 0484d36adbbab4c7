//! 邮件发送服务 - 业务能力层
//!
//! 只负责"把摘要发给固定收件人"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `lettre` crate 的异步 SMTP 传输
//! - SMTPS（隐式TLS）单次会话发送
//! - multipart/alternative：纯文本 + 内联样式的HTML
//!
//! 失败模式：
//! - 应用密码未设置或错误
//! - SMTP 连接问题
//! - 收件人地址被拒绝

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, ConfigError, MailError};
use crate::services::traits::DigestMailer;

/// 邮件主题模板的固定前缀
const SUBJECT_PREFIX: &str = "Weekly EdTech Digest";

/// 邮件发送服务
///
/// 职责：
/// - 构建两部分MIME消息（纯文本 + HTML）
/// - 通过一次加密SMTP会话发送给固定收件人
/// - 传输失败返回分类错误而不是panic，摘要内容不丢失
pub struct MailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: String,
    recipient: String,
}

impl MailService {
    /// 创建新的邮件发送服务
    ///
    /// 应用密码未配置属于配置错误，在任何连接尝试之前报出。
    pub fn new(config: &Config) -> AppResult<Self> {
        let password = config
            .mail_app_password
            .as_ref()
            .ok_or(AppError::Config(ConfigError::MissingMailPassword))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| {
                AppError::Mail(MailError::TransportFailed {
                    source: Box::new(e),
                })
            })?
            .credentials(Credentials::new(
                config.sender_address.clone(),
                password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            sender: config.sender_address.clone(),
            recipient: config.recipient_address.clone(),
        })
    }

    /// 生成邮件主题
    pub fn subject_for(theme: &str) -> String {
        format!("{}: {}", SUBJECT_PREFIX, theme)
    }

    /// 将摘要正文包装为带内联样式的HTML文档
    ///
    /// 段落分隔（空行）转为 </p><p>，单个换行转为 <br>。
    fn render_html_body(digest_text: &str) -> String {
        let html_digest = digest_text.replace("\n\n", "</p><p>").replace('\n', "<br>");
        let date_line = chrono::Local::now().format("%B %d, %Y");

        format!(
            r#"
    <html>
      <body style="font-family: Georgia, serif; font-size: 16px; line-height: 1.6; color: #333; max-width: 650px; margin: 0 auto; padding: 20px;">
        <h2 style="color: #2c5282; border-bottom: 2px solid #2c5282; padding-bottom: 10px;">
          Weekly EdTech Digest
        </h2>
        <p style="color: #666; font-size: 14px; font-style: italic;">
          {}
        </p>
        <div style="margin-top: 20px;">
          <p>{}</p>
        </div>
        <hr style="margin-top: 40px; border: none; border-top: 1px solid #ddd;">
        <p style="font-size: 12px; color: #999; text-align: center;">
          EdTech Digest Agent · Powered by Claude
        </p>
      </body>
    </html>
    "#,
            date_line, html_digest
        )
    }

    /// 构建两部分MIME消息
    fn build_message(&self, digest_text: &str, theme: &str) -> AppResult<Message> {
        let from: Mailbox = self
            .sender
            .parse()
            .map_err(|e| AppError::invalid_mailbox(&self.sender, e))?;
        let to: Mailbox = self
            .recipient
            .parse()
            .map_err(|e| AppError::invalid_mailbox(&self.recipient, e))?;

        // Date 头由 lettre 在构建时自动填充
        Message::builder()
            .from(from)
            .to(to)
            .subject(Self::subject_for(theme))
            .multipart(
                MultiPart::alternative()
                    .singlepart(SinglePart::plain(digest_text.to_string()))
                    .singlepart(SinglePart::html(Self::render_html_body(digest_text))),
            )
            .map_err(|e| {
                AppError::Mail(MailError::MessageBuildFailed {
                    source: Box::new(e),
                })
            })
    }
}

#[async_trait]
impl DigestMailer for MailService {
    async fn send(&self, digest_text: &str, theme: &str) -> AppResult<()> {
        info!("📧 正在发送邮件至 {}...", self.recipient);

        let message = self.build_message(digest_text, theme)?;

        match self.transport.send(message).await {
            Ok(_) => {
                info!("✓ 邮件发送成功");
                Ok(())
            }
            Err(e) => {
                warn!("❌ 邮件发送失败: {}", e);
                Err(AppError::mail_transport_failed(e))
            }
        }
    }

    fn recipient(&self) -> &str {
        &self.recipient
    }
}
