pub mod fetch_service;
pub mod llm_service;
pub mod mail_service;
pub mod quality_service;
pub mod traits;

pub use fetch_service::FetchService;
pub use llm_service::{LlmService, DEFAULT_THEME};
pub use mail_service::MailService;
pub use quality_service::evaluate;
pub use traits::{ArticleFetcher, DigestGenerator, DigestMailer};
