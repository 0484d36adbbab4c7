//! # EdTech Digest
//!
//! 一个用于每周 EdTech 新闻聚合与摘要推送的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 纯数据类型，不含业务逻辑
//! - `FetchResult` / `ArticleBatch` - 每个URL的抓取结果与批次划分
//! - `Digest` / `QualityReport` - 摘要及其质检报告
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，每个服务只处理单项能力
//! - `FetchService` - 限时抓取单个URL并分类失败原因
//! - `LlmService` - 摘要合成与主题提取能力
//! - `quality_service` - 纯函数质检能力
//! - `MailService` - HTML邮件发送能力
//! - 三个外部边界（抓取 / 生成 / 发送）各自收窄为能力接口，测试可替换
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次运行"的完整处理流程
//! - `DigestFlow` - 流程编排（抓取 → 合成 → 质检 → 主题 → 发送）
//! - `RunOutcome` - 四种终端状态
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 应用生命周期、URL列表加载、最终横幅输出

pub mod config;
pub mod error;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Article, ArticleBatch, Digest, FetchError, FetchResult, QualityReport};
pub use orchestrator::App;
pub use services::{ArticleFetcher, DigestGenerator, DigestMailer};
pub use workflow::{DigestFlow, RunOutcome};
