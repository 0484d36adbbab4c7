//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责应用生命周期和终端状态汇报，是整个系统的"指挥中心"。
//!
//! ### `app` - 应用编排器
//! - 管理应用生命周期（初始化、运行）
//! - 加载文章URL列表（配置文件优先，默认列表兜底）
//! - 委托 workflow::DigestFlow 执行一次完整运行
//! - 输出各阶段的控制台轨迹和最终横幅
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (一次运行的生命周期)
//!     ↓
//! workflow::DigestFlow (流程状态机)
//!     ↓
//! services (能力层：fetch / llm / quality / mail)
//!     ↓
//! models (数据：FetchResult / ArticleBatch / Digest / QualityReport)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：App 管生命周期和汇报，DigestFlow 管流程
//! 2. **向下依赖**：编排层 → workflow → services → models
//! 3. **无业务逻辑**：只做调度和输出，不做具体业务判断
//! 4. **内容不丢失**：任何异常路径都把摘要（或预览）打印出来

pub mod app;

pub use app::App;
