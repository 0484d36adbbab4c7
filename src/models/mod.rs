pub mod article;
pub mod digest;
pub mod loaders;

pub use article::{Article, ArticleBatch, FailedFetch, FetchError, FetchResult};
pub use digest::{Digest, QualityReport};
pub use loaders::load_article_urls;
