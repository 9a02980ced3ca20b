use thiserror::Error;

/// 地址校正过程中可能出现的错误
#[derive(Debug, Error)]
pub enum CorrectError {
    /// 输入为空或只有空白字符
    #[error("empty input address")]
    InvalidInput,

    /// 检索后端不可用或返回失败
    #[error("search service failed: {0}")]
    Search(#[from] SearchError),
}

/// 检索后端错误
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("index error: {0}")]
    Index(#[from] tantivy::TantivyError),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode search response: {0}")]
    Decode(String),
}

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
