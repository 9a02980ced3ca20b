use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::assemble::MAX_RESULTS;
use crate::error::ConfigError;

/// 校正器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectorConfig {
    /// 低于此分数的候选丢弃
    pub min_score: f32,
    /// 每个输入最多返回的候选数，上限为 3
    pub max_results: usize,
}

impl Default for CorrectorConfig {
    fn default() -> Self {
        Self {
            min_score: 5.0,
            max_results: MAX_RESULTS,
        }
    }
}

/// Elasticsearch 连接配置，只在构造客户端时使用一次
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElasticConfig {
    pub url: String,
    pub index: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_on_timeout: bool,
    pub min_score: f32,
}

impl Default for ElasticConfig {
    fn default() -> Self {
        Self {
            url: "http://elasticsearch:9200".to_string(),
            index: "addr".to_string(),
            timeout_secs: 30,
            max_retries: 10,
            retry_on_timeout: true,
            min_score: 20.0,
        }
    }
}

/// 配置文件的顶层结构
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub corrector: CorrectorConfig,
    pub elastic: ElasticConfig,
}

impl AppConfig {
    /// 从 TOML 文本解析，缺省的项使用默认值
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// 读取配置文件
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }
}
