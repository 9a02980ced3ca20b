//! Elasticsearch 检索后端
//!
//! 索引名默认 `addr`，字段名为大写（`SIDO`, `DORO`, `BUILD_NO1` ...）。

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::config::ElasticConfig;
use crate::error::SearchError;
use crate::field::{spaced_chars, AddressField};
use crate::query::QuerySpec;
use crate::search::{CandidateRecord, SearchService};

fn object(key: String, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key, value);
    Value::Object(map)
}

/// 生成 `bool` 查询：精确过滤放在 `filter`，模糊条件放在 `should`
pub fn render_query(spec: &QuerySpec, limit: usize, min_score: f32) -> Value {
    let filters: Vec<Value> = spec
        .filters
        .iter()
        .map(|(field, value)| object("term".to_string(), object(field.elastic_name(), json!(value))))
        .collect();

    let should: Vec<Value> = spec
        .should
        .iter()
        .map(|clause| {
            let text = match clause.field {
                AddressField::FullAddr => spaced_chars(&clause.text),
                _ => clause.text.clone(),
            };
            let options = json!({
                "query": text,
                "fuzziness": "AUTO",
                "boost": clause.weight,
            });
            object("match".to_string(), object(clause.field.elastic_name(), options))
        })
        .collect();

    let mut bool_query = Map::new();
    if !filters.is_empty() {
        bool_query.insert("filter".to_string(), Value::Array(filters));
    }
    if !should.is_empty() {
        bool_query.insert("should".to_string(), Value::Array(should));
    }

    json!({
        "query": { "bool": bool_query },
        "size": limit,
        "min_score": min_score,
    })
}

fn source_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// 解析 `hits.hits[]`，保持返回顺序
pub fn parse_hits(body: &Value) -> Result<Vec<CandidateRecord>, SearchError> {
    let hits = body
        .pointer("/hits/hits")
        .and_then(Value::as_array)
        .ok_or_else(|| SearchError::Decode("missing hits.hits".to_string()))?;

    hits.iter()
        .map(|hit| {
            let score = hit.get("_score").and_then(Value::as_f64).unwrap_or(0.0) as f32;
            let source = hit
                .get("_source")
                .and_then(Value::as_object)
                .ok_or_else(|| SearchError::Decode("hit without _source".to_string()))?;

            let mut record = CandidateRecord::new(score);
            for (name, value) in source {
                if let (Some(field), Some(value)) =
                    (AddressField::from_elastic_name(name), source_value(value))
                {
                    record.fields.insert(field, value);
                }
            }
            Ok(record)
        })
        .collect()
}

fn is_retryable_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT
    )
}

/// Elasticsearch HTTP 客户端，超时和重试在构造时确定
pub struct ElasticSearchService {
    client: Client,
    config: ElasticConfig,
}

impl ElasticSearchService {
    pub fn new(config: ElasticConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ElasticConfig {
        &self.config
    }

    fn search_url(&self) -> String {
        format!(
            "{}/{}/_search",
            self.config.url.trim_end_matches('/'),
            self.config.index
        )
    }

    fn retryable_error(&self, error: &reqwest::Error) -> bool {
        error.is_connect() || (error.is_timeout() && self.config.retry_on_timeout)
    }

    fn post(&self, body: &Value) -> Result<Value, SearchError> {
        let url = self.search_url();
        let mut attempt = 0;
        loop {
            let last_attempt = attempt >= self.config.max_retries;
            match self.client.post(&url).json(body).send() {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response.json()?);
                    }
                    if !is_retryable_status(status) || last_attempt {
                        let body = response.text().unwrap_or_default();
                        return Err(SearchError::Status {
                            status: status.as_u16(),
                            body,
                        });
                    }
                    warn!(attempt, status = status.as_u16(), "elasticsearch unavailable, retrying");
                }
                Err(e) if self.retryable_error(&e) && !last_attempt => {
                    warn!(attempt, error = %e, "elasticsearch request failed, retrying");
                }
                Err(e) => return Err(e.into()),
            }
            attempt += 1;
        }
    }
}

impl SearchService for ElasticSearchService {
    fn search(
        &self,
        spec: &QuerySpec,
        limit: usize,
        min_score: f32,
    ) -> Result<Vec<CandidateRecord>, SearchError> {
        if spec.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }
        let body = render_query(spec, limit, min_score);
        debug!(query = %body, "elasticsearch query");
        let response = self.post(&body)?;
        parse_hits(&response)
    }
}
