use std::collections::HashMap;

use crate::error::SearchError;
use crate::field::AddressField;
use crate::query::QuerySpec;

/// 检索后端返回的一条候选地址
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateRecord {
    pub score: f32,
    pub fields: HashMap<AddressField, String>,
}

impl CandidateRecord {
    pub fn new(score: f32) -> Self {
        Self {
            score,
            fields: HashMap::new(),
        }
    }

    pub fn with(mut self, field: AddressField, value: impl Into<String>) -> Self {
        self.fields.insert(field, value.into());
        self
    }

    /// 字段值，不存在时为空字符串
    pub fn get(&self, field: AddressField) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn postal_code(&self) -> &str {
        self.get(AddressField::ZipNo)
    }

    pub fn building_name(&self) -> &str {
        self.get(AddressField::BuildNm)
    }

    /// 산 번지标记，缺失视为否
    pub fn is_mountain_lot(&self) -> bool {
        let value = self.get(AddressField::SanYn);
        !value.is_empty() && value != "0"
    }
}

/// 地址检索服务
///
/// 实现方负责分词、模糊匹配和打分，按分数从高到低返回不超过 `limit` 条、
/// 分数不低于 `min_score` 的候选。
pub trait SearchService {
    fn search(
        &self,
        query: &QuerySpec,
        limit: usize,
        min_score: f32,
    ) -> Result<Vec<CandidateRecord>, SearchError>;
}

impl<S: SearchService + ?Sized> SearchService for &S {
    fn search(
        &self,
        query: &QuerySpec,
        limit: usize,
        min_score: f32,
    ) -> Result<Vec<CandidateRecord>, SearchError> {
        (**self).search(query, limit, min_score)
    }
}

impl<S: SearchService + ?Sized> SearchService for Box<S> {
    fn search(
        &self,
        query: &QuerySpec,
        limit: usize,
        min_score: f32,
    ) -> Result<Vec<CandidateRecord>, SearchError> {
        (**self).search(query, limit, min_score)
    }
}
