use std::collections::HashMap;
use std::path::Path;

use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, BoostQuery, FuzzyTermQuery, Occur, Query, TermQuery};
use tantivy::schema::*;
use tantivy::tokenizer::TokenStream;
use tantivy::{Index, IndexReader, ReloadPolicy, TantivyDocument};
use tracing::{debug, info};

use crate::csv_loader::AddressRecord;
use crate::error::SearchError;
use crate::field::{spaced_chars, AddressField};
use crate::query::{FuzzyClause, QuerySpec};
use crate::search::{CandidateRecord, SearchService};

/// 按词长决定允许的编辑次数（与 Elasticsearch 的 "AUTO" 相同）
fn auto_fuzziness(token: &str) -> u8 {
    match token.chars().count() {
        0..=2 => 0,
        3..=5 => 1,
        _ => 2,
    }
}

/// 整值精确匹配的字段，使用 raw 分词器
fn is_raw_field(field: AddressField) -> bool {
    matches!(
        field,
        AddressField::Sido
            | AddressField::ZipNo
            | AddressField::SanYn
            | AddressField::BuildNo1
            | AddressField::BuildNo2
            | AddressField::Zibun1
            | AddressField::Zibun2
            | AddressField::BuildNo
            | AddressField::Zibun
    )
}

fn build_schema() -> (Schema, HashMap<AddressField, Field>) {
    let mut schema_builder = Schema::builder();

    // 名称类字段使用默认分词器，存储词频和位置信息
    let text_indexing = TextFieldIndexing::default()
        .set_tokenizer("default")
        .set_index_option(IndexRecordOption::WithFreqsAndPositions);
    let text_options = TextOptions::default()
        .set_indexing_options(text_indexing)
        .set_stored();

    let fields = AddressField::ALL
        .into_iter()
        .map(|field| {
            let handle = if is_raw_field(field) {
                schema_builder.add_text_field(field.name(), STRING | STORED)
            } else {
                schema_builder.add_text_field(field.name(), text_options.clone())
            };
            (field, handle)
        })
        .collect();

    (schema_builder.build(), fields)
}

/// 基于 tantivy 的地址索引，实现 [`SearchService`]
pub struct AddressIndex {
    index: Index,
    reader: IndexReader,
    fields: HashMap<AddressField, Field>,
}

impl AddressIndex {
    /// 在内存中创建空索引
    pub fn new() -> anyhow::Result<Self> {
        let (schema, fields) = build_schema();
        Self::from_index(Index::create_in_ram(schema), fields)
    }

    /// 在目录中创建空索引
    pub fn create_in_dir<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let (schema, fields) = build_schema();
        Self::from_index(Index::create_in_dir(path, schema)?, fields)
    }

    /// 打开已存在的索引目录
    pub fn open_in_dir<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let index = Index::open_in_dir(path)?;
        let schema = index.schema();
        let fields = AddressField::ALL
            .into_iter()
            .map(|field| -> anyhow::Result<(AddressField, Field)> {
                Ok((field, schema.get_field(field.name())?))
            })
            .collect::<anyhow::Result<_>>()?;
        Self::from_index(index, fields)
    }

    fn from_index(index: Index, fields: HashMap<AddressField, Field>) -> anyhow::Result<Self> {
        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;

        Ok(Self {
            index,
            reader,
            fields,
        })
    }

    fn field(&self, field: AddressField) -> Field {
        self.fields[&field]
    }

    fn to_document(&self, record: &AddressRecord) -> TantivyDocument {
        let values = [
            (AddressField::ZipNo, record.zip_no.clone()),
            (AddressField::Sido, record.sido.clone()),
            (AddressField::Sigungu, record.sigungu.clone()),
            (AddressField::Eupmyun, record.eupmyun.clone()),
            (AddressField::Doro, record.doro.clone()),
            (AddressField::BuildNo1, record.build_no1.clone()),
            (AddressField::BuildNo2, record.build_no2.clone()),
            (AddressField::DongNm, record.dong_nm.clone()),
            (AddressField::Ri, record.ri.clone()),
            (AddressField::Zibun1, record.zibun1.clone()),
            (AddressField::Zibun2, record.zibun2.clone()),
            (AddressField::BuildNm, record.build_nm.clone()),
            (AddressField::SanYn, record.san_flag().to_string()),
            (AddressField::DefaultAddr, record.default_address()),
            (AddressField::FullAddr, spaced_chars(&record.full_text())),
            (AddressField::BuildNo, record.building_number()),
            (AddressField::Zibun, record.lot_number()),
        ];

        let mut doc = TantivyDocument::default();
        for (field, value) in values {
            let value = value.trim();
            if !value.is_empty() {
                doc.add_text(self.field(field), value);
            }
        }
        doc
    }

    /// 批量写入地址并提交
    pub fn add_records(&mut self, records: &[AddressRecord]) -> anyhow::Result<()> {
        let mut index_writer = self.index.writer(50_000_000)?;
        for record in records {
            index_writer.add_document(self.to_document(record))?;
        }
        index_writer.commit()?;
        info!(count = records.len(), "address records indexed");
        self.commit()
    }

    /// 提交更改并重新加载索引
    pub fn commit(&mut self) -> anyhow::Result<()> {
        self.reader.reload()?;
        Ok(())
    }

    /// 用字段自己的分词器切分文本
    fn tokens(&self, field: Field, text: &str) -> Result<Vec<String>, SearchError> {
        let mut analyzer = self.index.tokenizer_for_field(field)?;
        let mut stream = analyzer.token_stream(text);
        let mut tokens = Vec::new();
        while stream.advance() {
            tokens.push(stream.token().text.clone());
        }
        Ok(tokens)
    }

    /// 一个模糊条件：每个词一个 FuzzyTermQuery，整体乘以权重
    fn fuzzy_query(&self, clause: &FuzzyClause) -> Result<Option<Box<dyn Query>>, SearchError> {
        let field = self.field(clause.field);
        let text = match clause.field {
            AddressField::FullAddr => spaced_chars(&clause.text),
            _ => clause.text.clone(),
        };

        let terms: Vec<(Occur, Box<dyn Query>)> = self
            .tokens(field, &text)?
            .into_iter()
            .map(|token| {
                let distance = auto_fuzziness(&token);
                let term = Term::from_field_text(field, &token);
                let query: Box<dyn Query> = Box::new(FuzzyTermQuery::new(term, distance, true));
                (Occur::Should, query)
            })
            .collect();

        if terms.is_empty() {
            return Ok(None);
        }
        Ok(Some(Box::new(BoostQuery::new(
            Box::new(BooleanQuery::new(terms)),
            clause.weight,
        ))))
    }

    /// 精确过滤，不参与计分
    fn filter_query(&self, field: AddressField, value: &str) -> Box<dyn Query> {
        let term = Term::from_field_text(self.field(field), value);
        Box::new(BoostQuery::new(
            Box::new(TermQuery::new(term, IndexRecordOption::Basic)),
            0.0,
        ))
    }

    fn build_query(&self, spec: &QuerySpec) -> Result<Option<BooleanQuery>, SearchError> {
        let mut clauses: Vec<(Occur, Box<dyn Query>)> = spec
            .filters
            .iter()
            .map(|(&field, value)| (Occur::Must, self.filter_query(field, value)))
            .collect();

        for clause in &spec.should {
            if let Some(query) = self.fuzzy_query(clause)? {
                clauses.push((Occur::Should, query));
            }
        }

        if clauses.is_empty() {
            return Ok(None);
        }
        Ok(Some(BooleanQuery::new(clauses)))
    }

    fn to_candidate(&self, score: f32, doc: &TantivyDocument) -> CandidateRecord {
        let mut record = CandidateRecord::new(score);
        for field in AddressField::ALL {
            let value = doc
                .get_first(self.field(field))
                .and_then(|v| v.as_str())
                .unwrap_or("");
            if !value.is_empty() {
                record.fields.insert(field, value.to_string());
            }
        }
        record
    }
}

impl SearchService for AddressIndex {
    fn search(
        &self,
        spec: &QuerySpec,
        limit: usize,
        min_score: f32,
    ) -> Result<Vec<CandidateRecord>, SearchError> {
        if spec.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }
        let Some(query) = self.build_query(spec)? else {
            return Ok(Vec::new());
        };

        let searcher = self.reader.searcher();
        let top_docs = searcher.search(&query, &TopDocs::with_limit(limit))?;

        let mut results = Vec::new();
        for (score, doc_address) in top_docs {
            if score < min_score {
                continue;
            }
            let retrieved_doc: TantivyDocument = searcher.doc(doc_address)?;
            results.push(self.to_candidate(score, &retrieved_doc));
        }
        debug!(hits = results.len(), min_score, "address index searched");

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(doro: &str, no1: &str, no2: &str) -> AddressRecord {
        AddressRecord {
            zip_no: "06000".to_string(),
            sido: "서울특별시".to_string(),
            sigungu: "강남구".to_string(),
            doro: doro.to_string(),
            build_no1: no1.to_string(),
            build_no2: no2.to_string(),
            san_yn: "0".to_string(),
            ..Default::default()
        }
    }

    fn index() -> AddressIndex {
        let mut index = AddressIndex::new().unwrap();
        index
            .add_records(&[
                record("도산대로8길", "20", "7"),
                record("도산대로", "120", "0"),
                record("언주로", "211", "0"),
            ])
            .unwrap();
        index
    }

    fn clause(field: AddressField, text: &str, weight: f32) -> FuzzyClause {
        FuzzyClause {
            field,
            text: text.to_string(),
            weight,
        }
    }

    #[test]
    fn fuzziness_follows_length() {
        assert_eq!(auto_fuzziness("20"), 0);
        assert_eq!(auto_fuzziness("강남구"), 1);
        assert_eq!(auto_fuzziness("도산대로8길"), 2);
    }

    #[test]
    fn weights_add_up() {
        let index = index();
        let spec = QuerySpec {
            filters: Default::default(),
            should: vec![
                clause(AddressField::Doro, "두산대로8길", 3.0),
                clause(AddressField::BuildNo1, "20", 4.0),
            ],
        };
        let hits = index.search(&spec, 3, 0.0).unwrap();
        assert_eq!(hits[0].get(AddressField::Doro), "도산대로8길");
        assert!((hits[0].score - 7.0).abs() < 1e-4);
    }

    #[test]
    fn min_score_drops_weak_hits() {
        let index = index();
        let spec = QuerySpec {
            filters: Default::default(),
            should: vec![clause(AddressField::Doro, "언주로", 3.0)],
        };
        assert_eq!(index.search(&spec, 3, 0.0).unwrap().len(), 1);
        assert!(index.search(&spec, 3, 3.5).unwrap().is_empty());
    }

    #[test]
    fn filters_are_required() {
        let index = index();
        let mut spec = QuerySpec::default();
        spec.filters.insert(AddressField::Sido, "부산광역시".to_string());
        spec.should.push(clause(AddressField::Doro, "언주로", 3.0));
        assert!(index.search(&spec, 3, 0.0).unwrap().is_empty());
    }

    #[test]
    fn empty_query_returns_nothing() {
        let index = index();
        assert!(index.search(&QuerySpec::default(), 3, 0.0).unwrap().is_empty());
    }

    #[test]
    fn reopen_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut index = AddressIndex::create_in_dir(dir.path()).unwrap();
            index.add_records(&[record("언주로", "211", "0")]).unwrap();
        }
        let index = AddressIndex::open_in_dir(dir.path()).unwrap();
        let spec = QuerySpec {
            filters: Default::default(),
            should: vec![clause(AddressField::BuildNo1, "211", 4.0)],
        };
        let hits = index.search(&spec, 3, 0.0).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].get(AddressField::Doro), "언주로");
    }
}
