//! 校正流水线：시도 → 상세주소 → 分段 → 体系判断 → 检索条件 → 检索 → 结果还原

use tracing::debug;

use crate::assemble::{assemble, CorrectionResult, MAX_RESULTS};
use crate::config::CorrectorConfig;
use crate::detail::extract_detail;
use crate::error::CorrectError;
use crate::field::AddressField;
use crate::province;
use crate::query::{QueryContext, QuerySpec};
use crate::scheme::{classify, AddressScheme};
use crate::search::SearchService;
use crate::segment::decompose;

/// 检索之前的全部结果
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedQuery {
    pub scheme: AddressScheme,
    pub components: Vec<String>,
    pub detail: String,
    pub spec: QuerySpec,
}

/// 把原始地址转换成检索条件，不访问检索后端
pub fn prepare(raw: &str) -> Result<PreparedQuery, CorrectError> {
    let address = raw.trim();
    if address.is_empty() {
        return Err(CorrectError::InvalidInput);
    }

    let mut ctx = QueryContext::new();

    let (address, sido) = province::apply(address);
    if let Some(sido) = sido {
        ctx.filter(AddressField::Sido, sido);
    }

    let (remainder, detail) = extract_detail(&address);
    let decomposition = decompose(&remainder, &detail);
    if decomposition.is_mountain_lot {
        ctx.filter(AddressField::SanYn, "1");
    }

    let scheme = classify(decomposition.name());
    match scheme {
        AddressScheme::Unresolved => ctx.add_fallback_clauses(&remainder),
        _ => ctx.add_scheme_clauses(scheme, &decomposition.components),
    }
    debug!(?scheme, sido, "query prepared");

    Ok(PreparedQuery {
        scheme,
        components: decomposition.components,
        detail: decomposition.detail.trim().to_string(),
        spec: ctx.finish(),
    })
}

/// 地址校正器
///
/// 只持有检索后端和不可变配置，每次调用各自构造检索条件，
/// 因此同一个实例可以重复使用，也可以在线程间共享。
pub struct AddressCorrector<S> {
    service: S,
    config: CorrectorConfig,
}

impl<S: SearchService> AddressCorrector<S> {
    pub fn new(service: S) -> Self {
        Self::with_config(service, CorrectorConfig::default())
    }

    pub fn with_config(service: S, config: CorrectorConfig) -> Self {
        Self { service, config }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn config(&self) -> &CorrectorConfig {
        &self.config
    }

    /// 校正一个地址，返回最多 3 个候选
    ///
    /// 空输入返回 [`CorrectError::InvalidInput`]；检索后端失败返回
    /// [`CorrectError::Search`]；找不到足够可信的候选时返回空列表。
    pub fn correct(&self, raw: &str) -> Result<Vec<CorrectionResult>, CorrectError> {
        let prepared = prepare(raw)?;
        let limit = self.config.max_results.min(MAX_RESULTS);
        let hits = self
            .service
            .search(&prepared.spec, limit, self.config.min_score)?;
        debug!(hits = hits.len(), "search finished");
        Ok(assemble(&hits, &prepared.detail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_is_rejected() {
        for raw in ["", " ", "\t", "\n  \t", "\u{3000}"] {
            assert!(matches!(prepare(raw), Err(CorrectError::InvalidInput)));
        }
    }

    #[test]
    fn road_address_query() {
        let prepared = prepare("서울시 강담구 두산대로8길 20-7").unwrap();
        assert_eq!(prepared.scheme, AddressScheme::Road);
        assert_eq!(prepared.spec.filters[&AddressField::Sido], "서울특별시");
        assert_eq!(prepared.spec.should.len(), 4);
        assert_eq!(prepared.spec.should[1].field, AddressField::Doro);
        assert_eq!(prepared.spec.should[1].text, "두산대로8길");
    }

    #[test]
    fn full_width_ocr_digits_keep_road_scheme() {
        let prepared = prepare("서울 강남구 언주로 ２１１ ３").unwrap();
        assert_eq!(prepared.scheme, AddressScheme::Road);
        assert_eq!(prepared.components[1], "언주로");
        assert_eq!(prepared.spec.should[2].text, "２１１");
        assert_eq!(prepared.spec.should[3].text, "３");
    }

    #[test]
    fn detail_only_input_adds_no_empty_clause() {
        let prepared = prepare("101동 1203호").unwrap();
        assert_eq!(prepared.scheme, AddressScheme::Unresolved);
        assert!(prepared.spec.is_empty());
        assert_eq!(prepared.detail, "101동 1203호");
    }

    #[test]
    fn village_address_query_has_no_province_filter() {
        let prepared = prepare("광주시 곤지읍 건엄리 236-1").unwrap();
        assert_eq!(prepared.scheme, AddressScheme::Village);
        assert!(prepared.spec.filters.is_empty());
        assert_eq!(prepared.spec.should[1].field, AddressField::Ri);
    }

    #[test]
    fn building_name_falls_back_to_full_text() {
        let prepared = prepare("강남세브란스병원").unwrap();
        assert_eq!(prepared.scheme, AddressScheme::Unresolved);
        assert!(prepared.components.is_empty());
        assert_eq!(prepared.spec.should.len(), 1);
        assert_eq!(prepared.spec.should[0].field, AddressField::FullAddr);
    }

    #[test]
    fn mountain_lot_becomes_filter() {
        let prepared = prepare("강원 평창군 대관령면 횡계리 산12-3").unwrap();
        assert_eq!(prepared.spec.filters[&AddressField::SanYn], "1");
        assert_eq!(prepared.spec.filters[&AddressField::Sido], "강원도");
        assert_eq!(prepared.scheme, AddressScheme::Village);
    }

    #[test]
    fn detail_is_kept_verbatim() {
        let prepared = prepare("서울 강남구 언주로 211 101동 1203호").unwrap();
        assert_eq!(prepared.detail, "101동 1203호");
        assert_eq!(prepared.scheme, AddressScheme::Road);

        let prepared = prepare("서울 강남구 언주로 211 본관 ").unwrap();
        assert_eq!(prepared.detail, "본관");
    }
}
