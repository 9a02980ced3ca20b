use std::sync::{Arc, Mutex};

use addr_correct::csv_loader::AddressRecord;
use addr_correct::{
    AddressCorrector, AddressField, AddressIndex, CandidateRecord, CorrectError, CorrectorConfig,
    QuerySpec, SearchError, SearchService,
};

#[allow(clippy::too_many_arguments)]
fn record(
    zip_no: &str,
    sido: &str,
    sigungu: &str,
    eupmyun: &str,
    doro: &str,
    build_no: (&str, &str),
    dong_ri: (&str, &str),
    zibun: (&str, &str),
    build_nm: &str,
) -> AddressRecord {
    AddressRecord {
        zip_no: zip_no.to_string(),
        sido: sido.to_string(),
        sigungu: sigungu.to_string(),
        eupmyun: eupmyun.to_string(),
        doro: doro.to_string(),
        build_no1: build_no.0.to_string(),
        build_no2: build_no.1.to_string(),
        dong_nm: dong_ri.0.to_string(),
        ri: dong_ri.1.to_string(),
        zibun1: zibun.0.to_string(),
        zibun2: zibun.1.to_string(),
        build_nm: build_nm.to_string(),
        san_yn: "0".to_string(),
    }
}

fn corpus() -> Vec<AddressRecord> {
    vec![
        record(
            "06028",
            "서울특별시",
            "강남구",
            "",
            "도산대로8길",
            ("20", "7"),
            ("신사동", ""),
            ("566", "3"),
            "",
        ),
        record(
            "06024",
            "서울특별시",
            "강남구",
            "",
            "도산대로",
            ("120", "0"),
            ("신사동", ""),
            ("527", "0"),
            "",
        ),
        record(
            "06273",
            "서울특별시",
            "강남구",
            "",
            "언주로",
            ("211", "0"),
            ("도곡동", ""),
            ("146", "92"),
            "강남세브란스병원",
        ),
        record(
            "06090",
            "서울특별시",
            "강남구",
            "",
            "학동로",
            ("426", "0"),
            ("삼성동", ""),
            ("16", "1"),
            "강남구청",
        ),
        record(
            "12773",
            "경기도",
            "광주시",
            "곤지암읍",
            "건업길",
            ("31", "0"),
            ("", "건업리"),
            ("236", "1"),
            "",
        ),
        record(
            "12773",
            "경기도",
            "광주시",
            "곤지암읍",
            "건업길",
            ("35", "0"),
            ("", "건업리"),
            ("237", "0"),
            "",
        ),
        record(
            "62240",
            "광주광역시",
            "광산구",
            "",
            "하남대로",
            ("100", "0"),
            ("장덕동", ""),
            ("1000", "0"),
            "",
        ),
    ]
}

fn corrector() -> AddressCorrector<AddressIndex> {
    let mut index = AddressIndex::new().unwrap();
    index.add_records(&corpus()).unwrap();
    AddressCorrector::with_config(
        index,
        CorrectorConfig {
            min_score: 5.0,
            max_results: 3,
        },
    )
}

#[test]
fn road_address_is_corrected() {
    let results = corrector().correct("서울시 강담구 두산대로8길 20-7").unwrap();
    assert_eq!(results[0].road_address, "서울특별시 강남구 도산대로8길 20-7");
    assert_eq!(results[0].lot_address, "서울특별시 강남구 신사동 566-3");
    assert_eq!(results[0].postal_code, "06028");
}

#[test]
fn lot_address_is_corrected() {
    let results = corrector().correct("광주시 곤지읍 건엄리 236-1").unwrap();
    assert_eq!(results[0].lot_address, "경기도 광주시 곤지암읍 건업리 236-1");
    assert_eq!(results[0].road_address, "경기도 광주시 곤지암읍 건업길 31");
}

#[test]
fn building_name_is_found_by_full_text() {
    let results = corrector().correct("강남세브란스병원").unwrap();
    assert_eq!(
        results[0].road_address,
        "서울특별시 강남구 언주로 211 강남세브란스병원"
    );
    assert_eq!(results[0].detail_address, "");
}

#[test]
fn detail_address_is_carried_through() {
    let results = corrector()
        .correct("서울 강남구 도산대로8길 20-7 3층 301호")
        .unwrap();
    assert_eq!(results[0].road_address, "서울특별시 강남구 도산대로8길 20-7");
    assert_eq!(results[0].detail_address, "3층 301호");
}

#[test]
fn blank_input_is_rejected() {
    let corrector = corrector();
    for raw in ["", "   ", "\t\n"] {
        assert!(matches!(corrector.correct(raw), Err(CorrectError::InvalidInput)));
    }
}

#[test]
fn no_confident_match_is_empty() {
    let results = corrector().correct("부산 해운대구 센텀로 5").unwrap();
    assert!(results.is_empty());
}

/// 记录每次收到的检索条件
#[derive(Default)]
struct RecordingService {
    queries: Mutex<Vec<QuerySpec>>,
}

impl SearchService for RecordingService {
    fn search(
        &self,
        query: &QuerySpec,
        _limit: usize,
        _min_score: f32,
    ) -> Result<Vec<CandidateRecord>, SearchError> {
        self.queries.lock().unwrap().push(query.clone());
        Ok(Vec::new())
    }
}

#[test]
fn consecutive_calls_do_not_share_clauses() {
    let corrector = AddressCorrector::new(RecordingService::default());
    corrector.correct("서울시 강담구 두산대로8길 20-7").unwrap();
    corrector.correct("광주시 곤지읍 건엄리 236-1").unwrap();

    let queries = corrector.service().queries.lock().unwrap();
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[0].filters[&AddressField::Sido], "서울특별시");
    assert_eq!(queries[0].should.len(), 4);

    assert!(queries[1].filters.is_empty());
    assert_eq!(queries[1].should.len(), 4);
    assert!(queries[1]
        .should
        .iter()
        .all(|c| c.field != AddressField::Doro && c.field != AddressField::BuildNo1));
}

#[test]
fn shared_corrector_across_threads() {
    let corrector = Arc::new(corrector());
    std::thread::scope(|s| {
        let road = s.spawn(|| corrector.correct("서울시 강담구 두산대로8길 20-7").unwrap());
        let lot = s.spawn(|| corrector.correct("광주시 곤지읍 건엄리 236-1").unwrap());
        assert_eq!(
            road.join().unwrap()[0].road_address,
            "서울특별시 강남구 도산대로8길 20-7"
        );
        assert_eq!(
            lot.join().unwrap()[0].lot_address,
            "경기도 광주시 곤지암읍 건업리 236-1"
        );
    });
}

struct FailingService;

impl SearchService for FailingService {
    fn search(
        &self,
        _query: &QuerySpec,
        _limit: usize,
        _min_score: f32,
    ) -> Result<Vec<CandidateRecord>, SearchError> {
        Err(SearchError::Status {
            status: 503,
            body: "unavailable".to_string(),
        })
    }
}

#[test]
fn backend_failure_is_distinguishable() {
    let corrector = AddressCorrector::new(FailingService);
    assert!(matches!(
        corrector.correct("서울시 강담구 두산대로8길 20-7"),
        Err(CorrectError::Search(SearchError::Status { status: 503, .. }))
    ));
}
