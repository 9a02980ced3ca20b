//! 把检索结果还原成 도로명/지번 两种地址文本

use crate::field::AddressField;
use crate::search::CandidateRecord;
use crate::segment::MOUNTAIN_MARKER;

/// 每个输入最多返回的候选数
pub const MAX_RESULTS: usize = 3;

const ROAD_FIELDS: &[AddressField] = &[
    AddressField::Sido,
    AddressField::Sigungu,
    AddressField::Eupmyun,
    AddressField::Doro,
    AddressField::BuildNo1,
    AddressField::BuildNo2,
];

const LOT_FIELDS: &[AddressField] = &[
    AddressField::Sido,
    AddressField::Sigungu,
    AddressField::Eupmyun,
    AddressField::DongNm,
    AddressField::Ri,
    AddressField::Zibun1,
    AddressField::Zibun2,
];

/// 校正结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionResult {
    pub postal_code: String,
    /// 도로명주소
    pub road_address: String,
    /// 지번주소
    pub lot_address: String,
    /// 상세주소
    pub detail_address: String,
}

impl CorrectionResult {
    /// 格式化为字符串
    pub fn to_string(&self) -> String {
        format!(
            "우편번호: {} | 도로명: {} | 지번: {} | 상세: {}",
            self.postal_code, self.road_address, self.lot_address, self.detail_address
        )
    }
}

fn build_address(record: &CandidateRecord, fields: &[AddressField], mountain_prefix: bool) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut numbers: Vec<&str> = Vec::new();

    for &field in fields {
        let value = record.get(field);
        if value.is_empty() || value == "0" {
            continue;
        }
        if value.chars().all(char::is_numeric) {
            numbers.push(value);
        } else {
            words.push(value.to_string());
        }
    }

    if !numbers.is_empty() {
        let mut number = numbers.join("-");
        if mountain_prefix {
            number.insert(0, MOUNTAIN_MARKER);
        }
        words.push(number);
    }

    let building = record.building_name().trim();
    if !building.is_empty() {
        words.push(building.to_string());
    }

    words.join(" ").trim().to_string()
}

/// 도로명주소：시도 시군구 읍면 도로명 건물번호 건물명
pub fn road_address(record: &CandidateRecord) -> String {
    build_address(record, ROAD_FIELDS, false)
}

/// 지번주소：시도 시군구 읍면 동 리 [산]지번 건물명
pub fn lot_address(record: &CandidateRecord) -> String {
    build_address(record, LOT_FIELDS, record.is_mountain_lot())
}

/// 取前 [`MAX_RESULTS`] 条候选，保持检索后端给出的顺序
pub fn assemble(records: &[CandidateRecord], detail: &str) -> Vec<CorrectionResult> {
    records
        .iter()
        .take(MAX_RESULTS)
        .map(|record| CorrectionResult {
            postal_code: record.postal_code().to_string(),
            road_address: road_address(record),
            lot_address: lot_address(record),
            detail_address: detail.to_string(),
        })
        .collect()
}
