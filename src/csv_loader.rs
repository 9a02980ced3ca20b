use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// CSV 中的一行地址数据，列名与索引字段名一致
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AddressRecord {
    pub zip_no: String,
    pub sido: String,
    pub sigungu: String,
    pub eupmyun: String,
    pub doro: String,
    pub build_no1: String,
    pub build_no2: String,
    pub dong_nm: String,
    pub ri: String,
    pub zibun1: String,
    pub zibun2: String,
    pub build_nm: String,
    pub san_yn: String,
}

fn present(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty() && value != "0").then_some(value)
}

fn join_number(first: &str, second: &str) -> String {
    [first, second]
        .into_iter()
        .filter_map(present)
        .collect::<Vec<_>>()
        .join("-")
}

impl AddressRecord {
    /// 시도 시군구 읍면
    pub fn default_address(&self) -> String {
        [&self.sido, &self.sigungu, &self.eupmyun]
            .into_iter()
            .filter_map(|v| present(v))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// 건물번호 "본번-부번"
    pub fn building_number(&self) -> String {
        join_number(&self.build_no1, &self.build_no2)
    }

    /// 지번 "본번-부번"
    pub fn lot_number(&self) -> String {
        join_number(&self.zibun1, &self.zibun2)
    }

    /// 用于全文检索的文本：所有地址字段加건물명，去掉空白
    pub fn full_text(&self) -> String {
        [
            &self.sido,
            &self.sigungu,
            &self.eupmyun,
            &self.doro,
            &self.building_number(),
            &self.dong_nm,
            &self.ri,
            &self.lot_number(),
            &self.build_nm,
        ]
        .into_iter()
        .flat_map(|v| v.chars())
        .filter(|c| !c.is_whitespace())
        .collect()
    }

    pub fn san_flag(&self) -> &str {
        match self.san_yn.trim() {
            "" => "0",
            other => other,
        }
    }
}

pub fn load_addresses_from_reader<R: Read>(reader: R) -> anyhow::Result<Vec<AddressRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: AddressRecord = result?;
        records.push(record);
    }
    Ok(records)
}

pub fn load_addresses<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<AddressRecord>> {
    let file = File::open(path)?;
    load_addresses_from_reader(file)
}
