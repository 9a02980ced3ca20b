use std::fmt;

/// 地址索引中的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AddressField {
    /// 시도
    Sido,
    /// 시군구
    Sigungu,
    /// 읍면
    Eupmyun,
    /// 도로명
    Doro,
    BuildNo1,
    BuildNo2,
    /// 법정동
    DongNm,
    /// 리
    Ri,
    Zibun1,
    Zibun2,
    /// 건물명
    BuildNm,
    /// 우편번호
    ZipNo,
    /// 산 여부，"1" 表示산 번지
    SanYn,
    /// 시도 ~ 읍면 拼接
    DefaultAddr,
    /// 全部字段加건물명，按单字检索
    FullAddr,
    /// "건물번호1-건물번호2"
    BuildNo,
    /// "지번1-지번2"
    Zibun,
}

impl AddressField {
    pub const ALL: [AddressField; 17] = [
        AddressField::Sido,
        AddressField::Sigungu,
        AddressField::Eupmyun,
        AddressField::Doro,
        AddressField::BuildNo1,
        AddressField::BuildNo2,
        AddressField::DongNm,
        AddressField::Ri,
        AddressField::Zibun1,
        AddressField::Zibun2,
        AddressField::BuildNm,
        AddressField::ZipNo,
        AddressField::SanYn,
        AddressField::DefaultAddr,
        AddressField::FullAddr,
        AddressField::BuildNo,
        AddressField::Zibun,
    ];

    /// 索引里的字段名
    pub fn name(self) -> &'static str {
        match self {
            AddressField::Sido => "sido",
            AddressField::Sigungu => "sigungu",
            AddressField::Eupmyun => "eupmyun",
            AddressField::Doro => "doro",
            AddressField::BuildNo1 => "build_no1",
            AddressField::BuildNo2 => "build_no2",
            AddressField::DongNm => "dong_nm",
            AddressField::Ri => "ri",
            AddressField::Zibun1 => "zibun1",
            AddressField::Zibun2 => "zibun2",
            AddressField::BuildNm => "build_nm",
            AddressField::ZipNo => "zip_no",
            AddressField::SanYn => "san_yn",
            AddressField::DefaultAddr => "default_addr",
            AddressField::FullAddr => "full_addr",
            AddressField::BuildNo => "build_no",
            AddressField::Zibun => "zibun",
        }
    }

    /// Elasticsearch 索引使用大写字段名
    pub fn elastic_name(self) -> String {
        self.name().to_ascii_uppercase()
    }

    pub fn from_elastic_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(name))
    }
}

/// 全文字段按单字检索：去掉空白，每个字之间加空格
pub fn spaced_chars(text: &str) -> String {
    let chars: Vec<String> = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(String::from)
        .collect();
    chars.join(" ")
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
