//! 시도(광역자치단체) 名称校正

/// 关键字 → 标准시도名。按顺序匹配，靠前的优先
const PROVINCE_ALIASES: &[(&[&str], &str)] = &[
    (&["경기"], "경기도"),
    (&["서울"], "서울특별시"),
    (&["부산"], "부산광역시"),
    (&["울산"], "울산광역시"),
    (&["대전"], "대전광역시"),
    (&["대구"], "대구광역시"),
    (&["인천"], "인천광역시"),
    (&["세종"], "세종특별자치시"),
    (&["경북", "경상북도"], "경상북도"),
    (&["강원"], "강원도"),
    (&["경남", "경상남도"], "경상남도"),
    (&["전남", "전라남도"], "전라남도"),
    (&["전북", "전라북도"], "전라북도"),
    (&["충남", "충청남도"], "충청남도"),
    (&["충북", "충청북도"], "충청북도"),
    (&["제주"], "제주특별자치도"),
];

/// 광주 既是광역시也是경기도的광주시，只有后面跟着这些구才认定为광주광역시。
/// 남구 不在列表里，这类地址不会被校正。
const GWANGJU_KEYWORD: &str = "광주";
const GWANGJU_CITY: &str = "광주광역시";
const GWANGJU_DISTRICTS: &[&str] = &["광산구", "북구", "서구", "동구"];

/// 根据首个词判断标准시도名，无法判断时返回 None
pub fn normalize_province(address: &str) -> Option<&'static str> {
    let mut tokens = address.split_whitespace();
    let first = tokens.next()?;

    for &(keywords, canonical) in PROVINCE_ALIASES {
        if keywords.iter().any(|k| first.contains(k)) {
            return Some(canonical);
        }
    }

    if first == GWANGJU_CITY {
        return Some(GWANGJU_CITY);
    }
    if first.contains(GWANGJU_KEYWORD) {
        if let Some(second) = tokens.next() {
            if GWANGJU_DISTRICTS.contains(&second) {
                return Some(GWANGJU_CITY);
            }
        }
    }

    None
}

/// 用标准名替换首个词，返回替换后的地址和校正值
pub fn apply(address: &str) -> (String, Option<&'static str>) {
    match normalize_province(address) {
        Some(canonical) => {
            let rest: Vec<&str> = address.split_whitespace().skip(1).collect();
            let mut replaced = String::from(canonical);
            for token in rest {
                replaced.push(' ');
                replaced.push_str(token);
            }
            (replaced, Some(canonical))
        }
        None => (address.to_string(), None),
    }
}
