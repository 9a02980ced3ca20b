//! 상세주소(동/호/층) 提取

use std::sync::LazyLock;

use regex::Regex;

use crate::hangul::is_syllable;

/// 아파트 동 的字母编号
pub const APT_DONG_UNIT: &str = "가나다라마바사아자차파카타하";

// 101동 / 가동 / B동 / 1203호 / 3층
static RE_DETAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b(?:(?:\d+|[{APT_DONG_UNIT}]|[a-zA-Z])동|\d+호|\d+층)"
    ))
    .unwrap()
});

/// 后面紧跟韩文或字母时不算单位（例如 "1동로"）
fn is_unit_end(text: &str, end: usize) -> bool {
    match text[end..].chars().next() {
        Some(c) => !(is_syllable(c) || c.is_ascii_alphabetic()),
        None => true,
    }
}

/// 找到상세주소的起始位置
pub fn find_detail_start(address: &str) -> Option<usize> {
    let mut pos = 0;
    while pos <= address.len() {
        let m = RE_DETAIL.find_at(address, pos)?;
        if is_unit_end(address, m.end()) {
            return Some(m.start());
        }
        let step = address[m.start()..].chars().next().map_or(1, char::len_utf8);
        pos = m.start() + step;
    }
    None
}

/// 把地址拆成 (去掉상세주소的部分, 상세주소)
pub fn extract_detail(address: &str) -> (String, String) {
    match find_detail_start(address) {
        Some(start) => (
            address[..start].trim().to_string(),
            address[start..].to_string(),
        ),
        None => (address.to_string(), String::new()),
    }
}
