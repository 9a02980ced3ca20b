//! 地址分段
//!
//! 从地址中找出 "名称 + 번지/건물번호" 所在的核心片段，修正 OCR 造成的空格问题，
//! 再拆成 `[기본주소, 도로명/동/리, 번호1, 번호2]`。
//! 每一步都是纯函数，匹配不到时原样返回输入。

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::hangul::jamo_distance;

/// 名称结尾的单位字，包含 OCR 常见误识别（김/히）
const UNIT_CHARS: &str = "호|로|길|김|가|동|리|히";

/// 空格被拆开后允许合并的结尾
const SPLIT_NAME_SUFFIXES: &[&str] = &["로", "길", "가", "동", "리", "대로"];

/// 산 번지标记
pub const MOUNTAIN_MARKER: char = '산';

const GIL: char = '길';
const RO: &str = "로";
const GIL_REPAIR_THRESHOLD: f64 = 0.6;

// 名称 + 可选的 산 + 번호 + 可选的第二个번호
static RE_CORE_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\d*?[가-힣0-9a-zA-Z\s]+(?:{UNIT_CHARS})\s*(?:산)?\d+(?:-+\d+|\s+\d+)?\b"
    ))
    .unwrap()
});

// 到最后一个单位字为止
static RE_NAME_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\d*?[가-힣0-9a-zA-Z\s]+(?:{UNIT_CHARS})")).unwrap()
});

// "도산 대로" 这种被空格拆开的名称
static RE_SPLIT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"[가-힣0-9a-zA-Z]+\s+[가-힣0-9a-zA-Z](?:{UNIT_CHARS})"
    ))
    .unwrap()
});

static RE_SIGUNGU: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[가-힣0-9a-zA-Z]+(?:시|군|구)").unwrap());

static RE_MOUNTAIN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"산\d+").unwrap());

/// 分段结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decomposition {
    /// `[기본주소, 名称, 번호1, (번호2)]`，没有核心片段时为空
    pub components: Vec<String>,
    pub detail: String,
    pub is_mountain_lot: bool,
}

impl Decomposition {
    /// 道路名/동/리 名称段
    pub fn name(&self) -> &str {
        self.components.get(1).map(String::as_str).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// 与正则的 `\d` 一致，全角数字也算
fn is_number(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_numeric)
}

/// 第 1 步：找到核心片段
pub fn find_core_span(address: &str) -> Option<&str> {
    RE_CORE_SPAN
        .find(address)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

/// 第 2 步：在最后一个单位字后断开，名称和번호之间保留一个空格
pub fn separate_number(span: &str) -> String {
    let Some(m) = RE_NAME_PREFIX.find(span) else {
        return span.to_string();
    };
    let head = m.as_str().trim();
    let tail = span[m.end()..].trim();
    if tail.is_empty() {
        head.to_string()
    } else {
        format!("{head} {tail}")
    }
}

/// 第 3 步：合并被空格拆开的名称（"도산 대로" → "도산대로"）
pub fn attach_split_name(span: &str) -> String {
    let Some(m) = RE_SPLIT_NAME.find(span) else {
        return span.to_string();
    };
    let matched = m.as_str().trim();
    let last = matched.split_whitespace().last().unwrap_or("");
    if !SPLIT_NAME_SUFFIXES.contains(&last) {
        return span.to_string();
    }
    let attached: String = matched.chars().filter(|c| !c.is_whitespace()).collect();
    span.replace(matched, &attached)
}

/// 第 4 步：末尾两个纯数字合并成 "a-b"
pub fn merge_number_pair(mut tokens: Vec<String>) -> Vec<String> {
    let n = tokens.len();
    if n >= 2 && is_number(&tokens[n - 2]) && is_number(&tokens[n - 1]) {
        let second = tokens.pop().unwrap_or_default();
        let first = tokens.pop().unwrap_or_default();
        tokens.push(format!("{first}-{second}"));
    }
    tokens
}

/// 第 5 步：`방배천로 2길` → `방배천로2길`
pub fn repair_gil_spacing(mut tokens: Vec<String>) -> Vec<String> {
    let n = tokens.len();
    if n < 3 || !tokens[n - 2].ends_with(GIL) {
        return tokens;
    }
    let Some((last, _)) = tokens[n - 3].char_indices().last() else {
        return tokens;
    };
    if jamo_distance(&tokens[n - 3][last..], RO) >= GIL_REPAIR_THRESHOLD {
        return tokens;
    }
    let gil = tokens.remove(n - 2);
    tokens[n - 3].push_str(&gil);
    tokens
}

/// 第 6 步：名称里粘着的시/군/구 拆成独立的词，放在名称前面
pub fn split_sigungu(mut tokens: Vec<String>) -> Vec<String> {
    let n = tokens.len();
    if n < 2 {
        return tokens;
    }
    let Some(sigungu) = RE_SIGUNGU.find(&tokens[n - 2]).map(|m| m.as_str().to_string()) else {
        return tokens;
    };
    let stripped = tokens[n - 2].replace(&sigungu, "");
    tokens[n - 2] = stripped;
    tokens.insert(n - 2, sigungu);
    tokens
}

/// 第 7 步：번호按 `-` 拆开，去掉산标记
pub fn split_lot_number(number: &str) -> (Vec<String>, bool) {
    let mut is_mountain_lot = false;
    let parts = number
        .split('-')
        .filter(|p| !p.is_empty())
        .map(|part| {
            let mut part = part.to_string();
            if RE_MOUNTAIN.is_match(&part) {
                is_mountain_lot = true;
                part = part.replace(MOUNTAIN_MARKER, "");
            }
            part.chars().filter(|c| !c.is_whitespace()).collect()
        })
        .collect();
    (parts, is_mountain_lot)
}

/// 完整的分段流程，`detail` 是已提取的상세주소（可能为空）
pub fn decompose(address: &str, detail: &str) -> Decomposition {
    let miss = || Decomposition {
        components: Vec::new(),
        detail: detail.to_string(),
        is_mountain_lot: false,
    };

    let Some(span) = find_core_span(address) else {
        debug!(address, "no road or lot span found");
        return miss();
    };

    let working = separate_number(span);
    let working = attach_split_name(&working);

    let tokens: Vec<String> = working.split_whitespace().map(str::to_string).collect();
    if tokens.len() < 2 {
        debug!(span, "core span has no separable number");
        return miss();
    }

    let tokens = merge_number_pair(tokens);
    let tokens = repair_gil_spacing(tokens);
    let mut tokens = split_sigungu(tokens);

    let number = tokens.pop().unwrap_or_default();
    let name = tokens.pop().unwrap_or_default();
    let (numbers, is_mountain_lot) = split_lot_number(&number);
    let default_address = tokens.join(" ").trim().to_string();

    let mut components = Vec::with_capacity(2 + numbers.len());
    components.push(default_address);
    components.push(name);
    components.extend(numbers);

    let detail = if detail.is_empty() {
        address
            .find(span)
            .map(|pos| address[pos + span.len()..].to_string())
            .unwrap_or_default()
    } else {
        detail.to_string()
    };

    debug!(?components, is_mountain_lot, "address decomposed");
    Decomposition {
        components,
        detail,
        is_mountain_lot,
    }
}
