//! 检索条件构造
//!
//! 每次校正都新建一个 [`QueryContext`]，在流水线各步骤之间显式传递，
//! 最后用 [`QueryContext::finish`] 得到交给检索后端的 [`QuerySpec`]。

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::field::AddressField;
use crate::scheme::AddressScheme;

/// 分段结果中的占位值，不参与检索
const PLACEHOLDER: &str = "0";

/// 번호无法判断是건물번호还是지번时使用的权重
const NUMBER_WEIGHT: f32 = 2.0;

static RE_NUMBER_PAIR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+-\d+").unwrap());
static RE_BARE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d+\b").unwrap());

/// 带权重的模糊匹配条件
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyClause {
    pub field: AddressField,
    pub text: String,
    pub weight: f32,
}

/// 一次检索的完整条件：必须满足的精确过滤 + 按权重计分的模糊条件
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuerySpec {
    pub filters: BTreeMap<AddressField, String>,
    pub should: Vec<FuzzyClause>,
}

impl QuerySpec {
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.should.is_empty()
    }
}

/// 单次请求的检索条件累积器
#[derive(Debug, Default)]
pub struct QueryContext {
    spec: QuerySpec,
}

impl QueryContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// 精确过滤条件，同一字段后写入的覆盖前面的
    pub fn filter(&mut self, field: AddressField, value: impl Into<String>) {
        self.spec.filters.insert(field, value.into());
    }

    pub fn should(&mut self, field: AddressField, text: impl Into<String>, weight: f32) {
        self.spec.should.push(FuzzyClause {
            field,
            text: text.into(),
            weight,
        });
    }

    /// 按地址体系的字段表逐个对应分段结果。空值和占位值跳过
    pub fn add_scheme_clauses(&mut self, scheme: AddressScheme, components: &[String]) {
        for (&(field, weight), component) in scheme.weights().iter().zip(components) {
            if component.is_empty() || component == PLACEHOLDER {
                continue;
            }
            self.should(field, component.as_str(), weight);
        }
    }

    /// 无法分段时的退路：先取出번호，剩下的文字去掉空白后做全文检索。
    /// 没有剩余文字时不加全文条件
    pub fn add_fallback_clauses(&mut self, remainder: &str) {
        let mut remainder = remainder.to_string();

        if let Some((range, pair)) = RE_NUMBER_PAIR
            .find(&remainder)
            .map(|m| (m.range(), m.as_str().to_string()))
        {
            remainder.replace_range(range, "");
            self.add_number_clauses(&pair);
        } else {
            let numbers: Vec<_> = RE_BARE_NUMBER
                .find_iter(&remainder)
                .take(2)
                .map(|m| (m.range(), m.as_str().to_string()))
                .collect();
            if !numbers.is_empty() {
                let joined = numbers
                    .iter()
                    .map(|(_, n)| n.as_str())
                    .collect::<Vec<_>>()
                    .join("-");
                self.add_number_clauses(&joined);
                // 从后往前删，前面的位置不受影响
                for (range, _) in numbers.into_iter().rev() {
                    remainder.replace_range(range, "");
                }
            }
        }

        let text: String = remainder.chars().filter(|c| !c.is_whitespace()).collect();
        if !text.is_empty() {
            self.should(AddressField::FullAddr, text, 1.0);
        }
    }

    fn add_number_clauses(&mut self, number: &str) {
        self.should(AddressField::BuildNo, number, NUMBER_WEIGHT);
        self.should(AddressField::Zibun, number, NUMBER_WEIGHT);
    }

    pub fn finish(self) -> QuerySpec {
        self.spec
    }
}
