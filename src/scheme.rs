//! 地址体系判断：도로명 / 동 / 리 / 无法判断

use crate::field::AddressField;
use crate::hangul::char_distance;

/// 地址体系，每种体系带着自己的 (字段, 权重) 表，顺序与分段结果一一对应
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressScheme {
    /// 도로명주소
    Road,
    /// 동 지번주소
    Town,
    /// 리 지번주소
    Village,
    /// 没有可用的分段，退回全文检索
    Unresolved,
}

const ROAD_WEIGHTS: &[(AddressField, f32)] = &[
    (AddressField::DefaultAddr, 1.0),
    (AddressField::Doro, 3.0),
    (AddressField::BuildNo1, 4.0),
    (AddressField::BuildNo2, 5.0),
];

const TOWN_WEIGHTS: &[(AddressField, f32)] = &[
    (AddressField::DefaultAddr, 1.0),
    (AddressField::DongNm, 3.0),
    (AddressField::Zibun1, 4.0),
    (AddressField::Zibun2, 5.0),
];

const VILLAGE_WEIGHTS: &[(AddressField, f32)] = &[
    (AddressField::DefaultAddr, 1.0),
    (AddressField::Ri, 3.0),
    (AddressField::Zibun1, 4.0),
    (AddressField::Zibun2, 4.0),
];

const UNRESOLVED_WEIGHTS: &[(AddressField, f32)] = &[(AddressField::FullAddr, 1.0)];

/// 名称结尾的标准单位字，顺序决定距离相同时的优先级
const UNIT_SCHEMES: [(char, AddressScheme); 5] = [
    ('로', AddressScheme::Road),
    ('길', AddressScheme::Road),
    ('가', AddressScheme::Town),
    ('동', AddressScheme::Town),
    ('리', AddressScheme::Village),
];

impl AddressScheme {
    pub fn weights(self) -> &'static [(AddressField, f32)] {
        match self {
            AddressScheme::Road => ROAD_WEIGHTS,
            AddressScheme::Town => TOWN_WEIGHTS,
            AddressScheme::Village => VILLAGE_WEIGHTS,
            AddressScheme::Unresolved => UNRESOLVED_WEIGHTS,
        }
    }
}

/// 找出与字符最接近的单位字。距离为 1 的一律不算
pub fn closest_unit(c: char) -> Option<char> {
    let mut best: Option<(char, f64)> = None;
    for (unit, _) in UNIT_SCHEMES {
        let distance = char_distance(unit, c);
        if distance == 0.0 {
            return Some(unit);
        }
        if distance < 1.0 && best.map_or(true, |(_, d)| distance < d) {
            best = Some((unit, distance));
        }
    }
    best.map(|(unit, _)| unit)
}

/// 根据名称段的最后一个字判断地址体系
pub fn classify(name: &str) -> AddressScheme {
    let Some(last) = name.chars().last() else {
        return AddressScheme::Unresolved;
    };
    closest_unit(last)
        .and_then(|unit| {
            UNIT_SCHEMES
                .iter()
                .find(|(u, _)| *u == unit)
                .map(|(_, scheme)| *scheme)
        })
        .unwrap_or(AddressScheme::Unresolved)
}
