//! 基于字母(자모)分解的韩文编辑距离
//!
//! 每个音节分解为 初声/中声/终声 三个字母，两个字符之间的替换代价为
//! 三元组编辑距离除以 3，所以只差一个字母的两个音节距离为 1/3。
//! 字符串距离再按较长一方的字符数归一化到 [0, 1]。

const SYLLABLE_BASE: u32 = 0xAC00;
const SYLLABLE_LAST: u32 = 0xD7A3;
const JUNG_COUNT: u32 = 21;
const JONG_COUNT: u32 = 28;

const NO_JONG: u32 = u32::MAX;

/// 把字符分解为三个字母；非韩文音节的字符三个位置都是字符本身
fn decompose(c: char) -> [u32; 3] {
    let code = c as u32;
    if !(SYLLABLE_BASE..=SYLLABLE_LAST).contains(&code) {
        return [code; 3];
    }
    let offset = code - SYLLABLE_BASE;
    let cho = offset / (JUNG_COUNT * JONG_COUNT);
    let jung = (offset % (JUNG_COUNT * JONG_COUNT)) / JONG_COUNT;
    let jong = offset % JONG_COUNT;
    [
        0x1100 + cho,
        0x1161 + jung,
        if jong == 0 { NO_JONG } else { 0x11A7 + jong },
    ]
}

/// 是否是完整的韩文音节
pub fn is_syllable(c: char) -> bool {
    (SYLLABLE_BASE..=SYLLABLE_LAST).contains(&(c as u32))
}

fn substitution_cost(a: char, b: char) -> f64 {
    if a == b {
        return 0.0;
    }
    strsim::generic_levenshtein(&decompose(a), &decompose(b)) as f64 / 3.0
}

/// 字母级编辑距离，0 表示相同，1 表示完全不同
pub fn jamo_distance(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 0.0;
    }

    let mut prev: Vec<f64> = (0..=b.len()).map(|j| j as f64).collect();
    let mut curr = vec![0.0; b.len() + 1];
    for (i, &x) in a.iter().enumerate() {
        curr[0] = (i + 1) as f64;
        for (j, &y) in b.iter().enumerate() {
            let insertion = prev[j + 1] + 1.0;
            let deletion = curr[j] + 1.0;
            let substitution = prev[j] + substitution_cost(x, y);
            curr[j + 1] = insertion.min(deletion).min(substitution);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    (prev[b.len()] / longest as f64).min(1.0)
}

/// 单字符版本
pub fn char_distance(a: char, b: char) -> f64 {
    substitution_cost(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn identical_is_zero() {
        assert_eq!(jamo_distance("도산대로", "도산대로"), 0.0);
        assert_eq!(char_distance('길', '길'), 0.0);
    }

    #[test]
    fn one_jamo_apart() {
        // 김 / 길 只差终声
        assert!(close(char_distance('김', '길'), 1.0 / 3.0));
        // 료 / 로 只差中声
        assert!(close(char_distance('료', '로'), 1.0 / 3.0));
    }

    #[test]
    fn missing_final_consonant() {
        assert!(close(char_distance('각', '가'), 1.0 / 3.0));
        assert!(close(jamo_distance("건업리", "건엄리"), 1.0 / 9.0));
    }

    #[test]
    fn two_jamo_apart() {
        // 동 / 로: 初声和终声都不同
        assert!(close(char_distance('동', '로'), 2.0 / 3.0));
    }

    #[test]
    fn unrelated_is_one() {
        assert!(close(char_distance('김', '로'), 1.0));
        assert!(close(char_distance('a', '로'), 1.0));
        assert!(close(char_distance('a', 'b'), 1.0));
    }

    #[test]
    fn string_distance_is_normalized() {
        let d = jamo_distance("강담구", "강남구");
        assert!(close(d, 1.0 / 9.0));
        assert!(close(jamo_distance("", "로"), 1.0));
        assert!(jamo_distance("서울", "부산") <= 1.0);
    }

    #[test]
    fn syllable_range() {
        assert!(is_syllable('가'));
        assert!(is_syllable('힣'));
        assert!(!is_syllable('ㄱ'));
        assert!(!is_syllable('a'));
    }
}
