//! 미얀마 유니코드 코드포인트 상수 및 UTF-16 유틸리티
//!
//! 미얀마 블록: U+1000 ~ U+109F

// ===== 자음 (U+1000 ~ U+1021) =====
pub const KA: u32 = 0x1000; // က
pub const GHA: u32 = 0x1003; // ဃ
pub const CA: u32 = 0x1005; // စ
pub const JHA: u32 = 0x1008; // ဈ (စ + ျ 합자)
pub const NYA: u32 = 0x1009; // ည
pub const DA: u32 = 0x1012; // ဒ
pub const PA: u32 = 0x1015; // ပ
pub const WA: u32 = 0x101D; // ဝ
pub const SA: u32 = 0x101E; // သ
pub const HA: u32 = 0x101F; // ဟ
pub const A: u32 = 0x1021; // အ
pub const SHAN_A: u32 = 0x1022; // ဢ

// ===== 독립 모음 =====
pub const U: u32 = 0x1025; // ဥ
pub const UU: u32 = 0x1026; // ဦ
pub const O: u32 = 0x1029; // ဩ

// ===== 종속 모음 (U+102B ~ U+1032) =====
pub const TALL_AA: u32 = 0x102B; // ါ
pub const AA: u32 = 0x102C; // ာ
pub const I_VOWEL: u32 = 0x102D; // ိ
pub const II_VOWEL: u32 = 0x102E; // ီ
pub const U_VOWEL: u32 = 0x102F; // ု
pub const UU_VOWEL: u32 = 0x1030; // ူ
pub const E_VOWEL: u32 = 0x1031; // ေ (전치 모음)

// ===== 기호 =====
pub const ANUSVARA: u32 = 0x1036; // ံ
pub const DOT_BELOW: u32 = 0x1037; // ့
pub const VISARGA: u32 = 0x1038; // း
pub const VIRAMA: u32 = 0x1039; // ္ (겹자음 스태킹)
pub const ASAT: u32 = 0x103A; // ် (보이는 킬러)

// ===== 메디얼 (U+103B ~ U+103E) =====
pub const YA_MEDIAL: u32 = 0x103B; // ျ
pub const RA_MEDIAL: u32 = 0x103C; // ြ
pub const WA_MEDIAL: u32 = 0x103D; // ွ
pub const HA_MEDIAL: u32 = 0x103E; // ှ

// ===== 숫자 / 구두점 =====
pub const DIGIT_ZERO: u32 = 0x1040;
pub const DIGIT_NINE: u32 = 0x1049;
pub const LITTLE_SECTION: u32 = 0x104A; // ၊
pub const SECTION: u32 = 0x104B; // ။

// ===== 몬 / 카렌 확장 =====
pub const MON_NGA_BLOCK_START: u32 = 0x105A;
pub const MON_NGA_BLOCK_END: u32 = 0x105D;
pub const KAREN_SHA: u32 = 0x105C; // ၜ
pub const KAREN_MEDIAL: u32 = 0x105E; // ၞ
pub const KAREN_MEDIAL_3: u32 = 0x1060; // ၠ
pub const COUNCIL_TONE_2: u32 = 0x1062;
pub const MON_NGA: u32 = 0x106E; // ၮ
pub const MON_JHA: u32 = 0x106F; // ၯ
pub const MON_BBA: u32 = 0x1070; // ၰ

// ===== 샨 =====
pub const SHAN_KA: u32 = 0x1075;
pub const SHAN_HA: u32 = 0x1081;
pub const SHAN_MEDIAL_WA: u32 = 0x1082; // ႂ
pub const SHAN_VOWEL_AA: u32 = 0x1083; // ႃ
pub const SHAN_E: u32 = 0x1084; // ႄ (샨 전치 모음)
pub const SHAN_TONE_2: u32 = 0x1086; // ႆ
pub const SHAN_DIGIT_ZERO: u32 = 0x1090;
pub const SHAN_DIGIT_NINE: u32 = 0x1099;

/// 합자 방지용 폭 없는 공백
pub const ZWSP: u32 = 0x200B;

/// UTF-16 상위 서로게이트인지 확인
pub fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

/// UTF-16 하위 서로게이트인지 확인
pub fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

/// 서로게이트 쌍의 절반인지 확인 (이모지 등)
pub fn is_surrogate(unit: u16) -> bool {
    is_high_surrogate(unit) || is_low_surrogate(unit)
}

/// 코드포인트 목록을 문자열로 변환
/// 유효하지 않은 코드포인트는 건너뜀
pub fn to_text(code_points: &[u32]) -> String {
    code_points.iter().filter_map(|&cp| char::from_u32(cp)).collect()
}

/// 문자열을 `U+XXXX` 목록으로 표기 (디버그 출력용)
pub fn describe(text: &str) -> String {
    text.chars()
        .map(|c| format!("U+{:04X}", c as u32))
        .collect::<Vec<_>>()
        .join(" ")
}
