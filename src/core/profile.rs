//! 스크립트 프로파일 - 문자 분류 규칙과 스크립트별 상수
//!
//! 버마어, 샨어, 몬어, 카렌어는 같은 재배열 엔진을 공유하고
//! 코드포인트 범위, 메디얼 규칙, 자동 교정 규칙만 다릅니다.

use std::ops::RangeInclusive;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::core::autocorrect::{AutocorrectRule, AutocorrectTable};
use crate::core::unicode::*;

/// 코드포인트 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodePointClass {
    /// 자음
    Consonant,
    /// 메디얼 (자음 수식 기호)
    Medial,
    /// 전치 모음 (ေ 등)
    PreBaseVowel,
    /// 겹자음 비라마
    Virama,
    /// 성조 및 기타 발음 구별 기호
    ToneOrOther,
    /// 숫자
    Digit,
    /// 단어 구분자
    Separator,
    /// 그 외
    Other,
}

/// 지원 스크립트 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptKind {
    #[default]
    Bamar,
    Shan,
    Mon,
    Karen,
}

impl ScriptKind {
    /// 해당 스크립트의 프로파일 반환
    pub fn profile(self) -> &'static ScriptProfile {
        match self {
            ScriptKind::Bamar => &*BAMAR,
            ScriptKind::Shan => &*SHAN,
            ScriptKind::Mon => &*MON,
            ScriptKind::Karen => &*KAREN,
        }
    }

    /// 이름으로 스크립트 찾기 (대소문자 무시)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "bamar" | "burmese" | "myanmar" => Some(ScriptKind::Bamar),
            "shan" => Some(ScriptKind::Shan),
            "mon" => Some(ScriptKind::Mon),
            "karen" => Some(ScriptKind::Karen),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ScriptKind::Bamar => "bamar",
            ScriptKind::Shan => "shan",
            ScriptKind::Mon => "mon",
            ScriptKind::Karen => "karen",
        }
    }
}

/// 메디얼 스태킹 규칙
///
/// 메디얼 식별자는 스크립트마다 다르지만 판정 순서는 같습니다.
/// `None`인 규칙은 적용하지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedialPolicy {
    /// 전치 모음 하나에 재배열할 수 있는 최대 메디얼 수 (최대 3)
    pub max_medials: usize,
    /// 뒤에 어떤 메디얼도 올 수 없는 메디얼
    pub terminal: Option<u32>,
    /// 뒤에 terminal 메디얼만 올 수 있는 메디얼
    pub penultimate: Option<u32>,
    /// 서로 이어질 수 없는 메디얼 쌍
    pub exclusive: Option<(u32, u32)>,
    /// 아직 재배열된 메디얼이 없을 때만 받는 메디얼 (몬 메디얼)
    pub single_slot: Option<RangeInclusive<u32>>,
}

/// 재배열된 자음 뒤에 입력되면 전치 모음 앞으로 옮기는 기호
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostSwapMark {
    pub mark: u32,
    /// 전치 모음 바로 앞 글자 조건 (None이면 자음이나 메디얼)
    pub after: Option<u32>,
}

/// 전치 모음 앞에 ZWSP를 붙이는 조건
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZwspPolicy {
    /// 앞 두 글자가 (자음, 비라마)가 아니면 항상
    UnlessStacked,
    /// 앞 글자가 자음일 때만
    AfterConsonant,
    /// 앞 글자가 자음이나 메디얼일 때만
    AfterConsonantOrMedial,
    /// 항상
    Always,
}

/// 스크립트 하나의 분류 규칙과 상수 (불변)
#[derive(Debug, Clone)]
pub struct ScriptProfile {
    pub kind: ScriptKind,
    consonants: Vec<RangeInclusive<u32>>,
    medials: Vec<RangeInclusive<u32>>,
    /// 기본 전치 모음
    pub pre_base_vowel: u32,
    /// 같은 방식으로 재배열되는 추가 전치 모음 (샨 ႄ)
    alternate_pre_base_vowels: Vec<u32>,
    pub virama: u32,
    other_diacritics: Vec<u32>,
    digits: Vec<RangeInclusive<u32>>,
    word_separators: Vec<u32>,
    pub medial_policy: MedialPolicy,
    pub post_swap_marks: Vec<PostSwapMark>,
    pub zwsp_policy: ZwspPolicy,
    pub autocorrect: AutocorrectTable,
    currency_symbol: Vec<u32>,
}

/// 기본 단어 구분자: 공백, 줄바꿈, ASCII 구두점, 미얀마 구두점
const WORD_SEPARATORS: &[u32] = &[
    0x20, 0x0A, 0x09, 0x2E, 0x2C, 0x3B, 0x3A, 0x21, 0x3F, 0x27, 0x22, 0x28, 0x29,
    LITTLE_SECTION, SECTION,
];

fn in_ranges(ranges: &[RangeInclusive<u32>], code: u32) -> bool {
    ranges.iter().any(|r| r.contains(&code))
}

impl ScriptProfile {
    /// 코드포인트 분류 (프로파일과 코드포인트만으로 결정되는 순수 함수)
    pub fn classify(&self, code: u32) -> CodePointClass {
        if self.is_pre_base_vowel(code) {
            CodePointClass::PreBaseVowel
        } else if code == self.virama {
            CodePointClass::Virama
        } else if self.is_consonant(code) {
            CodePointClass::Consonant
        } else if self.is_medial(code) {
            CodePointClass::Medial
        } else if self.other_diacritics.contains(&code) {
            CodePointClass::ToneOrOther
        } else if self.is_digit(code) {
            CodePointClass::Digit
        } else if self.is_word_separator(code) {
            CodePointClass::Separator
        } else {
            CodePointClass::Other
        }
    }

    pub fn is_consonant(&self, code: u32) -> bool {
        in_ranges(&self.consonants, code)
    }

    pub fn is_medial(&self, code: u32) -> bool {
        in_ranges(&self.medials, code)
    }

    pub fn is_pre_base_vowel(&self, code: u32) -> bool {
        code == self.pre_base_vowel || self.alternate_pre_base_vowels.contains(&code)
    }

    pub fn is_digit(&self, code: u32) -> bool {
        (0x30..=0x39).contains(&code) || in_ranges(&self.digits, code)
    }

    pub fn is_word_separator(&self, code: u32) -> bool {
        self.word_separators.contains(&code)
    }

    /// 이 값이 들어오면 재배열 상태를 초기화해야 하는지 (기타 기호, 숫자, 구분자)
    pub fn is_reset_trigger(&self, code: u32) -> bool {
        matches!(
            self.classify(code),
            CodePointClass::ToneOrOther | CodePointClass::Digit | CodePointClass::Separator
        )
    }

    /// 전치 모음 바로 앞이 `before`일 때 앞으로 옮길 수 있는 기호인지
    pub fn moves_before_vowel(&self, mark: u32, before: u32) -> bool {
        self.post_swap_marks.iter().any(|m| {
            m.mark == mark
                && match m.after {
                    Some(after) => after == before,
                    None => self.is_consonant(before) || self.is_medial(before),
                }
        })
    }

    pub fn is_post_swap_mark(&self, code: u32) -> bool {
        self.post_swap_marks.iter().any(|m| m.mark == code)
    }

    /// 화폐 단위 문자열 (없으면 빈 문자열)
    pub fn currency_symbol(&self) -> String {
        to_text(&self.currency_symbol)
    }
}

lazy_static! {
    static ref BAMAR: ScriptProfile = ScriptProfile {
        kind: ScriptKind::Bamar,
        consonants: vec![KA..=A],
        medials: vec![YA_MEDIAL..=HA_MEDIAL],
        pre_base_vowel: E_VOWEL,
        alternate_pre_base_vowels: Vec::new(),
        virama: VIRAMA,
        other_diacritics: vec![TALL_AA, AA, DOT_BELOW, VISARGA],
        digits: vec![DIGIT_ZERO..=DIGIT_NINE],
        word_separators: WORD_SEPARATORS.to_vec(),
        medial_policy: MedialPolicy {
            max_medials: 3,
            terminal: Some(HA_MEDIAL),
            penultimate: Some(WA_MEDIAL),
            exclusive: Some((YA_MEDIAL, RA_MEDIAL)),
            single_slot: None,
        },
        post_swap_marks: Vec::new(),
        zwsp_policy: ZwspPolicy::UnlessStacked,
        autocorrect: AutocorrectTable::standard(),
        currency_symbol: vec![KA, YA_MEDIAL, PA, ASAT],
    };

    static ref MON: ScriptProfile = ScriptProfile {
        kind: ScriptKind::Mon,
        consonants: vec![KA..=A, MON_NGA_BLOCK_START..=MON_NGA_BLOCK_END],
        medials: vec![YA_MEDIAL..=HA_MEDIAL, KAREN_MEDIAL..=KAREN_MEDIAL_3],
        pre_base_vowel: E_VOWEL,
        alternate_pre_base_vowels: Vec::new(),
        virama: VIRAMA,
        other_diacritics: vec![TALL_AA, AA, DOT_BELOW, VISARGA],
        digits: vec![DIGIT_ZERO..=DIGIT_NINE],
        word_separators: WORD_SEPARATORS.to_vec(),
        medial_policy: MedialPolicy {
            max_medials: 3,
            terminal: Some(HA_MEDIAL),
            penultimate: Some(WA_MEDIAL),
            exclusive: Some((YA_MEDIAL, RA_MEDIAL)),
            single_slot: Some(KAREN_MEDIAL..=KAREN_MEDIAL_3),
        },
        post_swap_marks: Vec::new(),
        zwsp_policy: ZwspPolicy::AfterConsonant,
        autocorrect: AutocorrectTable::standard(),
        currency_symbol: vec![DA, VIRAMA, KA, E_VOWEL, WA, ASAT],
    };

    static ref SHAN: ScriptProfile = ScriptProfile {
        kind: ScriptKind::Shan,
        consonants: vec![KA..=SHAN_A, SHAN_KA..=SHAN_HA],
        medials: vec![YA_MEDIAL..=RA_MEDIAL],
        pre_base_vowel: E_VOWEL,
        alternate_pre_base_vowels: vec![SHAN_E],
        virama: VIRAMA,
        other_diacritics: vec![TALL_AA, AA, DOT_BELOW, VISARGA],
        digits: vec![DIGIT_ZERO..=DIGIT_NINE, SHAN_DIGIT_ZERO..=SHAN_DIGIT_NINE],
        word_separators: WORD_SEPARATORS.to_vec(),
        medial_policy: MedialPolicy {
            max_medials: 1,
            terminal: None,
            penultimate: None,
            exclusive: None,
            single_slot: None,
        },
        // ၵ + ် 는 ႄ 앞으로
        post_swap_marks: vec![PostSwapMark { mark: ASAT, after: None }],
        zwsp_policy: ZwspPolicy::Always,
        autocorrect: AutocorrectTable::new(vec![
            AutocorrectRule::swap(ASAT, SHAN_MEDIAL_WA),
            AutocorrectRule::swap(SHAN_TONE_2, COUNCIL_TONE_2),
            AutocorrectRule::swap(UU_VOWEL, I_VOWEL),
            AutocorrectRule::swap(U_VOWEL, I_VOWEL),
        ]),
        currency_symbol: vec![PA, YA_MEDIAL, SHAN_VOWEL_AA, VISARGA],
    };

    static ref KAREN: ScriptProfile = ScriptProfile {
        kind: ScriptKind::Karen,
        consonants: vec![KA..=A, KAREN_SHA..=KAREN_SHA, MON_NGA..=MON_BBA],
        medials: vec![YA_MEDIAL..=HA_MEDIAL, KAREN_MEDIAL..=KAREN_MEDIAL_3],
        pre_base_vowel: E_VOWEL,
        alternate_pre_base_vowels: Vec::new(),
        virama: VIRAMA,
        other_diacritics: vec![TALL_AA, AA, DOT_BELOW, VISARGA],
        digits: vec![DIGIT_ZERO..=DIGIT_NINE],
        word_separators: WORD_SEPARATORS.to_vec(),
        medial_policy: MedialPolicy {
            max_medials: 1,
            terminal: None,
            penultimate: None,
            exclusive: None,
            single_slot: None,
        },
        // ှ + ် 는 ေ 앞으로
        post_swap_marks: vec![PostSwapMark {
            mark: ASAT,
            after: Some(HA_MEDIAL),
        }],
        zwsp_policy: ZwspPolicy::AfterConsonantOrMedial,
        autocorrect: AutocorrectTable::new(vec![
            AutocorrectRule::swap(U_VOWEL, ASAT),
            AutocorrectRule::new(GHA, HA_MEDIAL, 1, &[MON_BBA]),
            AutocorrectRule::new(HA, HA_MEDIAL, 1, &[MON_JHA]),
        ]),
        currency_symbol: Vec::new(),
    };
}
