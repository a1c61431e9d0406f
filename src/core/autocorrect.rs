//! 자동 교정 테이블
//!
//! 직전 글자와 입력 글자 두 개로 결정되는 고정 치환 규칙입니다.
//! 재배열보다 먼저 검사하며, 처음 일치한 규칙 하나만 적용합니다.

use crate::core::unicode::*;

/// 자동 교정 규칙 하나
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutocorrectRule {
    /// 커서 앞 글자
    pub context: u32,
    /// 입력 글자
    pub incoming: u32,
    /// 커서 앞에서 지울 글자 수
    pub delete_count: usize,
    /// 대신 출력할 코드포인트
    pub replacement: Vec<u32>,
}

impl AutocorrectRule {
    pub fn new(context: u32, incoming: u32, delete_count: usize, replacement: &[u32]) -> Self {
        Self {
            context,
            incoming,
            delete_count,
            replacement: replacement.to_vec(),
        }
    }

    /// 두 글자의 순서만 바꾸는 규칙 (context + incoming -> incoming + context)
    pub fn swap(context: u32, incoming: u32) -> Self {
        Self::new(context, incoming, 1, &[incoming, context])
    }
}

/// 자동 교정 적용 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    pub delete_count: usize,
    pub replacement: String,
}

/// 순서가 있는 자동 교정 규칙 집합
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutocorrectTable {
    rules: Vec<AutocorrectRule>,
}

impl AutocorrectTable {
    pub fn new(rules: Vec<AutocorrectRule>) -> Self {
        Self { rules }
    }

    /// 버마어/몬어 공통 규칙
    pub fn standard() -> Self {
        Self::new(vec![
            // ံ + ု -> ု + ံ
            AutocorrectRule::swap(ANUSVARA, U_VOWEL),
            // စ + ျ -> ဈ
            AutocorrectRule::new(CA, YA_MEDIAL, 1, &[JHA]),
            // ဥ + ာ -> ည + ာ
            AutocorrectRule::new(U, AA, 1, &[NYA, AA]),
            // ဥ + ီ -> ဦ
            AutocorrectRule::new(U, II_VOWEL, 1, &[UU]),
            // ဥ + ် -> ည + ်
            AutocorrectRule::new(U, ASAT, 1, &[NYA, ASAT]),
            // ် + ့ -> ့ + ်
            AutocorrectRule::swap(ASAT, DOT_BELOW),
            // သ + ြ -> ဩ
            AutocorrectRule::new(SA, RA_MEDIAL, 1, &[O]),
        ])
    }

    pub fn rules(&self) -> &[AutocorrectRule] {
        &self.rules
    }

    /// 규칙 검사 (일치하는 규칙이 없으면 None -> 재배열 단계로 넘김)
    pub fn apply(&self, last: u32, incoming: u32) -> Option<Correction> {
        self.rules
            .iter()
            .find(|rule| rule.context == last && rule.incoming == incoming)
            .map(|rule| Correction {
                delete_count: rule.delete_count,
                replacement: to_text(&rule.replacement),
            })
    }
}
