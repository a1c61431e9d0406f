//! 키 입력 재배열 엔진
//!
//! 입력 순서(전치 모음 → 자음)를 유니코드 저장 순서(자음 → 전치 모음)로 바꿉니다.
//! 한 번의 키 입력을 처리하고, 커서 앞에서 지울 글자 수와 출력할 텍스트를 반환합니다.

use crate::core::medial;
use crate::core::profile::{CodePointClass, ScriptProfile, ZwspPolicy};
use crate::core::state::EngineState;
use crate::core::unicode::{to_text, ZWSP};

/// 키 입력 처리 결과
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitResult {
    /// 출력 전에 커서 앞에서 지울 UTF-16 유닛 수
    pub delete_count_before: usize,
    /// 출력할 텍스트
    pub text: String,
}

impl EmitResult {
    /// 입력 글자를 그대로 출력
    pub fn pass(code: u32) -> Self {
        Self::replace(0, &[code])
    }

    pub fn replace(delete_count_before: usize, code_points: &[u32]) -> Self {
        Self {
            delete_count_before,
            text: to_text(code_points),
        }
    }
}

/// 재배열 엔진 (상태는 `EngineState`에만 보관)
pub struct ReorderingEngine;

impl ReorderingEngine {
    /// 키 입력 하나 처리
    ///
    /// - context: 커서 앞 텍스트 (최대 3 유닛, 마지막 원소가 커서 바로 앞)
    ///
    /// 자동 교정 규칙이 일치하지 않았을 때만 호출됩니다.
    pub fn process(
        profile: &ScriptProfile,
        state: &mut EngineState,
        incoming: u32,
        context: &[u16],
    ) -> EmitResult {
        // 필드 시작: 재배열할 문맥 없음
        let last = match context.last() {
            Some(&unit) => u32::from(unit),
            None => {
                state.reset();
                return EmitResult::pass(incoming);
            }
        };

        let class = profile.classify(incoming);

        // 전치 모음: 새 재배열 문맥 시작
        if class == CodePointClass::PreBaseVowel {
            state.reset();
            if needs_zwsp(profile, context) {
                log::debug!("전치 모음 U+{:04X}: ZWSP 추가", incoming);
                return EmitResult::replace(0, &[ZWSP, incoming]);
            }
            return EmitResult::pass(incoming);
        }

        // 자음 + 전치 모음 뒤 비라마: 아래 자음 대기
        if class == CodePointClass::Virama && state.pending_consonant_swap {
            state.pending_consonant_swap = false;
            state.pending_virama_after_vowel = true;
            return EmitResult::pass(incoming);
        }

        if state.pending_virama_after_vowel {
            state.pending_virama_after_vowel = false;
            if class == CodePointClass::Consonant {
                // [자음, 전치 모음, 비라마] + 자음 -> [자음, 비라마, 자음, 전치 모음]
                let vowel = vowel_before_virama(profile, context);
                state.pending_consonant_swap = true;
                log::debug!("겹자음 재배열: U+{:04X}", incoming);
                return EmitResult::replace(2, &[profile.virama, incoming, vowel]);
            }
        }

        if matches!(
            class,
            CodePointClass::ToneOrOther | CodePointClass::Digit | CodePointClass::Separator
        ) {
            state.reset();
            return EmitResult::pass(incoming);
        }

        // 직전 글자가 전치 모음이 아니면 재배열 없음
        if !profile.is_pre_base_vowel(last) {
            return EmitResult::pass(incoming);
        }

        match class {
            CodePointClass::Consonant => {
                if state.pending_consonant_swap {
                    // 자음 + 전치 모음 + 자음: 두 번째 자음은 그대로
                    state.pending_consonant_swap = false;
                    state.pending_medial_swap = false;
                    state.medial_stack.clear();
                    EmitResult::pass(incoming)
                } else {
                    state.pending_consonant_swap = true;
                    swap_with_vowel(incoming, last, context)
                }
            }
            CodePointClass::Medial => {
                if !medial::accept(&profile.medial_policy, state, incoming) {
                    log::debug!("메디얼 U+{:04X} 거부: 재배열 없음", incoming);
                    return EmitResult::pass(incoming);
                }
                if state.push_medial(incoming).is_err() {
                    return EmitResult::pass(incoming);
                }
                swap_with_vowel(incoming, last, context)
            }
            // 재배열된 자음 뒤의 기호: [ၵ, ႄ] + ် -> [ၵ, ်, ႄ]
            _ if state.pending_consonant_swap
                && unit_before_vowel(context)
                    .is_some_and(|before| profile.moves_before_vowel(incoming, before)) =>
            {
                swap_with_vowel(incoming, last, context)
            }
            _ => EmitResult::pass(incoming),
        }
    }
}

/// 커서 바로 앞 전치 모음의 앞 글자
fn unit_before_vowel(context: &[u16]) -> Option<u32> {
    context
        .len()
        .checked_sub(2)
        .map(|i| u32::from(context[i]))
}

/// 전치 모음(과 그 앞 ZWSP)을 지우고 [입력, 전치 모음] 출력
fn swap_with_vowel(incoming: u32, vowel: u32, context: &[u16]) -> EmitResult {
    let delete = if preceded_by_zwsp(context) { 2 } else { 1 };
    log::debug!(
        "재배열: U+{:04X} 를 U+{:04X} 앞으로 ({}글자 삭제)",
        incoming,
        vowel,
        delete
    );
    EmitResult::replace(delete, &[incoming, vowel])
}

/// 커서 바로 앞 글자(전치 모음) 앞에 ZWSP가 있는지
fn preceded_by_zwsp(context: &[u16]) -> bool {
    context.len() >= 2 && u32::from(context[context.len() - 2]) == ZWSP
}

/// 비라마 앞의 전치 모음 (없으면 기본 전치 모음)
fn vowel_before_virama(profile: &ScriptProfile, context: &[u16]) -> u32 {
    unit_before_vowel(context)
        .filter(|&cp| profile.is_pre_base_vowel(cp))
        .unwrap_or(profile.pre_base_vowel)
}

fn needs_zwsp(profile: &ScriptProfile, context: &[u16]) -> bool {
    let last = context.last().map(|&u| u32::from(u));
    match profile.zwsp_policy {
        ZwspPolicy::Always => true,
        ZwspPolicy::UnlessStacked => {
            let n = context.len();
            !(n >= 2
                && profile.is_consonant(u32::from(context[n - 2]))
                && u32::from(context[n - 1]) == profile.virama)
        }
        ZwspPolicy::AfterConsonant => last.is_some_and(|cp| profile.is_consonant(cp)),
        ZwspPolicy::AfterConsonantOrMedial => {
            last.is_some_and(|cp| profile.is_consonant(cp) || profile.is_medial(cp))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::ScriptKind;
    use crate::core::unicode::*;

    fn units(code_points: &[u32]) -> Vec<u16> {
        code_points.iter().map(|&cp| cp as u16).collect()
    }

    fn bamar(state: &mut EngineState, incoming: u32, context: &[u32]) -> EmitResult {
        ReorderingEngine::process(
            ScriptKind::Bamar.profile(),
            state,
            incoming,
            &units(context),
        )
    }

    #[test]
    fn test_empty_context_passes_through() {
        let mut state = EngineState::new();
        state.pending_consonant_swap = true;
        let r = bamar(&mut state, E_VOWEL, &[]);
        assert_eq!(r, EmitResult::pass(E_VOWEL));
        assert!(state.is_idle());
    }

    #[test]
    fn test_vowel_gets_zwsp_prefix() {
        let mut state = EngineState::new();
        let r = bamar(&mut state, E_VOWEL, &[' ' as u32]);
        assert_eq!(r.text, "\u{200B}\u{1031}");
        assert_eq!(r.delete_count_before, 0);
    }

    #[test]
    fn test_vowel_after_stacking_virama_has_no_zwsp() {
        let mut state = EngineState::new();
        let r = bamar(&mut state, E_VOWEL, &[KA, VIRAMA]);
        assert_eq!(r.text, "\u{1031}");
    }

    #[test]
    fn test_consonant_swaps_with_vowel() {
        let mut state = EngineState::new();
        let r = bamar(&mut state, KA, &[E_VOWEL]);
        assert_eq!(r, EmitResult::replace(1, &[KA, E_VOWEL]));
        assert!(state.pending_consonant_swap);
    }

    #[test]
    fn test_consonant_swap_removes_zwsp() {
        let mut state = EngineState::new();
        let r = bamar(&mut state, KA, &[' ' as u32, ZWSP, E_VOWEL]);
        assert_eq!(r, EmitResult::replace(2, &[KA, E_VOWEL]));
    }

    #[test]
    fn test_second_consonant_is_not_swapped() {
        let mut state = EngineState::new();
        state.pending_consonant_swap = true;
        let r = bamar(&mut state, 0x1001, &[KA, E_VOWEL]);
        assert_eq!(r, EmitResult::pass(0x1001));
        assert!(state.is_idle());
    }

    #[test]
    fn test_medial_swap() {
        let mut state = EngineState::new();
        state.pending_consonant_swap = true;
        let r = bamar(&mut state, YA_MEDIAL, &[KA, E_VOWEL]);
        assert_eq!(r, EmitResult::replace(1, &[YA_MEDIAL, E_VOWEL]));
        assert!(state.pending_medial_swap);
        assert_eq!(state.medial_stack.as_slice(), &[YA_MEDIAL]);
    }

    #[test]
    fn test_rejected_medial_passes_through() {
        let mut state = EngineState::new();
        state.pending_consonant_swap = true;
        state.push_medial(HA_MEDIAL).unwrap();
        let before = state.clone();

        for candidate in [YA_MEDIAL, RA_MEDIAL] {
            let r = bamar(&mut state, candidate, &[KA, HA_MEDIAL, E_VOWEL]);
            assert_eq!(r, EmitResult::pass(candidate));
            assert_eq!(state, before);
        }
    }

    #[test]
    fn test_medial_without_consonant_passes_through() {
        let mut state = EngineState::new();
        let r = bamar(&mut state, YA_MEDIAL, &[E_VOWEL]);
        assert_eq!(r, EmitResult::pass(YA_MEDIAL));
        assert_eq!(state.medial_count(), 0);
    }

    #[test]
    fn test_virama_pipeline() {
        let mut state = EngineState::new();
        state.pending_consonant_swap = true;

        let r = bamar(&mut state, VIRAMA, &[KA, E_VOWEL]);
        assert_eq!(r, EmitResult::pass(VIRAMA));
        assert!(state.pending_virama_after_vowel);
        assert!(!state.pending_consonant_swap);

        let r = bamar(&mut state, 0x1001, &[KA, E_VOWEL, VIRAMA]);
        assert_eq!(r, EmitResult::replace(2, &[VIRAMA, 0x1001, E_VOWEL]));
        assert!(state.pending_consonant_swap);
        assert!(!state.pending_virama_after_vowel);
    }

    #[test]
    fn test_virama_pipeline_cancelled_by_non_consonant() {
        let mut state = EngineState::new();
        state.pending_virama_after_vowel = true;
        let r = bamar(&mut state, U_VOWEL, &[KA, E_VOWEL, VIRAMA]);
        assert_eq!(r, EmitResult::pass(U_VOWEL));
        assert!(!state.pending_virama_after_vowel);
    }

    #[test]
    fn test_other_diacritic_resets() {
        let mut state = EngineState::new();
        state.pending_consonant_swap = true;
        state.push_medial(WA_MEDIAL).unwrap();
        let r = bamar(&mut state, AA, &[KA, WA_MEDIAL, E_VOWEL]);
        assert_eq!(r, EmitResult::pass(AA));
        assert!(state.is_idle());
    }

    #[test]
    fn test_no_vowel_context_keeps_flags() {
        let mut state = EngineState::new();
        state.pending_consonant_swap = true;
        let r = bamar(&mut state, U_VOWEL, &[KA]);
        assert_eq!(r, EmitResult::pass(U_VOWEL));
        assert!(state.pending_consonant_swap);
    }

    #[test]
    fn test_shan_vowel_is_reemitted() {
        let mut state = EngineState::new();
        let r = ReorderingEngine::process(
            ScriptKind::Shan.profile(),
            &mut state,
            SHAN_KA,
            &units(&[ZWSP, SHAN_E]),
        );
        assert_eq!(r, EmitResult::replace(2, &[SHAN_KA, SHAN_E]));
    }

    #[test]
    fn test_shan_asat_moves_before_vowel() {
        let shan = ScriptKind::Shan.profile();
        let mut state = EngineState::new();
        state.pending_consonant_swap = true;
        let r = ReorderingEngine::process(shan, &mut state, ASAT, &units(&[SHAN_KA, SHAN_E]));
        assert_eq!(r, EmitResult::replace(1, &[ASAT, SHAN_E]));
        assert!(state.pending_consonant_swap);

        // 재배열된 자음이 없으면 그대로
        let mut state = EngineState::new();
        let r = ReorderingEngine::process(shan, &mut state, ASAT, &units(&[SHAN_KA, SHAN_E]));
        assert_eq!(r, EmitResult::pass(ASAT));
    }

    #[test]
    fn test_karen_asat_needs_ha_medial() {
        let karen = ScriptKind::Karen.profile();
        let mut state = EngineState::new();
        state.pending_consonant_swap = true;
        state.push_medial(HA_MEDIAL).unwrap();
        let r = ReorderingEngine::process(
            karen,
            &mut state,
            ASAT,
            &units(&[KA, HA_MEDIAL, E_VOWEL]),
        );
        assert_eq!(r, EmitResult::replace(1, &[ASAT, E_VOWEL]));
        assert_eq!(state.medial_stack.as_slice(), &[HA_MEDIAL]);

        let mut state = EngineState::new();
        state.pending_consonant_swap = true;
        let r = ReorderingEngine::process(karen, &mut state, ASAT, &units(&[KA, E_VOWEL]));
        assert_eq!(r, EmitResult::pass(ASAT));
    }

    #[test]
    fn test_bamar_asat_is_not_moved() {
        let mut state = EngineState::new();
        state.pending_consonant_swap = true;
        let r = bamar(&mut state, ASAT, &[KA, E_VOWEL]);
        assert_eq!(r, EmitResult::pass(ASAT));
    }

    #[test]
    fn test_mon_medials_share_one_slot() {
        let mon = ScriptKind::Mon.profile();
        let mut state = EngineState::new();
        state.pending_consonant_swap = true;
        let r = ReorderingEngine::process(mon, &mut state, KAREN_MEDIAL, &units(&[KA, E_VOWEL]));
        assert_eq!(r, EmitResult::replace(1, &[KAREN_MEDIAL, E_VOWEL]));

        let before = state.clone();
        let r = ReorderingEngine::process(
            mon,
            &mut state,
            0x105F,
            &units(&[KA, KAREN_MEDIAL, E_VOWEL]),
        );
        assert_eq!(r, EmitResult::pass(0x105F));
        assert_eq!(state, before);
    }

    #[test]
    fn test_mon_zwsp_only_after_consonant() {
        let mon = ScriptKind::Mon.profile();
        let mut state = EngineState::new();
        let r = ReorderingEngine::process(mon, &mut state, E_VOWEL, &units(&[' ' as u32]));
        assert_eq!(r.text, "\u{1031}");
        let r = ReorderingEngine::process(mon, &mut state, E_VOWEL, &units(&[KA]));
        assert_eq!(r.text, "\u{200B}\u{1031}");
    }
}
