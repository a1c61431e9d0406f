//! 클러스터 삭제 엔진
//!
//! 백스페이스 한 번에 재배열 단위 하나를 되돌리고,
//! 그 키 입력이 없었던 것처럼 엔진 상태를 복구합니다.

use crate::core::medial::{self, MedialStack};
use crate::core::profile::ScriptProfile;
use crate::core::state::EngineState;
use crate::core::unicode::{is_high_surrogate, is_surrogate, to_text, ZWSP};
use crate::platform::text_buffer::TextBuffer;

/// 상태 복구에 읽는 커서 앞 글자 수
/// (메디얼 최대 개수 + 자음 + 옮긴 기호 + 전치 모음 + 여유 한 글자)
const REPLAY_WINDOW: usize = medial::MAX_MEDIALS + 4;

/// 백스페이스 처리기
pub struct ClusterDeletionEngine;

impl ClusterDeletionEngine {
    /// 백스페이스 한 번 처리
    /// 커서가 필드 끝이면 한 단계 삭제, 중간이면 클러스터 전체 삭제
    pub fn delete_one<B: TextBuffer + ?Sized>(
        profile: &ScriptProfile,
        state: &mut EngineState,
        buffer: &mut B,
    ) {
        if buffer.is_at_end_of_field() {
            Self::delete_at_end(profile, state, buffer);
        } else {
            Self::delete_cluster(profile, state, buffer);
        }
    }

    /// 필드 끝에서의 한 단계 삭제
    pub fn delete_at_end<B: TextBuffer + ?Sized>(
        profile: &ScriptProfile,
        state: &mut EngineState,
        buffer: &mut B,
    ) {
        let tail = buffer.peek_before(1);
        let first = match tail.first() {
            Some(&unit) => unit,
            None => {
                log::trace!("삭제할 텍스트 없음");
                state.reset();
                return;
            }
        };

        if !profile.is_pre_base_vowel(u32::from(first)) {
            delete_unit(buffer, first);
            *state = recover_state(profile, &*buffer);
            return;
        }

        let vowel = u32::from(first);
        state.reset();

        let two = buffer.peek_before(2);
        let second = if two.len() == 2 {
            Some(u32::from(two[0]))
        } else {
            None
        };

        match second {
            Some(cp) if profile.is_medial(cp) => {
                match replay_medials(profile, &units_before_vowel(&*buffer)) {
                    Some(rebuilt) => {
                        // [.., 메디얼, 전치 모음] -> [.., 전치 모음]
                        *state = rebuilt;
                        replace_before_vowel(buffer, 2, vowel);
                        state.pop_medial();
                        log::debug!(
                            "메디얼 U+{:04X} 삭제, 남은 메디얼 [{}]",
                            cp,
                            describe_stack(&state.medial_stack)
                        );
                    }
                    None => {
                        buffer.delete_before(1);
                    }
                }
            }
            Some(cp) if profile.is_consonant(cp) => {
                let three = buffer.peek_before(3);
                let stacked = three.len() == 3 && u32::from(three[0]) == profile.virama;
                // 겹자음이면 비라마까지 함께 삭제
                let count = if stacked { 3 } else { 2 };
                if buffer.peek_before(count + 1).len() == count {
                    // 필드 시작: 전치 모음만 남기지 않고 재배열 전체를 되돌림
                    buffer.delete_before(count);
                    log::debug!("필드 시작의 재배열 U+{:04X} 삭제", cp);
                } else {
                    replace_before_vowel(buffer, count, vowel);
                    log::debug!("전치 모음 앞 자음 U+{:04X} 삭제 ({}글자)", cp, count);
                }
            }
            Some(cp) if profile.is_post_swap_mark(cp) => {
                if rebuild_before_vowel(profile, &units_before_vowel(&*buffer)).is_some() {
                    // [.., 자음/메디얼, 기호, 전치 모음] -> [.., 자음/메디얼, 전치 모음]
                    replace_before_vowel(buffer, 2, vowel);
                    *state = recover_state(profile, &*buffer);
                    log::debug!("전치 모음 앞 기호 U+{:04X} 삭제", cp);
                } else {
                    buffer.delete_before(1);
                }
            }
            Some(cp) if cp == ZWSP => {
                buffer.delete_before(2);
            }
            _ => {
                buffer.delete_before(1);
            }
        }
    }

    /// 커서가 필드 중간일 때 클러스터 단위 삭제
    ///
    /// 자음이나 단어 구분자를 만날 때까지 뒤로 검색하고 그 지점까지 지웁니다.
    /// 경계 자음 앞이 비라마면 비라마까지 함께 지웁니다.
    pub fn delete_cluster<B: TextBuffer + ?Sized>(
        profile: &ScriptProfile,
        state: &mut EngineState,
        buffer: &mut B,
    ) {
        state.reset();

        let tail = buffer.peek_before(1);
        let mut current = match tail.first() {
            Some(&unit) => unit,
            None => return,
        };

        if is_surrogate(current) {
            delete_unit(buffer, current);
            return;
        }

        let is_boundary =
            |unit: u16| profile.is_consonant(u32::from(unit)) || profile.is_word_separator(u32::from(unit));

        let mut i = 1;
        let mut before_len = 0;
        let mut current_len = 1;
        while !is_boundary(current) && before_len != current_len {
            i += 1;
            before_len = current_len;
            let text = buffer.peek_before(i);
            current_len = text.len();
            current = text.first().copied().unwrap_or(0);
        }

        if before_len == current_len {
            // 필드 시작까지 경계 없음
            buffer.delete_before(1);
            return;
        }

        let wider = buffer.peek_before(i + 1);
        let stacked = profile.is_consonant(u32::from(current))
            && wider.len() == i + 1
            && u32::from(wider[0]) == profile.virama;
        let count = if stacked { i + 1 } else { i };
        log::debug!("클러스터 삭제: {}글자", count);
        buffer.delete_before(count);
    }
}

/// UTF-16 유닛 하나 삭제 (서로게이트 쌍이면 두 유닛)
fn delete_unit<B: TextBuffer + ?Sized>(buffer: &mut B, last: u16) {
    if is_surrogate(last) {
        let pair = buffer.peek_before(2);
        if pair.len() == 2 && is_high_surrogate(pair[0]) {
            buffer.delete_before(2);
            return;
        }
    }
    buffer.delete_before(1);
}

/// 전치 모음 포함 count개를 지우고 전치 모음만 다시 출력
fn replace_before_vowel<B: TextBuffer + ?Sized>(buffer: &mut B, count: usize, vowel: u32) {
    buffer.delete_before(count);
    buffer.commit(&to_text(&[vowel]));
}

/// 커서 앞 전치 모음을 뺀 나머지 (상태 복구용 창)
fn units_before_vowel<B: TextBuffer + ?Sized>(buffer: &B) -> Vec<u16> {
    let mut window = buffer.peek_before(REPLAY_WINDOW);
    window.pop();
    window
}

/// 전치 모음 앞 글자들(before)로 재배열 직후의 상태를 다시 만듦
///
/// 앞으로 옮긴 기호(샨어 ်, 카렌어 ှ + ်)는 건너뛰고 그 앞을 봅니다.
/// 재배열된 자음이 없으면 None.
fn rebuild_before_vowel(profile: &ScriptProfile, before: &[u16]) -> Option<EngineState> {
    let (&last, rest) = before.split_last()?;
    let last = u32::from(last);

    if profile.is_post_swap_mark(last) {
        let &prev = rest.last()?;
        if !profile.moves_before_vowel(last, u32::from(prev)) {
            return None;
        }
        return rebuild_before_vowel(profile, rest);
    }
    if profile.is_consonant(last) {
        let mut state = EngineState::new();
        state.pending_consonant_swap = true;
        return Some(state);
    }
    if profile.is_medial(last) {
        return replay_medials(profile, before);
    }
    None
}

/// [자음, 메디얼..]을 읽어 메디얼 스택을 다시 쌓음
///
/// 자음까지 거슬러 올라가지 못하거나 유효하지 않은 메디얼 순서면 None.
fn replay_medials(profile: &ScriptProfile, before: &[u16]) -> Option<EngineState> {
    let mut collected = Vec::with_capacity(medial::MAX_MEDIALS);
    let mut base = None;
    for &unit in before.iter().rev() {
        let cp = u32::from(unit);
        if profile.is_medial(cp) {
            collected.push(cp);
        } else {
            if profile.is_consonant(cp) {
                base = Some(cp);
            }
            break;
        }
    }
    base?;

    let mut state = EngineState::new();
    state.pending_consonant_swap = true;
    for &m in collected.iter().rev() {
        if !medial::accept(&profile.medial_policy, &state, m) {
            log::debug!("메디얼 재생 실패: U+{:04X}", m);
            return None;
        }
        state.push_medial(m).ok()?;
    }
    Some(state)
}

/// 한 글자 삭제 후 커서 앞 텍스트로부터 상태 복구
///
/// 커서 앞이 전치 모음이고 그 앞에 재배열된 자음(또는 메디얼)이 있으면
/// 자음을 입력한 직후의 상태로 되돌립니다.
fn recover_state<B: TextBuffer + ?Sized>(profile: &ScriptProfile, buffer: &B) -> EngineState {
    let window = buffer.peek_before(REPLAY_WINDOW);
    match window.split_last() {
        Some((&vowel, before)) if profile.is_pre_base_vowel(u32::from(vowel)) => {
            rebuild_before_vowel(profile, before).unwrap_or_default()
        }
        _ => EngineState::new(),
    }
}

/// 메디얼 스택 스냅샷 (디버그용)
pub fn describe_stack(stack: &MedialStack) -> String {
    stack
        .as_slice()
        .iter()
        .map(|m| format!("U+{:04X}", m))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::ScriptKind;
    use crate::core::unicode::*;
    use crate::platform::text_buffer::CursorBuffer;

    fn buffer(code_points: &[u32]) -> CursorBuffer {
        CursorBuffer::from_text(&to_text(code_points))
    }

    fn delete(state: &mut EngineState, buf: &mut CursorBuffer) {
        delete_in(ScriptKind::Bamar, state, buf);
    }

    fn delete_in(kind: ScriptKind, state: &mut EngineState, buf: &mut CursorBuffer) {
        ClusterDeletionEngine::delete_one(kind.profile(), state, buf);
    }

    #[test]
    fn test_empty_buffer() {
        let mut state = EngineState::new();
        state.pending_consonant_swap = true;
        let mut buf = CursorBuffer::new();
        delete(&mut state, &mut buf);
        assert_eq!(buf.text(), "");
        assert!(state.is_idle());
    }

    #[test]
    fn test_undo_consonant_swap() {
        let mut state = EngineState::new();
        state.pending_consonant_swap = true;
        let mut buf = buffer(&[' ' as u32, KA, E_VOWEL]);
        delete(&mut state, &mut buf);
        assert_eq!(buf.text(), " \u{1031}");
        assert!(state.is_idle());
    }

    #[test]
    fn test_undo_consonant_swap_at_field_start() {
        let mut state = EngineState::new();
        state.pending_consonant_swap = true;
        let mut buf = buffer(&[KA, E_VOWEL]);
        delete(&mut state, &mut buf);
        assert_eq!(buf.text(), "");
        assert!(state.is_idle());
    }

    #[test]
    fn test_undo_stacked_consonant() {
        let mut state = EngineState::new();
        state.pending_consonant_swap = true;
        let mut buf = buffer(&[KA, VIRAMA, 0x1001, E_VOWEL]);
        delete(&mut state, &mut buf);
        assert_eq!(buf.text(), "\u{1000}\u{1031}");
        assert!(state.is_idle());
    }

    #[test]
    fn test_undo_medial_swap() {
        let mut state = EngineState::new();
        let mut buf = buffer(&[KA, YA_MEDIAL, WA_MEDIAL, E_VOWEL]);
        delete(&mut state, &mut buf);
        assert_eq!(buf.text(), "\u{1000}\u{103B}\u{1031}");
        assert!(state.pending_consonant_swap);
        assert!(state.pending_medial_swap);
        assert_eq!(state.medial_stack.as_slice(), &[YA_MEDIAL]);

        delete(&mut state, &mut buf);
        assert_eq!(buf.text(), "\u{1000}\u{1031}");
        assert!(state.pending_consonant_swap);
        assert!(!state.pending_medial_swap);
        assert_eq!(state.medial_count(), 0);
    }

    #[test]
    fn test_medial_without_consonant_deletes_vowel_only() {
        let mut state = EngineState::new();
        let mut buf = buffer(&[' ' as u32, YA_MEDIAL, E_VOWEL]);
        delete(&mut state, &mut buf);
        assert_eq!(buf.text(), " \u{103B}");
        assert!(state.is_idle());
    }

    #[test]
    fn test_vowel_with_zwsp() {
        let mut state = EngineState::new();
        let mut buf = buffer(&[KA, ZWSP, E_VOWEL]);
        delete(&mut state, &mut buf);
        assert_eq!(buf.text(), "\u{1000}");
    }

    #[test]
    fn test_single_delete_restores_swap() {
        // [က, ေ, ာ] 에서 ာ 삭제 -> 자음 재배열 직후 상태
        let mut state = EngineState::new();
        let mut buf = buffer(&[KA, E_VOWEL, AA]);
        delete(&mut state, &mut buf);
        assert_eq!(buf.text(), "\u{1000}\u{1031}");
        assert!(state.pending_consonant_swap);
    }

    #[test]
    fn test_single_delete_rebuilds_medials() {
        let mut state = EngineState::new();
        let mut buf = buffer(&[KA, YA_MEDIAL, HA_MEDIAL, E_VOWEL, VISARGA]);
        delete(&mut state, &mut buf);
        assert_eq!(state.medial_stack.as_slice(), &[YA_MEDIAL, HA_MEDIAL]);
        assert!(state.pending_consonant_swap);
        assert_eq!(describe_stack(&state.medial_stack), "U+103B,U+103E");
    }

    #[test]
    fn test_surrogate_pair_deleted_atomically() {
        let mut state = EngineState::new();
        let mut buf = CursorBuffer::from_text("\u{1000}😀");
        delete(&mut state, &mut buf);
        assert_eq!(buf.text(), "\u{1000}");
    }

    #[test]
    fn test_shan_undo_consonant_swap() {
        let mut state = EngineState::new();
        state.pending_consonant_swap = true;
        let mut buf = buffer(&[' ' as u32, SHAN_KA, SHAN_E]);
        delete_in(ScriptKind::Shan, &mut state, &mut buf);
        // ႄ 그대로 다시 출력
        assert_eq!(buf.text(), " \u{1084}");
        assert!(state.is_idle());
    }

    #[test]
    fn test_shan_undo_medial_swap() {
        let mut state = EngineState::new();
        let mut buf = buffer(&[' ' as u32, SHAN_KA, YA_MEDIAL, SHAN_E]);
        delete_in(ScriptKind::Shan, &mut state, &mut buf);
        assert_eq!(buf.text(), " \u{1075}\u{1084}");
        assert!(state.pending_consonant_swap);
        assert_eq!(state.medial_count(), 0);
    }

    #[test]
    fn test_shan_undo_moved_asat() {
        let mut state = EngineState::new();
        let mut buf = buffer(&[' ' as u32, SHAN_KA, ASAT, SHAN_E]);
        delete_in(ScriptKind::Shan, &mut state, &mut buf);
        assert_eq!(buf.text(), " \u{1075}\u{1084}");
        assert!(state.pending_consonant_swap);
    }

    #[test]
    fn test_mon_undo_mon_medial() {
        let mut state = EngineState::new();
        let mut buf = buffer(&[KA, KAREN_MEDIAL, E_VOWEL]);
        delete_in(ScriptKind::Mon, &mut state, &mut buf);
        assert_eq!(buf.text(), "\u{1000}\u{1031}");
        assert!(state.pending_consonant_swap);
        assert!(!state.pending_medial_swap);
        assert_eq!(state.medial_count(), 0);
    }

    #[test]
    fn test_mon_medial_then_vowel_without_zwsp() {
        // 몬어는 자음 뒤가 아니면 ZWSP가 없음: [공백, ျ, ေ]
        let mut state = EngineState::new();
        let mut buf = buffer(&[' ' as u32, YA_MEDIAL, E_VOWEL]);
        delete_in(ScriptKind::Mon, &mut state, &mut buf);
        assert_eq!(buf.text(), " \u{103B}");
        assert!(state.is_idle());
    }

    #[test]
    fn test_karen_undo_medial_swap() {
        let mut state = EngineState::new();
        let mut buf = buffer(&[' ' as u32, KA, KAREN_MEDIAL, E_VOWEL]);
        delete_in(ScriptKind::Karen, &mut state, &mut buf);
        assert_eq!(buf.text(), " \u{1000}\u{1031}");
        assert!(state.pending_consonant_swap);
        assert_eq!(state.medial_count(), 0);
    }

    #[test]
    fn test_karen_undo_asat_after_ha_medial() {
        let mut state = EngineState::new();
        let mut buf = buffer(&[KA, HA_MEDIAL, ASAT, E_VOWEL]);
        delete_in(ScriptKind::Karen, &mut state, &mut buf);
        assert_eq!(buf.text(), "\u{1000}\u{103E}\u{1031}");
        assert!(state.pending_consonant_swap);
        assert_eq!(state.medial_stack.as_slice(), &[HA_MEDIAL]);

        // ှ 가 없으면 ် 는 옮겨진 것이 아님
        let mut state = EngineState::new();
        let mut buf = buffer(&[KA, ASAT, E_VOWEL]);
        delete_in(ScriptKind::Karen, &mut state, &mut buf);
        assert_eq!(buf.text(), "\u{1000}\u{103A}");
        assert!(state.is_idle());
    }

    #[test]
    fn test_karen_recovers_state_over_moved_asat() {
        let mut state = EngineState::new();
        let mut buf = buffer(&[KA, HA_MEDIAL, ASAT, E_VOWEL, AA]);
        delete_in(ScriptKind::Karen, &mut state, &mut buf);
        assert_eq!(buf.text(), "\u{1000}\u{103E}\u{103A}\u{1031}");
        assert!(state.pending_consonant_swap);
        assert_eq!(state.medial_stack.as_slice(), &[HA_MEDIAL]);
    }

    #[test]
    fn test_cluster_delete_mid_field() {
        let mut state = EngineState::new();
        state.pending_consonant_swap = true;
        // "ကို" + " " + "မ", 커서는 "ကို" 뒤
        let mut buf = CursorBuffer::with_cursor("\u{1000}\u{102D}\u{102F} \u{1019}", 3);
        delete(&mut state, &mut buf);
        assert_eq!(buf.text(), " \u{1019}");
        assert!(state.is_idle());
    }

    #[test]
    fn test_cluster_delete_includes_virama() {
        let mut state = EngineState::new();
        let mut buf = CursorBuffer::with_cursor("\u{1000}\u{1039}\u{1001}\u{102C}x", 4);
        delete(&mut state, &mut buf);
        assert_eq!(buf.text(), "\u{1000}x");
    }

    #[test]
    fn test_cluster_delete_keeps_virama_before_separator() {
        // 경계가 자음일 때만 앞의 비라마를 함께 지움
        let mut state = EngineState::new();
        let mut buf = CursorBuffer::with_cursor("\u{1039} \u{102D}x", 3);
        delete(&mut state, &mut buf);
        assert_eq!(buf.text(), "\u{1039}x");
    }

    #[test]
    fn test_cluster_delete_without_boundary() {
        let mut state = EngineState::new();
        let mut buf = CursorBuffer::with_cursor("\u{102D}\u{102F}x", 2);
        delete(&mut state, &mut buf);
        assert_eq!(buf.text(), "\u{102D}x");
    }

    #[test]
    fn test_cluster_delete_surrogate() {
        let mut state = EngineState::new();
        let mut buf = CursorBuffer::with_cursor("a😀b", 3);
        delete(&mut state, &mut buf);
        assert_eq!(buf.text(), "ab");
    }
}
