//! 입력 세션
//!
//! 입력 필드 하나에 대응하는 엔진 인스턴스입니다.
//! 키 입력마다 자동 교정 → 재배열 순서로 처리하고 결과를 텍스트 버퍼에 반영합니다.

use std::time::Instant;

use crate::config::EngineConfig;
use crate::core::delete::ClusterDeletionEngine;
use crate::core::double_tap::DoubleTapDetector;
use crate::core::profile::{ScriptKind, ScriptProfile};
use crate::core::reorder::{EmitResult, ReorderingEngine};
use crate::core::state::EngineState;
use crate::core::unicode::{to_text, ZWSP};
use crate::platform::text_buffer::TextBuffer;

/// 재배열에 필요한 커서 앞 문맥 길이
const CONTEXT_LEN: usize = 3;

/// 입력 필드 하나의 재배열 세션
#[derive(Debug, Clone)]
pub struct InputSession {
    profile: &'static ScriptProfile,
    config: EngineConfig,
    state: EngineState,
    double_tap: DoubleTapDetector,
}

impl InputSession {
    /// 새 세션 생성
    pub fn new(config: EngineConfig) -> Self {
        Self {
            profile: config.script.profile(),
            double_tap: DoubleTapDetector::new(config.double_tap_timeout_ms),
            config,
            state: EngineState::new(),
        }
    }

    /// 기본 설정 + 스크립트 지정
    pub fn with_script(script: ScriptKind) -> Self {
        Self::new(EngineConfig {
            script,
            ..EngineConfig::default()
        })
    }

    pub fn profile(&self) -> &'static ScriptProfile {
        self.profile
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// 키 입력 하나 처리 후 버퍼에 반영
    pub fn handle_key<B: TextBuffer + ?Sized>(&mut self, key: char, buffer: &mut B) -> EmitResult {
        let result = self.process_key(u32::from(key), &*buffer);
        apply(buffer, &result);
        debug_assert!(self.state.is_consistent());
        result
    }

    fn process_key<B: TextBuffer + ?Sized>(&mut self, incoming: u32, buffer: &B) -> EmitResult {
        let context = buffer.peek_before(CONTEXT_LEN);
        log::trace!("문맥 {:?}, 입력 U+{:04X}", context, incoming);

        if let Some(&last) = context.last() {
            if let Some(correction) = self.profile.autocorrect.apply(u32::from(last), incoming) {
                log::debug!(
                    "자동 교정: U+{:04X} + U+{:04X} -> {:?}",
                    last,
                    incoming,
                    correction.replacement
                );
                self.state.reset();
                return EmitResult {
                    delete_count_before: correction.delete_count,
                    text: correction.replacement,
                };
            }
        }

        if !self.config.reordering {
            self.state.reset();
            return EmitResult::pass(incoming);
        }

        ReorderingEngine::process(self.profile, &mut self.state, incoming, &context)
    }

    /// 백스페이스 처리
    pub fn handle_delete<B: TextBuffer + ?Sized>(&mut self, buffer: &mut B) {
        self.double_tap.reset();
        ClusterDeletionEngine::delete_one(self.profile, &mut self.state, buffer);
        debug_assert!(self.state.is_consistent());
    }

    /// 두 번 입력 대체 문자가 있는 키 처리
    ///
    /// 두 번 입력이 꺼져 있거나 감지되지 않으면 `handle_key`와 같습니다.
    pub fn handle_key_with_alternate<B: TextBuffer + ?Sized>(
        &mut self,
        key: char,
        alternate: Option<char>,
        now: Instant,
        buffer: &mut B,
    ) -> EmitResult {
        match self.check_double_tap(key, alternate, now) {
            Some(alt) => self.replace_first_tap(alt, buffer),
            None => self.handle_key(key, buffer),
        }
    }

    /// 두 번 입력 감지 (설정이 꺼져 있으면 항상 None)
    pub fn check_double_tap(&mut self, key: char, alternate: Option<char>, now: Instant) -> Option<char> {
        if !self.config.double_tap {
            return None;
        }
        self.double_tap
            .check(u32::from(key), alternate.map(u32::from), now)
            .and_then(char::from_u32)
    }

    /// 첫 번째 입력 결과를 대체 문자로 바꿈
    fn replace_first_tap<B: TextBuffer + ?Sized>(&mut self, alt: char, buffer: &mut B) -> EmitResult {
        let alt_code = u32::from(alt);
        let context = buffer.peek_before(CONTEXT_LEN);
        let n = context.len();
        let at = |i: usize| u32::from(context[i]);

        // [자음, 전치 모음, 첫 입력] + 메디얼 대체 -> [자음, 메디얼, 전치 모음]
        if n == 3
            && self.profile.is_medial(alt_code)
            && self.profile.is_consonant(at(0))
            && self.profile.is_pre_base_vowel(at(1))
        {
            let result = EmitResult::replace(2, &[alt_code, at(1)]);
            apply(buffer, &result);
            self.prepare_for_double_tap();
            return result;
        }

        if n >= 2 {
            let first = at(n - 2);
            let second = at(n - 1);
            if self.profile.is_pre_base_vowel(second) {
                // 첫 입력이 이미 전치 모음 앞으로 재배열됨
                let result = EmitResult::replace(2, &[alt_code, second]);
                apply(buffer, &result);
                self.prepare_for_double_tap();
                return result;
            }
            if self.profile.is_pre_base_vowel(first) || first == ZWSP {
                // 첫 입력만 지우고 대체 문자를 다시 재배열
                buffer.delete_before(1);
                self.state.reset();
                let mut result = self.handle_key(alt, buffer);
                result.delete_count_before += 1;
                return result;
            }
        }

        let delete = n.min(1);
        let result = EmitResult {
            delete_count_before: delete,
            text: to_text(&[alt_code]),
        };
        apply(buffer, &result);
        self.state.reset();
        result
    }

    /// 두 번 입력으로 [대체 문자, 전치 모음]을 출력한 뒤의 상태로 설정
    pub fn prepare_for_double_tap(&mut self) {
        self.state.reset();
        self.state.pending_consonant_swap = true;
    }

    /// 직전 입력에서 전치 모음 재배열이 일어났는지
    pub fn was_vowel_reordered(&self) -> bool {
        self.state.pending_consonant_swap
    }

    /// 화폐 단위 입력
    pub fn insert_currency_symbol<B: TextBuffer + ?Sized>(&mut self, buffer: &mut B) -> EmitResult {
        self.state.reset();
        let result = EmitResult {
            delete_count_before: 0,
            text: self.profile.currency_symbol(),
        };
        apply(buffer, &result);
        result
    }

    /// 필드 전환 시 상태 초기화
    pub fn reset(&mut self) {
        self.state.reset();
        self.double_tap.reset();
    }
}

fn apply<B: TextBuffer + ?Sized>(buffer: &mut B, result: &EmitResult) {
    if result.delete_count_before > 0 {
        buffer.delete_before(result.delete_count_before);
    }
    if !result.text.is_empty() {
        buffer.commit(&result.text);
    }
}
