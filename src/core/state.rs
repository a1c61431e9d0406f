//! 입력 세션 하나의 재배열 상태

use crate::core::medial::{MedialStack, StackError};

/// 재배열 엔진 상태 (입력 필드마다 하나)
///
/// 불변 조건:
/// - 메디얼 수는 최대 3
/// - `pending_medial_swap`이면 메디얼이 하나 이상 쌓여 있음
/// - `pending_consonant_swap`과 `pending_virama_after_vowel`은 동시에 참일 수 없음
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineState {
    /// 전치 모음 앞으로 자음이 이미 재배열됨
    pub pending_consonant_swap: bool,
    /// 전치 모음 앞으로 메디얼이 재배열됨
    pub pending_medial_swap: bool,
    /// 마지막 전치 모음 이후 재배열된 메디얼 (입력 순서)
    pub medial_stack: MedialStack,
    /// 재배열된 자음 뒤에 비라마가 입력되어 아래 자음을 기다리는 중
    pub pending_virama_after_vowel: bool,
}

impl EngineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 모든 플래그와 메디얼 스택 초기화
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn medial_count(&self) -> usize {
        self.medial_stack.len()
    }

    /// 진행 중인 재배열이 없는지
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }

    /// 메디얼 스택에 push
    /// 스택이 가득 찼으면 로그만 남기고 초기 상태로 되돌림
    pub fn push_medial(&mut self, medial: u32) -> Result<(), StackError> {
        match self.medial_stack.push(medial) {
            Ok(()) => {
                self.pending_medial_swap = true;
                Ok(())
            }
            Err(e) => {
                log::warn!("{}: U+{:04X}, 상태 초기화", e, medial);
                self.reset();
                Err(e)
            }
        }
    }

    /// 가장 최근 메디얼 제거 (빈 스택이면 0개로 고정)
    pub fn pop_medial(&mut self) -> Option<u32> {
        let popped = match self.medial_stack.pop() {
            Ok(m) => Some(m),
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        };
        self.pending_medial_swap = !self.medial_stack.is_empty();
        popped
    }

    /// 불변 조건 검사
    pub fn is_consistent(&self) -> bool {
        !(self.pending_medial_swap && self.medial_stack.is_empty())
            && !(self.pending_consonant_swap && self.pending_virama_after_vowel)
    }
}
