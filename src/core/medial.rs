//! 메디얼 유효성 상태 기계
//!
//! 마지막 전치 모음 이후 재배열된 메디얼을 고정 크기 스택에 쌓고,
//! 다음 메디얼을 받아들일 수 있는지 판정합니다.

use crate::core::profile::MedialPolicy;
use crate::core::state::EngineState;

/// 스택에 쌓을 수 있는 최대 메디얼 수
pub const MAX_MEDIALS: usize = 3;

/// 메디얼 스택 오류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    /// 가득 찬 스택에 push
    Overflow,
    /// 빈 스택에서 pop
    Underflow,
}

impl std::fmt::Display for StackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StackError::Overflow => write!(f, "메디얼 스택 초과 (최대 {})", MAX_MEDIALS),
            StackError::Underflow => write!(f, "빈 메디얼 스택에서 꺼내기"),
        }
    }
}

impl std::error::Error for StackError {}

/// 크기 제한이 있는 메디얼 스택 (입력 순서대로 저장)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MedialStack {
    items: [u32; MAX_MEDIALS],
    len: usize,
}

impl MedialStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, medial: u32) -> Result<(), StackError> {
        if self.len >= MAX_MEDIALS {
            return Err(StackError::Overflow);
        }
        self.items[self.len] = medial;
        self.len += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u32, StackError> {
        if self.len == 0 {
            return Err(StackError::Underflow);
        }
        self.len -= 1;
        let top = self.items[self.len];
        self.items[self.len] = 0;
        Ok(top)
    }

    /// 가장 최근에 쌓인 메디얼
    pub fn top(&self) -> Option<u32> {
        self.as_slice().last().copied()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.items[..self.len]
    }
}

/// 메디얼 후보를 받아들일 수 있는지 판정
///
/// 판정 순서:
/// 1. 재배열된 자음이 없으면 거부
/// 2. 쌓인 메디얼이 없으면 허용
/// 3. 최대 개수에 도달했으면 거부
/// 4. 마지막 메디얼이 terminal이면 거부
/// 5. 마지막 메디얼이 penultimate이면 terminal만 허용
/// 6. 배타 쌍이거나 같은 메디얼 반복이면 거부
///
/// single_slot 메디얼은 쌓인 메디얼이 없을 때만 받습니다 (1 바로 다음에 검사).
pub fn accept(policy: &MedialPolicy, state: &EngineState, candidate: u32) -> bool {
    if !state.pending_consonant_swap {
        return false;
    }

    if let Some(slot) = &policy.single_slot {
        if slot.contains(&candidate) && !state.medial_stack.is_empty() {
            return false;
        }
    }

    let top = match state.medial_stack.top() {
        Some(top) => top,
        None => return true,
    };

    if state.medial_stack.len() >= policy.max_medials.min(MAX_MEDIALS) {
        return false;
    }

    if policy.terminal == Some(top) {
        return false;
    }

    if policy.penultimate == Some(top) && policy.terminal != Some(candidate) {
        return false;
    }

    if top == candidate {
        return false;
    }

    if let Some((a, b)) = policy.exclusive {
        if (top == a && candidate == b) || (top == b && candidate == a) {
            return false;
        }
    }

    true
}
