//! 호스트 텍스트 버퍼 어댑터
//!
//! 엔진은 커서 앞 텍스트를 UTF-16 유닛 단위로만 다룹니다.
//! 호스트(편집기, 입력기 프레임워크)는 `TextBuffer`를 구현해 연결합니다.

use crate::core::unicode::is_high_surrogate;

/// 커서 앞 텍스트 조회와 수정
pub trait TextBuffer {
    /// 커서 앞 최대 n개 유닛 (필드 시작 근처면 더 적게 반환)
    fn peek_before(&self, n: usize) -> Vec<u16>;
    /// 커서 앞 n개 유닛 삭제 (있는 만큼만)
    fn delete_before(&mut self, n: usize);
    /// 커서 위치에 텍스트 삽입, 커서는 삽입한 텍스트 뒤로 이동
    fn commit(&mut self, text: &str);
    /// 커서 뒤에 텍스트가 없는지
    fn is_at_end_of_field(&self) -> bool;
}

/// 메모리 내 편집 필드 (커서 위치 지정 가능)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorBuffer {
    units: Vec<u16>,
    cursor: usize,
}

impl CursorBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 커서를 끝에 둔 버퍼
    pub fn from_text(text: &str) -> Self {
        let units: Vec<u16> = text.encode_utf16().collect();
        let cursor = units.len();
        Self { units, cursor }
    }

    /// 커서를 지정한 유닛 위치에 둔 버퍼 (범위를 넘으면 끝)
    pub fn with_cursor(text: &str, cursor: usize) -> Self {
        let mut buffer = Self::from_text(text);
        buffer.set_cursor(cursor);
        buffer
    }

    pub fn text(&self) -> String {
        String::from_utf16_lossy(&self.units)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// 커서 이동 (서로게이트 쌍 가운데면 쌍 앞으로)
    pub fn set_cursor(&mut self, cursor: usize) {
        let mut cursor = cursor.min(self.units.len());
        if cursor > 0 && cursor < self.units.len() && is_high_surrogate(self.units[cursor - 1]) {
            cursor -= 1;
        }
        self.cursor = cursor;
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl TextBuffer for CursorBuffer {
    fn peek_before(&self, n: usize) -> Vec<u16> {
        let start = self.cursor.saturating_sub(n);
        self.units[start..self.cursor].to_vec()
    }

    fn delete_before(&mut self, n: usize) {
        let start = self.cursor.saturating_sub(n);
        self.units.drain(start..self.cursor);
        self.cursor = start;
    }

    fn commit(&mut self, text: &str) {
        let inserted: Vec<u16> = text.encode_utf16().collect();
        let count = inserted.len();
        self.units.splice(self.cursor..self.cursor, inserted);
        self.cursor += count;
    }

    fn is_at_end_of_field(&self) -> bool {
        self.cursor == self.units.len()
    }
}

/// 조합 영역이 있는 입력기 버퍼
///
/// 확정된 텍스트 뒤에 아직 확정되지 않은 조합 텍스트가 붙습니다.
/// 커서는 항상 조합 영역 끝에 있고, 삭제는 조합 영역부터 지웁니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposingBuffer {
    committed: Vec<u16>,
    composing: Vec<u16>,
}

impl ComposingBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 조합 영역을 확정 텍스트로 옮김
    pub fn finish_composing(&mut self) {
        self.committed.append(&mut self.composing);
    }

    pub fn composing_text(&self) -> String {
        String::from_utf16_lossy(&self.composing)
    }

    /// 확정 텍스트 + 조합 텍스트
    pub fn text(&self) -> String {
        let mut all = self.committed.clone();
        all.extend_from_slice(&self.composing);
        String::from_utf16_lossy(&all)
    }
}

impl TextBuffer for ComposingBuffer {
    fn peek_before(&self, n: usize) -> Vec<u16> {
        let from_composing = n.min(self.composing.len());
        let from_committed = (n - from_composing).min(self.committed.len());
        let mut out = self.committed[self.committed.len() - from_committed..].to_vec();
        out.extend_from_slice(&self.composing[self.composing.len() - from_composing..]);
        out
    }

    fn delete_before(&mut self, n: usize) {
        let from_composing = n.min(self.composing.len());
        self.composing.truncate(self.composing.len() - from_composing);
        let rest = (n - from_composing).min(self.committed.len());
        self.committed.truncate(self.committed.len() - rest);
    }

    fn commit(&mut self, text: &str) {
        self.composing.extend(text.encode_utf16());
    }

    fn is_at_end_of_field(&self) -> bool {
        true
    }
}
