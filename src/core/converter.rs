//! 키 입력 문자열 -> 유니코드 저장 순서 텍스트 변환기

use crate::core::profile::ScriptKind;
use crate::core::session::InputSession;
use crate::platform::text_buffer::CursorBuffer;

/// 백스페이스로 취급하는 문자
pub const BACKSPACE: char = '\u{8}';

/// 키 입력 순서대로 적힌 문자열을 빈 필드에 입력한 결과로 변환
/// 각 문자가 키 입력 하나, `BACKSPACE`는 필드 끝에서의 삭제
pub fn convert(script: ScriptKind, input: &str) -> String {
    let mut session = InputSession::with_script(script);
    let mut buffer = CursorBuffer::new();

    for c in input.chars() {
        if c == BACKSPACE {
            session.handle_delete(&mut buffer);
        } else {
            session.handle_key(c, &mut buffer);
        }
    }

    buffer.text()
}
