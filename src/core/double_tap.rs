//! 같은 키 두 번 입력 감지

use std::time::{Duration, Instant};

/// 기본 두 번 입력 인식 시간 (ms)
pub const DEFAULT_DOUBLE_TAP_TIMEOUT_MS: u64 = 400;

/// 두 번 입력 감지기
///
/// 같은 키가 제한 시간 안에 다시 눌리고 그 키에 대체 문자가 있으면
/// 대체 문자를 돌려줍니다. 세 번째 입력은 다시 인식하지 않습니다.
#[derive(Debug, Clone)]
pub struct DoubleTapDetector {
    timeout: Duration,
    last: Option<(u32, Instant)>,
}

impl DoubleTapDetector {
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            timeout: Duration::from_millis(timeout_ms),
            last: None,
        }
    }

    /// 키 입력 기록 후 두 번 입력이면 대체 문자 반환
    pub fn check(&mut self, primary: u32, alternate: Option<u32>, now: Instant) -> Option<u32> {
        let alternate = alternate.filter(|&alt| alt != 0);
        if let (Some((code, at)), Some(alt)) = (self.last, alternate) {
            if code == primary && now.saturating_duration_since(at) < self.timeout {
                self.last = None;
                log::debug!("두 번 입력: U+{:04X} -> U+{:04X}", primary, alt);
                return Some(alt);
            }
        }
        self.last = Some((primary, now));
        None
    }

    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for DoubleTapDetector {
    fn default() -> Self {
        Self::new(DEFAULT_DOUBLE_TAP_TIMEOUT_MS)
    }
}
