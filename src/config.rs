//! 설정 파일 로드 (JSON)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::double_tap::DEFAULT_DOUBLE_TAP_TIMEOUT_MS;
use crate::core::profile::ScriptKind;

/// 엔진 설정 (세션 생성 시 전달, 전역 상태 없음)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// 전치 모음 재배열 사용 여부 (끄면 자동 교정만 적용)
    #[serde(default = "default_reordering")]
    pub reordering: bool,
    /// 같은 키 두 번 입력으로 대체 문자 입력
    #[serde(default)]
    pub double_tap: bool,
    /// 두 번 입력 인식 시간 (ms)
    #[serde(default = "default_double_tap_timeout_ms")]
    pub double_tap_timeout_ms: u64,
    /// 입력 스크립트
    #[serde(default)]
    pub script: ScriptKind,
}

fn default_reordering() -> bool {
    true
}

fn default_double_tap_timeout_ms() -> u64 {
    DEFAULT_DOUBLE_TAP_TIMEOUT_MS
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reordering: default_reordering(),
            double_tap: false,
            double_tap_timeout_ms: default_double_tap_timeout_ms(),
            script: ScriptKind::default(),
        }
    }
}

/// 설정 로드 에러
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 읽기 실패
    Io(std::io::Error),
    /// JSON 파싱 실패
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "설정 파일 읽기 오류: {}", e),
            ConfigError::Parse(s) => write!(f, "설정 파싱 오류: {}", s),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

/// 설정 파일 경로: $XDG_CONFIG_HOME/myanmar-reorder/config.json
/// (XDG_CONFIG_HOME이 없으면 ~/.config)
pub fn config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(PathBuf::from)
                .filter(|p| p.is_absolute())
                .map(|home| home.join(".config"))
        })
        .unwrap_or_else(|| PathBuf::from("/var/tmp"));
    base.join("myanmar-reorder").join("config.json")
}

/// 설정 파일 로드 (파일 없거나 파싱 실패 시 기본값)
pub fn load_config() -> EngineConfig {
    load_config_from(&config_path())
}

/// 지정한 경로에서 설정 로드 (실패 시 경고 후 기본값)
pub fn load_config_from(path: &Path) -> EngineConfig {
    match load_config_strict(path) {
        Ok(config) => config,
        Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("설정 파일 없음, 기본값 사용: {}", path.display());
            EngineConfig::default()
        }
        Err(e) => {
            log::warn!("{} ({}), 기본값 사용", e, path.display());
            EngineConfig::default()
        }
    }
}

/// 설정 로드 (에러를 그대로 반환)
pub fn load_config_strict(path: &Path) -> Result<EngineConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
}
