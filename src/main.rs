//! myanmar-reorder - 미얀마 문자 키 입력 재배열 CLI
//!
//! 표준 입력의 한 줄을 입력 세션 하나로 처리합니다.
//! 토큰: 16진 코드포인트(`1031`, `U+1031`), `BS`(백스페이스), `SP`(공백), `CUR`(화폐 단위)

use myanmar_reorder::config::{load_config, load_config_from};
use myanmar_reorder::core::unicode::describe;
use myanmar_reorder::{CursorBuffer, EngineConfig, InputSession, ScriptKind};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

/// 명령행 옵션
struct Options {
    script: Option<ScriptKind>,
    config_path: Option<PathBuf>,
}

/// 입력 토큰 하나
#[derive(Debug, PartialEq, Eq)]
enum Token {
    Key(char),
    Backspace,
    Currency,
}

fn usage() -> ! {
    eprintln!("사용법: myanmar-reorder [--script bamar|shan|mon|karen] [--config PATH]");
    process::exit(2);
}

fn parse_args() -> Options {
    let mut options = Options {
        script: None,
        config_path: None,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--script" => {
                let name = args.next().unwrap_or_else(|| usage());
                match ScriptKind::from_name(&name) {
                    Some(kind) => options.script = Some(kind),
                    None => {
                        eprintln!("알 수 없는 스크립트: {}", name);
                        usage();
                    }
                }
            }
            "--config" => {
                let path = args.next().unwrap_or_else(|| usage());
                options.config_path = Some(PathBuf::from(path));
            }
            "-h" | "--help" => usage(),
            other => {
                eprintln!("알 수 없는 인자: {}", other);
                usage();
            }
        }
    }
    options
}

fn parse_token(token: &str) -> Option<Token> {
    match token.to_ascii_uppercase().as_str() {
        "BS" => Some(Token::Backspace),
        "SP" => Some(Token::Key(' ')),
        "CUR" => Some(Token::Currency),
        other => {
            let hex = other.strip_prefix("U+").unwrap_or(other);
            u32::from_str_radix(hex, 16)
                .ok()
                .and_then(char::from_u32)
                .map(Token::Key)
        }
    }
}

fn run_line(config: &EngineConfig, line: &str) -> CursorBuffer {
    let mut session = InputSession::new(config.clone());
    let mut buffer = CursorBuffer::new();
    for raw in line.split_whitespace() {
        match parse_token(raw) {
            Some(Token::Key(c)) => {
                session.handle_key(c, &mut buffer);
            }
            Some(Token::Backspace) => session.handle_delete(&mut buffer),
            Some(Token::Currency) => {
                session.insert_currency_symbol(&mut buffer);
            }
            None => log::warn!("잘못된 토큰 무시: {}", raw),
        }
    }
    buffer
}

fn main() {
    // 로깅 초기화 (error/warn만 출력)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let options = parse_args();

    // 설정 로드
    let mut config = match &options.config_path {
        Some(path) => load_config_from(path),
        None => load_config(),
    };
    if let Some(script) = options.script {
        config.script = script;
    }
    log::info!("스크립트: {}", config.script.name());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::error!("입력 읽기 실패: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        let text = run_line(&config, &line).text();
        if writeln!(out, "{}\t{}", text, describe(&text)).is_err() {
            break;
        }
    }
}
