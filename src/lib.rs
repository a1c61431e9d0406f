pub mod config;
pub mod core;
pub mod platform;

pub use config::{load_config, load_config_strict, ConfigError, EngineConfig};
pub use core::converter::{convert, BACKSPACE};
pub use core::profile::{ScriptKind, ScriptProfile};
pub use core::reorder::EmitResult;
pub use core::session::InputSession;
pub use core::state::EngineState;
pub use platform::text_buffer::{ComposingBuffer, CursorBuffer, TextBuffer};
