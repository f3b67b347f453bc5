//! # Ducky Encoder
//!
//! Compiles line-oriented keystroke-injection scripts into the flat binary
//! format read by USB HID injectors.
//!
//! ## Features
//!
//! - `STRING` / `STRINGLN` text typing with automatic shift handling
//! - Named special keys (`ENTER`, `F1`..`F12`, arrows, ...)
//! - Modifier combinations such as `CTRL ALT DELETE` or `GUI r`
//! - `DELAY`, `DEFAULT_DELAY` and `REPEAT` directives
//! - Per-line error recovery: a bad line becomes a diagnostic, never a failed run
//!
//! ## Example
//!
//! ```
//! use ducky_encoder::compile;
//!
//! let compilation = compile("GUI r\nDELAY 300\nSTRINGLN notepad");
//! assert!(compilation.diagnostics.is_empty());
//! assert_eq!(&compilation.payload.as_bytes()[..4], &[0x15, 0x08, 0x00, 0xff]);
//! ```
//!
//! ## Output format
//!
//! Every instruction is two bytes, `[usage code, modifiers]`. Delays use the
//! reserved form `[0x00, milliseconds]`, split into chunks of at most 255.

pub mod combo;
pub mod compiler;
pub mod config;
pub mod emitter;
pub mod encoder;
pub mod error;
pub mod keys;
pub mod report;

pub use compiler::{compile, Compilation, Compiler, Diagnostic, Payload, Severity};
pub use config::IoPaths;
pub use encoder::{encode_char, encode_delay, encode_string, Instruction};
pub use error::{EncodeError, Result};
pub use keys::Modifiers;
pub use report::Report;
