//! Line dispatcher.
//!
//! Compiles a script one line at a time into a [`Payload`]. Each line is
//! classified by an ordered rule table, first match wins. Problems never abort
//! the run: they become [`Diagnostic`]s and the offending line, token or
//! character is dropped.

use serde::Serialize;
use tracing::{debug, warn};

use crate::combo::resolve_combo;
use crate::encoder::{encode_delay, encode_string, Instruction};
use crate::error::{EncodeError, Result};
use crate::keys::{self, Modifiers, COMBO_PREFIXES};

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Part of the line was dropped, the rest was compiled.
    Warning,
    /// The whole line was dropped.
    Error,
}

/// A problem found while compiling, tied to a 1-based script line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: usize,
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    fn new(line: usize, severity: Severity, error: &EncodeError) -> Self {
        Self {
            line,
            severity,
            message: error.to_string(),
        }
    }
}

/// Append-only instruction bytes plus the last-instruction register.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    bytes: Vec<u8>,
    last: Option<Instruction>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instruction: Instruction) {
        self.bytes.extend_from_slice(&instruction.to_bytes());
        self.last = Some(instruction);
    }

    /// Reserve room for `additional` more instructions, failing instead of aborting.
    pub fn try_reserve(&mut self, additional: usize) -> Result<()> {
        let bytes = additional
            .checked_mul(2)
            .ok_or_else(|| EncodeError::too_large("payload", "byte count overflows"))?;
        self.bytes
            .try_reserve(bytes)
            .map_err(|e| EncodeError::too_large("payload", e.to_string()))
    }

    pub fn extend(&mut self, instructions: impl IntoIterator<Item = Instruction>) {
        for instruction in instructions {
            self.push(instruction);
        }
    }

    /// The most recently appended instruction, used by `REPEAT`.
    pub fn last(&self) -> Option<Instruction> {
        self.last
    }

    /// Length in bytes. Always even.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn instructions(&self) -> impl Iterator<Item = Instruction> + '_ {
        self.bytes
            .chunks_exact(2)
            .map(|pair| Instruction::from_bytes([pair[0], pair[1]]))
    }
}

/// Result of one compilation run.
#[derive(Debug, Clone, Default)]
pub struct Compilation {
    pub payload: Payload,
    pub diagnostics: Vec<Diagnostic>,
}

impl Compilation {
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}

/// What a line sees when its rule runs.
struct Line<'a> {
    text: &'a str,
    /// Last instruction including any default delay already queued for this line.
    last: Option<Instruction>,
}

/// What a line contributes once its rule succeeds.
struct Effect {
    instructions: Vec<Instruction>,
    default_delay: Option<i64>,
}

impl Effect {
    fn emit(instructions: Vec<Instruction>) -> Self {
        Self {
            instructions,
            default_delay: None,
        }
    }
}

struct Rule {
    name: &'static str,
    matches: fn(&str) -> bool,
    apply: fn(&Line<'_>, &mut Vec<EncodeError>) -> Result<Effect>,
}

/// Classification rules in priority order.
const RULES: [Rule; 7] = [
    Rule {
        name: "DEFAULT_DELAY",
        matches: |l| l.starts_with("DEFAULT_DELAY") || l.starts_with("DEFAULTDELAY"),
        apply: |line, _| {
            let ms = numeric_arg(line.text, "DEFAULT_DELAY")?;
            Ok(Effect {
                instructions: Vec::new(),
                default_delay: Some(ms),
            })
        },
    },
    Rule {
        name: "DELAY",
        matches: |l| l.starts_with("DELAY"),
        apply: |line, _| Ok(Effect::emit(encode_delay(numeric_arg(line.text, "DELAY")?))),
    },
    Rule {
        name: "STRING",
        matches: |l| l.starts_with("STRING "),
        apply: |line, warnings| {
            let text = &line.text["STRING ".len()..];
            Ok(Effect::emit(encode_string(text, warnings)))
        },
    },
    Rule {
        name: "STRINGLN",
        matches: |l| l.starts_with("STRINGLN "),
        apply: |line, warnings| {
            let text = &line.text["STRINGLN ".len()..];
            let mut instructions = encode_string(text, warnings);
            instructions.push(Instruction::key(keys::ENTER, Modifiers::NONE));
            Ok(Effect::emit(instructions))
        },
    },
    Rule {
        name: "KEY",
        matches: |l| keys::named(l).is_some(),
        apply: |line, _| {
            let code = keys::named(line.text).ok_or_else(|| EncodeError::unknown_key(line.text))?;
            Ok(Effect::emit(vec![Instruction::key(code, Modifiers::NONE)]))
        },
    },
    Rule {
        name: "COMBO",
        matches: |l| {
            let upper = l.to_uppercase();
            COMBO_PREFIXES.iter().any(|prefix| upper.starts_with(prefix))
        },
        apply: |line, warnings| {
            Ok(Effect::emit(
                resolve_combo(line.text, warnings).into_iter().collect(),
            ))
        },
    },
    Rule {
        name: "REPEAT",
        matches: |l| l.starts_with("REPEAT") || l.starts_with("REPLAY"),
        apply: |line, _| {
            let count = match line.text.split_whitespace().nth(1) {
                Some(value) => parse_number(value, "REPEAT")?,
                None => 1,
            };
            let last = match line.last {
                Some(last) if count > 0 => last,
                _ => return Ok(Effect::emit(Vec::new())),
            };
            let count = usize::try_from(count)
                .map_err(|e| EncodeError::too_large(format!("REPEAT count {count}"), e.to_string()))?;
            let mut instructions = Vec::new();
            instructions
                .try_reserve_exact(count)
                .map_err(|e| EncodeError::too_large(format!("REPEAT count {count}"), e.to_string()))?;
            instructions.extend(std::iter::repeat(last).take(count));
            Ok(Effect::emit(instructions))
        },
    },
];

fn numeric_arg(line: &str, command: &str) -> Result<i64> {
    let value = line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| EncodeError::missing_argument(command))?;
    parse_number(value, command)
}

fn parse_number(value: &str, command: &str) -> Result<i64> {
    value
        .parse::<i64>()
        .map_err(|e| EncodeError::invalid_number(command, value, e.to_string()))
}

/// Split on `\n`, `\r\n` and lone `\r`, keeping one entry per script line.
fn script_lines(script: &str) -> impl Iterator<Item = &str> {
    script
        .split('\n')
        .flat_map(|l| l.strip_suffix('\r').unwrap_or(l).split('\r'))
}

fn is_skipped(line: &str) -> bool {
    line.is_empty() || line.starts_with("REM") || line.starts_with("//")
}

/// Compiles scripts into injector payloads.
///
/// Holds no state between runs; every call to [`Compiler::compile`] starts
/// with an empty payload and no default delay.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compiler;

impl Compiler {
    pub fn new() -> Self {
        Self
    }

    pub fn compile(&self, script: &str) -> Compilation {
        let mut compilation = Compilation::default();
        let mut default_delay: i64 = 0;

        for (index, raw) in script_lines(script).enumerate() {
            let number = index + 1;
            let text = raw.trim();
            if is_skipped(text) {
                continue;
            }

            let pending = if default_delay > 0 && !compilation.payload.is_empty() {
                encode_delay(default_delay)
            } else {
                Vec::new()
            };
            let line = Line {
                text,
                last: pending.last().copied().or(compilation.payload.last()),
            };

            let mut warnings = Vec::new();
            let outcome = match RULES.iter().find(|rule| (rule.matches)(text)) {
                Some(rule) => {
                    debug!(line = number, rule = rule.name, "classified line");
                    (rule.apply)(&line, &mut warnings)
                }
                None => Err(EncodeError::unknown_command(text)),
            }
            .and_then(|effect| {
                let added = pending.len().saturating_add(effect.instructions.len());
                compilation.payload.try_reserve(added)?;
                Ok(effect)
            });

            for warning in &warnings {
                warn!(line = number, "{}", warning);
                compilation
                    .diagnostics
                    .push(Diagnostic::new(number, Severity::Warning, warning));
            }

            match outcome {
                Ok(effect) => {
                    compilation.payload.extend(pending);
                    compilation.payload.extend(effect.instructions);
                    if let Some(ms) = effect.default_delay {
                        default_delay = ms;
                    }
                }
                Err(e) => {
                    warn!(line = number, "{}", e);
                    compilation
                        .diagnostics
                        .push(Diagnostic::new(number, Severity::Error, &e));
                }
            }
        }

        compilation
    }
}

/// Compile `script` with a fresh [`Compiler`].
pub fn compile(script: &str) -> Compilation {
    Compiler::new().compile(script)
}
