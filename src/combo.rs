//! Modifier-combination lines such as `CTRL ALT DELETE` or `GUI r`.

use crate::encoder::Instruction;
use crate::error::EncodeError;
use crate::keys::{self, Modifiers};

/// Resolve a whitespace-separated combo line into one instruction.
///
/// Modifier keywords are OR-ed together. Any other token is taken as the key
/// name and replaces the key from any earlier token, even when it does not
/// resolve. Key names that do not resolve are pushed onto `unresolved` and
/// scanning continues.
///
/// Returns `None` when neither a key nor a modifier was found.
pub fn resolve_combo(line: &str, unresolved: &mut Vec<EncodeError>) -> Option<Instruction> {
    let mut modifiers = Modifiers::NONE;
    let mut code = None;

    for token in line.split_whitespace() {
        if let Some(modifier) = Modifiers::from_alias(token) {
            modifiers |= modifier;
            continue;
        }
        code = keys::lookup(token);
        if code.is_none() {
            unresolved.push(EncodeError::unknown_key(token));
        }
    }

    match code {
        Some(code) => Some(Instruction::key(code, modifiers)),
        None if !modifiers.is_empty() => Some(Instruction::modifiers_only(modifiers)),
        None => None,
    }
}
