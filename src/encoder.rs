//! Character, string and delay encoders.
//!
//! Every encoder produces [`Instruction`]s, the 2-byte unit of the injector
//! binary format: `[usage code, modifier byte]`.

use crate::error::{EncodeError, Result};
use crate::keys::{self, Modifiers};

/// Largest delay a single instruction can carry, in milliseconds.
pub const MAX_DELAY_CHUNK: u8 = u8::MAX;

/// One 2-byte injector instruction.
///
/// A key press is `(code, modifiers)`. A delay is `(0x00, chunk)`. A
/// modifier-only press is `(0x00, modifiers)` and is indistinguishable from a
/// delay with the same value once serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    code: u8,
    arg: u8,
}

impl Instruction {
    /// Key press with the given modifiers held.
    pub const fn key(code: u8, modifiers: Modifiers) -> Self {
        Self {
            code,
            arg: modifiers.bits(),
        }
    }

    /// Press of the modifiers alone, with no key.
    pub const fn modifiers_only(modifiers: Modifiers) -> Self {
        Self::key(0x00, modifiers)
    }

    /// Wait of `chunk` milliseconds.
    pub const fn delay(chunk: u8) -> Self {
        Self {
            code: 0x00,
            arg: chunk,
        }
    }

    pub const fn from_bytes(bytes: [u8; 2]) -> Self {
        Self {
            code: bytes[0],
            arg: bytes[1],
        }
    }

    pub const fn to_bytes(self) -> [u8; 2] {
        [self.code, self.arg]
    }

    pub const fn code(self) -> u8 {
        self.code
    }

    /// Raw second byte: modifier bits for a key, milliseconds for a delay.
    pub const fn arg(self) -> u8 {
        self.arg
    }
}

/// Encode a single character.
///
/// Unshifted characters encode with no modifiers, shifted characters with
/// [`Modifiers::SHIFT`]. Anything else is an [`EncodeError::UnmappableChar`].
pub fn encode_char(c: char) -> Result<Instruction> {
    if let Some(code) = keys::unshifted(c) {
        return Ok(Instruction::key(code, Modifiers::NONE));
    }
    if let Some(code) = keys::shifted(c) {
        return Ok(Instruction::key(code, Modifiers::SHIFT));
    }
    Err(EncodeError::unmappable_char(c))
}

/// Encode a run of characters in order.
///
/// Characters that cannot be encoded are left out of the result and their
/// errors are pushed onto `skipped`, so the output may be shorter than `text`.
pub fn encode_string(text: &str, skipped: &mut Vec<EncodeError>) -> Vec<Instruction> {
    let mut instructions = Vec::with_capacity(text.len());
    for c in text.chars() {
        match encode_char(c) {
            Ok(instruction) => instructions.push(instruction),
            Err(e) => skipped.push(e),
        }
    }
    instructions
}

/// Encode a pause as `(0x00, chunk)` instructions of at most 255 ms each.
///
/// Zero or negative durations produce nothing.
pub fn encode_delay(ms: i64) -> Vec<Instruction> {
    let mut remaining = ms;
    let mut instructions = Vec::new();
    while remaining > 0 {
        let chunk = remaining.min(i64::from(MAX_DELAY_CHUNK));
        instructions.push(Instruction::delay(chunk as u8));
        remaining -= chunk;
    }
    instructions
}

/// Flatten instructions into their serialized bytes.
pub fn to_bytes(instructions: &[Instruction]) -> Vec<u8> {
    instructions.iter().flat_map(|i| i.to_bytes()).collect()
}
