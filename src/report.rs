//! Machine-readable summary of a compilation run.

use std::path::Path;

use serde::Serialize;

use crate::compiler::{Compilation, Diagnostic};
use crate::error::Result;

/// Summary printed by `--format json`.
#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub bytes: usize,
    pub written: bool,
    pub diagnostics: &'a [Diagnostic],
}

impl<'a> Report<'a> {
    pub fn new(input: &'a Path, output: &'a Path, compilation: &'a Compilation, written: bool) -> Self {
        Self {
            input,
            output,
            bytes: compilation.payload.len(),
            written,
            diagnostics: &compilation.diagnostics,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
