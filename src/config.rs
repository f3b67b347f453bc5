//! Invocation configuration.
//!
//! Resolves where the script is read from and where the payload goes:
//!
//! - no paths: `inject.txt` and `inject.bin` next to the executable
//! - input only: the output is the input with its extension replaced by `.bin`
//! - input and output: used as given

use std::path::{Path, PathBuf};

use crate::error::{EncodeError, Result};

pub const DEFAULT_INPUT: &str = "inject.txt";
pub const DEFAULT_OUTPUT: &str = "inject.bin";
pub const OUTPUT_EXTENSION: &str = "bin";

/// Resolved input and output locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IoPaths {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl IoPaths {
    /// Resolve paths, using `base_dir` for the defaults.
    pub fn resolve(input: Option<PathBuf>, output: Option<PathBuf>, base_dir: &Path) -> Self {
        match (input, output) {
            (Some(input), Some(output)) => Self { input, output },
            (Some(input), None) => {
                let output = input.with_extension(OUTPUT_EXTENSION);
                Self { input, output }
            }
            (None, output) => Self {
                input: base_dir.join(DEFAULT_INPUT),
                output: output.unwrap_or_else(|| base_dir.join(DEFAULT_OUTPUT)),
            },
        }
    }

    /// Resolve paths relative to the running executable's directory.
    pub fn from_args(input: Option<PathBuf>, output: Option<PathBuf>) -> Result<Self> {
        let exe = std::env::current_exe()?;
        let base_dir = exe.parent().unwrap_or_else(|| Path::new("."));
        Ok(Self::resolve(input, output, base_dir))
    }

    /// Fail with [`EncodeError::InputNotFound`] unless the input exists.
    pub fn ensure_input_exists(&self) -> Result<()> {
        if self.input.exists() {
            Ok(())
        } else {
            Err(EncodeError::input_not_found(&self.input))
        }
    }
}
