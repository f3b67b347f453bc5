//! Binary emitter.
//!
//! The injector format has no header, framing or checksum: the payload bytes
//! are written verbatim.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::compiler::Payload;
use crate::error::Result;

/// Write the payload to `writer` and return the number of bytes written.
pub fn write_payload<W: Write>(payload: &Payload, mut writer: W) -> Result<usize> {
    writer.write_all(payload.as_bytes())?;
    writer.flush()?;
    Ok(payload.len())
}

/// Create (or truncate) `path` and write the payload to it.
pub fn write_file(payload: &Payload, path: &Path) -> Result<usize> {
    let file = File::create(path)?;
    let written = write_payload(payload, BufWriter::new(file))?;
    info!(bytes = written, path = %path.display(), "payload written");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::Instruction;
    use crate::keys::Modifiers;

    #[test]
    fn test_write_payload_is_verbatim() {
        let mut payload = Payload::new();
        payload.push(Instruction::key(0x04, Modifiers::SHIFT));
        payload.push(Instruction::delay(200));

        let mut out = Vec::new();
        let written = write_payload(&payload, &mut out).unwrap();
        assert_eq!(written, 4);
        assert_eq!(out, vec![0x04, 0x02, 0x00, 200]);
    }

    #[test]
    fn test_write_empty_payload() {
        let mut out = Vec::new();
        assert_eq!(write_payload(&Payload::new(), &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }
}
