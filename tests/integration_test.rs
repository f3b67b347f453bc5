use anyhow::Result;
use ducky_encoder::encoder::to_bytes;
use ducky_encoder::{
    compile, emitter, encode_char, encode_string, keys, Compiler, EncodeError, IoPaths, Modifiers,
    Severity,
};
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

const SHIFT: u8 = Modifiers::SHIFT.bits();

#[test]
fn test_open_run_dialog_script() {
    let script = r#"
REM Open the run dialog and launch notepad
DEFAULT_DELAY 100
GUI r
DELAY 500
STRINGLN notepad
"#;

    let compilation = compile(script);
    assert!(compilation.diagnostics.is_empty());

    let mut expected: Vec<u8> = vec![0x15, 0x08];
    expected.extend([0x00, 100]);
    expected.extend([0x00, 255, 0x00, 245]);
    expected.extend([0x00, 100]);
    expected.extend([
        0x11, 0, 0x12, 0, 0x17, 0, 0x08, 0, 0x13, 0, 0x04, 0, 0x07, 0,
    ]);
    expected.extend([keys::ENTER, 0]);
    assert_eq!(compilation.payload.as_bytes(), expected.as_slice());
}

#[test]
fn test_default_delay_inserted_once_between_strings() {
    let compilation = compile("DEFAULT_DELAY 100\nSTRING Hi\nSTRING yo");

    let mut skipped = Vec::new();
    let mut expected = to_bytes(&encode_string("Hi", &mut skipped));
    expected.extend([0x00, 100]);
    expected.extend(to_bytes(&encode_string("yo", &mut skipped)));

    assert_eq!(compilation.payload.as_bytes(), expected.as_slice());
}

#[test]
fn test_repeat_produces_four_occurrences() {
    let compilation = compile("STRING A\nREPEAT 3");
    let a = encode_char('A').unwrap().to_bytes();
    assert_eq!(a, [0x04, SHIFT]);
    assert_eq!(compilation.payload.as_bytes(), a.repeat(4).as_slice());
}

#[test]
fn test_unknown_line_does_not_disturb_following_lines() {
    let with_bad_line = compile("STRING a\nFOOBAR\nCTRL c");
    let without = compile("STRING a\nCTRL c");

    assert_eq!(with_bad_line.payload, without.payload);
    assert_eq!(with_bad_line.diagnostics.len(), 1);
    assert_eq!(with_bad_line.diagnostics[0].line, 2);
    assert_eq!(with_bad_line.diagnostics[0].severity, Severity::Error);
}

#[test]
fn test_rejected_line_drops_its_default_delay() {
    let compilation = compile("DEFAULT_DELAY 30\nSTRING a\nDELAY soon\nSTRING b");
    assert_eq!(
        compilation.payload.as_bytes(),
        &[0x04, 0x00, 0x00, 30, 0x05, 0x00]
    );
}

#[test]
fn test_crlf_and_indented_lines() {
    let compilation = compile("  STRING a\r\n\tENTER\r\n");
    assert_eq!(compilation.payload.as_bytes(), &[0x04, 0x00, keys::ENTER, 0x00]);
}

#[test]
fn test_lone_carriage_return_splits_lines() {
    let compilation = compile("STRING a\rSTRING b");
    assert_eq!(compilation.payload.as_bytes(), &[0x04, 0x00, 0x05, 0x00]);
    assert!(compilation.diagnostics.is_empty());
}

#[test]
fn test_huge_repeat_count_is_a_line_error() {
    let compilation = compile("STRING a\nREPEAT 9223372036854775807\nSTRING b");
    assert_eq!(compilation.payload.as_bytes(), &[0x04, 0x00, 0x05, 0x00]);
    assert_eq!(compilation.diagnostics.len(), 1);
    assert_eq!(compilation.diagnostics[0].severity, Severity::Error);
    assert!(compilation.diagnostics[0].message.contains("too large"));
}

#[test]
fn test_payload_length_is_even() {
    let script = "STRING Mixed €content!\nALT\nDELAY 1000\nREPEAT 5\nCTRL SHIFT ESC\nBOGUS";
    let compilation = compile(script);
    assert_eq!(compilation.payload.len() % 2, 0);
    assert_eq!(
        compilation.payload.instructions().count() * 2,
        compilation.payload.len()
    );
}

#[test]
fn test_compile_twice_is_byte_identical() {
    let script = "DEFAULT_DELAY 7\nSTRING abc\nREPEAT 2\nGUI\nF5";
    let compiler = Compiler::new();
    assert_eq!(
        compiler.compile(script).payload.into_bytes(),
        compiler.compile(script).payload.into_bytes()
    );
}

// Emitter and path tests

#[test]
fn test_compile_script_file_to_bin() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let input = temp_dir.path().join("payload.txt");
    fs::write(&input, "STRING ok\nENTER\n")?;

    let paths = IoPaths::resolve(Some(input.clone()), None, temp_dir.path());
    assert_eq!(paths.output, temp_dir.path().join("payload.bin"));
    paths.ensure_input_exists()?;

    let compilation = compile(&fs::read_to_string(&paths.input)?);
    let written = emitter::write_file(&compilation.payload, &paths.output)?;

    assert_eq!(written, 6);
    assert_eq!(
        fs::read(&paths.output)?,
        vec![0x12, 0x00, 0x0e, 0x00, keys::ENTER, 0x00]
    );

    Ok(())
}

#[test]
fn test_emitter_overwrites_existing_file() -> Result<()> {
    let mut temp_file = NamedTempFile::new()?;
    temp_file.write_all(&[0xff; 16])?;

    let compilation = compile("TAB");
    emitter::write_file(&compilation.payload, temp_file.path())?;

    assert_eq!(fs::read(temp_file.path())?, vec![0x2b, 0x00]);
    Ok(())
}

#[test]
fn test_missing_input_detected_before_compiling() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let paths = IoPaths::resolve(None, None, temp_dir.path());

    let err = paths.ensure_input_exists().unwrap_err();
    assert!(matches!(err, EncodeError::InputNotFound(_)));
    assert!(err.to_string().contains("inject.txt"));
    assert!(!paths.output.exists());

    Ok(())
}

// Error type tests

#[test]
fn test_error_types() {
    let err = EncodeError::unmappable_char('é');
    assert!(err.to_string().contains("0xe9"));

    let err = EncodeError::unknown_key("NOPE");
    assert!(err.to_string().contains("NOPE"));

    let err = EncodeError::missing_argument("DELAY");
    assert_eq!(err.to_string(), "DELAY requires an argument");
}
