use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use ducky_encoder::{emitter, Compilation, Compiler, IoPaths, Report, Severity};
use std::fs;
use std::path::PathBuf;
use std::process;

/// Compile a keystroke-injection script into an injector payload.
///
/// With no paths, reads inject.txt and writes inject.bin next to this
/// executable. With only INPUT, the payload is written beside it with a .bin
/// extension.
#[derive(Debug, Parser)]
#[command(name = "duckenc", version, about)]
struct Cli {
    /// Script to compile
    input: Option<PathBuf>,

    /// Where to write the payload
    output: Option<PathBuf>,

    /// Compile and report without writing the payload
    #[arg(long)]
    dry_run: bool,

    /// How to report the result
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = IoPaths::from_args(cli.input, cli.output)?;
    paths.ensure_input_exists()?;

    if cli.format == Format::Text {
        println!("Compiling: {}", paths.input.display().to_string().cyan());
    }

    let script = fs::read_to_string(&paths.input)
        .with_context(|| format!("failed to read '{}'", paths.input.display()))?;
    let compilation = Compiler::new().compile(&script);

    let written = if cli.dry_run {
        false
    } else {
        emitter::write_file(&compilation.payload, &paths.output)
            .with_context(|| format!("failed to write '{}'", paths.output.display()))?;
        true
    };

    match cli.format {
        Format::Text => print_text(&paths, &compilation, written),
        Format::Json => {
            let report = Report::new(&paths.input, &paths.output, &compilation, written);
            println!("{}", report.to_json()?);
        }
    }

    Ok(())
}

fn print_text(paths: &IoPaths, compilation: &Compilation, written: bool) {
    for diagnostic in &compilation.diagnostics {
        let label = match diagnostic.severity {
            Severity::Warning => "Warning:".yellow(),
            Severity::Error => "Error:".red(),
        };
        println!("{} Line {}: {}", label, diagnostic.line, diagnostic.message);
    }

    let bytes = compilation.payload.len();
    if written {
        println!("Compiled {} bytes to {}", bytes, paths.output.display());
    } else {
        println!("Compiled {} bytes (dry run, nothing written)", bytes);
    }
    println!("{}", "Done!".green());
}
