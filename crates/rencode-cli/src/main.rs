//! `rencode` CLI: encode, decode, and inspect rencode files from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Encode a stream of JSON values to rencode (stdin → stdout)
//! echo '{"name":"Alice","age":30}' | rencode encode > data.bin
//!
//! # Encode from file to file
//! rencode encode -i data.json -o data.bin
//!
//! # Decode every value in a file to pretty-printed JSON
//! rencode decode -i data.bin
//!
//! # One line per top-level value: offset, typecode, value
//! rencode dump -i data.bin
//!
//! # Show size statistics
//! rencode stats -i data.json
//!
//! # Write a sample document
//! rencode sample -o sample.bin
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rencode_core::{Decoder, Dictionary, Encoder, List, Typecode, Value};
use std::io::{self, Read, Write};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rencode", version, about = "rencode binary serialization CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v: debug, -vv: trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode JSON values to rencode
    Encode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Decode rencode values to JSON
    Decode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Maximum container nesting accepted while decoding
        #[arg(long, default_value_t = rencode_core::config::DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },
    /// Print each top-level value with its offset and typecode
    Dump {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Show encoding statistics (JSON size vs rencode size)
    Stats {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Write a sample document
    Sample {
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Encode { input, output } => {
            let json = read_text(input.as_deref())?;
            let bytes = encode_json_stream(&json)?;
            write_output(output.as_deref(), &bytes)?;
        }
        Commands::Decode {
            input,
            output,
            max_depth,
        } => {
            let bytes = read_bytes(input.as_deref())?;
            let config = rencode_core::DecoderConfig::default().with_max_depth(max_depth);
            let mut out = String::new();
            for (i, item) in Decoder::with_config(&bytes, config).enumerate() {
                let value = item.with_context(|| format!("Failed to decode value {i}"))?;
                let json = rencode_core::to_json(&value)
                    .with_context(|| format!("Failed to convert value {i} to JSON"))?;
                out.push_str(&serde_json::to_string_pretty(&json)?);
                out.push('\n');
            }
            write_output(output.as_deref(), out.as_bytes())?;
        }
        Commands::Dump { input } => {
            let bytes = read_bytes(input.as_deref())?;
            dump(&bytes)?;
        }
        Commands::Stats { input } => {
            let json = read_text(input.as_deref())?;
            let bytes = encode_json_stream(&json)?;
            let json_bytes = json.len();
            let rencode_bytes = bytes.len();
            let ratio = if json_bytes > 0 {
                (1.0 - (rencode_bytes as f64 / json_bytes as f64)) * 100.0
            } else {
                0.0
            };
            println!("JSON size:     {} bytes", json_bytes);
            println!("rencode size:  {} bytes", rencode_bytes);
            println!("Reduction:     {:.1}%", ratio);
        }
        Commands::Sample { output } => {
            let bytes = rencode_core::encode(&sample_document()?)
                .context("Failed to encode sample document")?;
            write_output(output.as_deref(), &bytes)?;
        }
    }

    Ok(())
}

/// Log to stderr so encoded output on stdout stays clean.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Encode every JSON value in `json` (whitespace separated) back to back.
fn encode_json_stream(json: &str) -> Result<Vec<u8>> {
    let mut encoder = Encoder::new();
    let stream = serde_json::Deserializer::from_str(json).into_iter::<serde_json::Value>();
    for (i, item) in stream.enumerate() {
        let doc = item.with_context(|| format!("Failed to parse JSON value {i}"))?;
        let value = rencode_core::from_json(&doc)
            .with_context(|| format!("Failed to convert JSON value {i}"))?;
        encoder
            .encode(&value)
            .with_context(|| format!("Failed to encode JSON value {i}"))?;
        debug!(index = i, size = encoder.bytes().len(), "encoded value");
    }
    Ok(encoder.into_bytes())
}

fn dump(bytes: &[u8]) -> Result<()> {
    let mut decoder = Decoder::new(bytes);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut count = 0usize;
    while let Some(&code) = decoder.remaining().first() {
        let offset = decoder.position();
        let value = decoder
            .decode_next()
            .with_context(|| format!("Failed to decode value at offset {offset}"))?;
        writeln!(
            out,
            "{offset:>8}  {code:>3} {:<16} {value}",
            typecode_label(code)
        )?;
        count += 1;
    }
    info!(count, "dump complete");
    Ok(())
}

fn typecode_label(code: u8) -> &'static str {
    match Typecode::classify(code) {
        Typecode::PosFixed(_) | Typecode::NegFixed(_) => "int-fixed",
        Typecode::BytesFixed(_) => "bytes-fixed",
        Typecode::ListFixed(_) => "list-fixed",
        Typecode::DictFixed(_) => "dict-fixed",
        Typecode::LongBytes => "bytes-long",
        Typecode::ListTerminated => "list",
        Typecode::DictTerminated => "dict",
        Typecode::BigNumber => "bigint",
        Typecode::Int8 => "int8",
        Typecode::Int16 => "int16",
        Typecode::Int32 => "int32",
        Typecode::Int64 => "int64",
        Typecode::Float32 => "float32",
        Typecode::Float64 => "float64",
        Typecode::True | Typecode::False => "bool",
        Typecode::None => "none",
        Typecode::Terminator => "terminator",
        Typecode::Unknown => "unknown",
    }
}

fn sample_document() -> Result<Value> {
    let mut list = List::new();
    list.append(2i8);
    list.append("another string");
    list.append(false);

    let mut dict = Dictionary::new();
    dict.add("int", 42i64)?;
    dict.add("float", 2.75f64)?;
    dict.add("string", "some string")?;
    dict.add("bool", true)?;
    dict.add("nested", list)?;
    dict.add("empty", List::new())?;
    Ok(Value::Dict(dict))
}

fn read_bytes(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path).with_context(|| format!("Failed to read file: {}", path)),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn read_text(path: Option<&str>) -> Result<String> {
    let bytes = read_bytes(path)?;
    String::from_utf8(bytes).context("Input is not valid UTF-8")
}

fn write_output(path: Option<&str>, content: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(content)
                .context("Failed to write to stdout")?;
            stdout.flush()?;
        }
    }
    Ok(())
}
