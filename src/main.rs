// Tue Jan 13 2026 - Alex

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use data_accessor::{
    accessor::{Scalar, SnapshotBuilder},
    memory::{MmapMemory, RegisterFile},
    utils::{LoggingUtils, ScopedTimer},
    AccessorFactory, Address, Config, DataAccessorPtr, Length,
};
use itertools::Itertools;
use std::fmt::Display;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Typed reads from a file presented as target memory or as a snapshot", long_about = None)]
struct Args {
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print typed values at an offset
    Read(ReadArgs),
    /// Hex dump a window of the file
    Hexdump(HexdumpArgs),
}

#[derive(clap::Args, Debug)]
struct SourceArgs {
    file: PathBuf,

    /// Address the first byte of the file is presented at
    #[arg(long, value_parser = parse_number)]
    base: Option<u64>,

    #[arg(long, value_enum, default_value_t = Mode::Dump)]
    mode: Mode,
}

#[derive(clap::Args, Debug)]
struct ReadArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[arg(long, value_parser = parse_number, default_value = "0")]
    offset: u64,

    #[arg(long = "type", value_enum, default_value_t = ValueType::U32)]
    value_type: ValueType,

    #[arg(long, default_value_t = 1)]
    count: usize,
}

#[derive(clap::Args, Debug)]
struct HexdumpArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[arg(long, value_parser = parse_number, default_value = "0")]
    offset: u64,

    #[arg(long, value_parser = parse_number)]
    length: Option<u64>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    /// Load the file into a frozen snapshot
    Dump,
    /// Map the file and read it live
    Memory,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ValueType {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
    F64,
}

fn parse_number(s: &str) -> std::result::Result<u64, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse::<u64>(),
    };
    parsed.map_err(|e| format!("invalid number '{}': {}", s, e))
}

fn open_source(source: &SourceArgs, config: &Config) -> Result<DataAccessorPtr> {
    let base = Address::new(source.base.unwrap_or(config.default_base_address));
    let label = source
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string());

    match source.mode {
        Mode::Dump => {
            let bytes = std::fs::read(&source.file)
                .with_context(|| format!("failed to read {}", source.file.display()))?;
            log::info!("loaded {} bytes from {} at {}", bytes.len(), label, base);
            Ok(SnapshotBuilder::from_bytes(bytes)
                .with_location(label)
                .at_address(base)
                .into_dump())
        }
        Mode::Memory => {
            let mapped = MmapMemory::from_file(&source.file, base)
                .with_context(|| format!("failed to map {}", source.file.display()))?;
            let size = mapped.size();
            log::info!("mapped {} bytes from {} at {}", size, label, base);
            let factory = AccessorFactory::from_config(config, Arc::new(mapped), Arc::new(RegisterFile::new()));
            Ok(factory.memory(base, size))
        }
    }
}

fn window(acc: &DataAccessorPtr, offset: u64, length: Length) -> Result<DataAccessorPtr> {
    let offset = usize::try_from(offset).context("offset does not fit in usize")?;
    acc.nested_copy(offset, length)
        .with_context(|| format!("offset 0x{:x} is outside {}", offset, acc))
}

fn render<T: Scalar + Display>(acc: &DataAccessorPtr, count: usize) -> Result<String> {
    let values = acc.read_array::<T>(count, 0)?;
    Ok(values.iter().join(", "))
}

fn handle_read(args: ReadArgs, config: &Config) -> Result<()> {
    let source = open_source(&args.source, config)?;
    let view = window(&source, args.offset, Length::Rest)?;
    let rendered = match args.value_type {
        ValueType::U8 => render::<u8>(&view, args.count),
        ValueType::I8 => render::<i8>(&view, args.count),
        ValueType::U16 => render::<u16>(&view, args.count),
        ValueType::I16 => render::<i16>(&view, args.count),
        ValueType::U32 => render::<u32>(&view, args.count),
        ValueType::I32 => render::<i32>(&view, args.count),
        ValueType::U64 => render::<u64>(&view, args.count),
        ValueType::I64 => render::<i64>(&view, args.count),
        ValueType::F32 => render::<f32>(&view, args.count),
        ValueType::F64 => render::<f64>(&view, args.count),
    }
    .with_context(|| format!("reading {} x {:?} at {}", args.count, args.value_type, view.location()))?;

    println!("{} {}", view.location().cyan(), rendered);
    Ok(())
}

fn handle_hexdump(args: HexdumpArgs, config: &Config) -> Result<()> {
    let source = open_source(&args.source, config)?;
    let length = match args.length {
        Some(len) => Length::Exact(usize::try_from(len).context("length does not fit in usize")?),
        None => Length::Rest,
    };
    let view = window(&source, args.offset, length)?;
    let bytes = view.read_bytes(view.length(), 0)?;

    for (row, chunk) in bytes.chunks(16).enumerate() {
        let addr = view.address() + (row * 16) as u64;
        let hex = chunk.iter().map(|b| format!("{:02x}", b)).join(" ");
        let ascii: String = chunk
            .iter()
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
            .collect();
        println!("{}  {:<47}  {}", addr.to_string().blue(), hex, ascii.dimmed());
    }
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::load(path).with_context(|| format!("failed to load {}", path.display()))?,
        None => Config::default(),
    };
    let base_level = LoggingUtils::level_from_str(&config.log_level);
    LoggingUtils::init(LoggingUtils::level_from_verbosity(base_level, args.verbose));

    let _timer = ScopedTimer::new("accessor-cli");
    match args.command {
        Command::Read(read_args) => handle_read(read_args, &config),
        Command::Hexdump(dump_args) => handle_hexdump(dump_args, &config),
    }
}

fn main() {
    if let Err(e) = run(Args::parse()) {
        eprintln!("{} {:#}", "[!]".red(), e);
        std::process::exit(1);
    }
}
