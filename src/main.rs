//! # stegsvc Binary Entry Point
//!
//! Thin command-line wrapper over [`StegService`].
//!
//! ## Usage
//!
//! ```bash
//! stegsvc encode --image cover.jpg --message "meet at noon" --password hunter2 --output out.png
//! stegsvc decode --image out.png --password hunter2
//! stegsvc capacity --image cover.jpg --json
//! ```
//!
//! Log level: `--log-level`, then the `LOG_LEVEL` environment variable, then
//! `[logging] level` in the `--config` file.
//!
//! Exit status is 0 on success, 2 when the input was at fault (bad image, wrong
//! password, message too large, ...) and 1 for anything else.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{debug, error, info};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use stegsvc::common::config::AppConfig;
use stegsvc::common::logging::{init_logger, resolve_level, LOG_LEVEL_ENV};
use stegsvc::common::messages::{CapacityResponse, DecodeResponse, EncodeResponse, ErrorResponse};
use stegsvc::service::{self, StegService};
use stegsvc::StegError;

/// Command-line arguments for the stegsvc binary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (TOML format)
    ///
    /// Example: config/stegsvc.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Print JSON response bodies on stdout
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hide a message in an image and write the result as PNG
    Encode(EncodeArgs),
    /// Recover a hidden message from an image
    Decode(DecodeArgs),
    /// Report how many bytes an image can hold
    Capacity(CapacityArgs),
}

#[derive(Args, Debug)]
struct EncodeArgs {
    /// Cover image (PNG, JPEG, GIF, BMP, ...)
    #[arg(short, long)]
    image: PathBuf,

    /// Message text to hide
    #[arg(short, long, conflicts_with = "message_file")]
    message: Option<String>,

    /// Read the message bytes from a file instead
    #[arg(long)]
    message_file: Option<PathBuf>,

    /// Seal the message with this password before embedding
    #[arg(short, long)]
    password: Option<String>,

    /// Where to write the PNG (defaults to `[output] filename` from the config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Decode the result again and compare it with the message
    #[arg(long)]
    verify: bool,
}

#[derive(Args, Debug)]
struct DecodeArgs {
    /// Image produced by `encode`
    #[arg(short, long)]
    image: PathBuf,

    /// Password the message was sealed with
    #[arg(short, long)]
    password: Option<String>,

    /// Write the raw message bytes to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CapacityArgs {
    #[arg(short, long)]
    image: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.config.as_deref().map(AppConfig::from_file).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let env_level = std::env::var(LOG_LEVEL_ENV).ok();
    init_logger(resolve_level(
        cli.log_level.as_deref(),
        env_level.as_deref(),
        &config.logging.level,
    ));

    let json = cli.json;
    match run(cli.command, &config, json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("❌ {e:#}");
            if json {
                if let Err(print_err) = print_json(&error_body(&e)) {
                    error!("❌ Failed to print error body: {print_err:#}");
                }
            }
            exit_code_for(&e)
        }
    }
}

fn run(command: Command, config: &AppConfig, json: bool) -> Result<()> {
    let service = StegService::new(config.limits.clone());

    match command {
        Command::Encode(args) => encode(&service, config, args, json),
        Command::Decode(args) => decode(&service, args, json),
        Command::Capacity(args) => capacity(&service, args, json),
    }
}

fn encode(service: &StegService, config: &AppConfig, args: EncodeArgs, json: bool) -> Result<()> {
    let image = read_file(&args.image)?;
    let message = match (args.message, &args.message_file) {
        (Some(text), _) => text.into_bytes(),
        (None, Some(path)) => read_file(path)?,
        (None, None) => bail!("either --message or --message-file is required"),
    };
    let password = args.password.as_deref();

    debug!(
        "message of {} bytes needs {} bits",
        message.len(),
        service::required_bits(message.len(), password.is_some())
    );

    let png = service.encode(&image, &message, password)?;

    if args.verify {
        if !service.verify(&png, &message, password)? {
            bail!("verification failed: extracted message does not match");
        }
        info!("✅ Output verified");
    }

    if json {
        if let Some(output) = &args.output {
            write_file(output, &png)?;
        }
        let filename = args
            .output
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| config.output.filename.clone());
        print_json(&EncodeResponse::new(&png, filename))?;
    } else {
        let output = args
            .output
            .unwrap_or_else(|| PathBuf::from(&config.output.filename));
        write_file(&output, &png)?;
        println!("{}", output.display());
    }

    Ok(())
}

fn decode(service: &StegService, args: DecodeArgs, json: bool) -> Result<()> {
    let image = read_file(&args.image)?;
    let message = service.decode(&image, args.password.as_deref())?;

    if let Some(output) = &args.output {
        write_file(output, &message)?;
    }

    if json {
        print_json(&DecodeResponse::from_payload(&message))?;
    } else if args.output.is_none() {
        let mut stdout = io::stdout().lock();
        stdout.write_all(&message)?;
        writeln!(stdout)?;
    }

    Ok(())
}

fn capacity(service: &StegService, args: CapacityArgs, json: bool) -> Result<()> {
    let image = read_file(&args.image)?;
    let report = service.capacity(&image)?;

    if json {
        print_json(&CapacityResponse::from(report))?;
    } else {
        println!("dimensions:        {}x{}", report.width, report.height);
        println!("capacity:          {} bits", report.capacity_bits);
        println!("max message:       {} bytes", report.max_plain_bytes);
        println!("max with password: {} bytes", report.max_sealed_bytes);
    }

    Ok(())
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    info!("📂 Read {} ({} bytes)", path.display(), bytes.len());
    Ok(bytes)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
    info!("💾 Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

fn print_json<T: Serialize>(body: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(body)?);
    Ok(())
}

fn error_body(error: &anyhow::Error) -> ErrorResponse {
    ErrorResponse::new(format!("{error:#}"))
}

fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    match error.downcast_ref::<StegError>() {
        Some(e) if e.is_client_error() => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    }
}
