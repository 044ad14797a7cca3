//! MeshKV CLI Client
//!
//! Command-line interface for reading and writing datastore values.

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use meshkv_client::{Client, Config};
use tracing_subscriber::{fmt, EnvFilter};

/// MeshKV CLI
#[derive(Parser, Debug)]
#[command(name = "meshkv-cli")]
#[command(about = "CLI client for the MeshKV key-value store")]
#[command(version)]
struct Args {
    /// Address of any node in the datastore (host or host:port)
    node: String,

    /// Connect/read/write timeout in milliseconds (0 disables)
    #[arg(short, long, default_value = "5000")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Read the value of a key
    Read {
        /// The key whose value to read
        key: u64,
    },

    /// Write a new value for a key
    Write {
        /// The key whose value to write
        key: u64,

        /// The value to write; omitted = prompt after the old value is shown
        value: Option<String>,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,meshkv_client=info"));

    fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();

    let config = Config::builder()
        .connect_timeout_ms(args.timeout_ms)
        .read_timeout_ms(args.timeout_ms)
        .write_timeout_ms(args.timeout_ms)
        .build();

    let client = Client::with_config(&args.node, config);

    let outcome = match args.command {
        Commands::Read { key } => run_read(&client, key),
        Commands::Write { key, value } => run_write(&client, key, value),
    };

    if let Err(e) = outcome {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run_read(client: &Client, key: u64) -> meshkv_client::Result<()> {
    let value = client.read(key)?;
    println!("{}", display_value(&value));
    Ok(())
}

fn run_write(client: &Client, key: u64, value: Option<String>) -> meshkv_client::Result<()> {
    client.write_with(key, |old_value| {
        println!("old value was {}", display_value(old_value));

        match &value {
            Some(v) => Ok(v.clone().into_bytes()),
            None => prompt_new_value(),
        }
    })?;
    Ok(())
}

/// Ask the user for the replacement value on stdin
fn prompt_new_value() -> meshkv_client::Result<Vec<u8>> {
    print!("new value: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    // Strip the trailing newline, keep everything else verbatim
    let trimmed = line.strip_suffix('\n').unwrap_or(&line);
    let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
    Ok(trimmed.as_bytes().to_vec())
}

/// Values are opaque bytes; print text when they are text, hex otherwise
fn display_value(value: &[u8]) -> String {
    match std::str::from_utf8(value) {
        Ok(s) => s.to_string(),
        Err(_) => value.iter().map(|b| format!("{:02x}", b)).collect(),
    }
}
