use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "fnoffset")]
#[command(about = "Resolve function offsets inside loaded module images")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve an exported symbol to its module-relative offset
    Export {
        /// Module to load, e.g. "C:\\Windows\\System32\\ntoskrnl.exe"
        module: String,
        /// Exported symbol name, e.g. "KeTestSpinLock"
        symbol: String,
    },
    /// Scan a module image for a masked byte pattern
    Scan {
        /// Module to load
        module: String,
        /// Pattern bytes, e.g. "48 8B ?? ?? C3" (?? = wildcard), or
        /// contiguous hex when --mask is given
        #[arg(num_args = 1.., required = true)]
        pattern: Vec<String>,
        /// Mask string (x = literal, ? = wildcard) paired with a hex needle
        #[arg(long)]
        mask: Option<String>,
    },
    /// Resolve a named entry from a signature set file
    Resolve {
        /// Entry name in the signature set
        name: String,
        #[arg(short, long, default_value = "signatures.json")]
        signatures: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("fnoffset_core=info".parse()?))
        .init();

    let args = Args::parse();

    match args.command {
        Command::Export { module, symbol } => commands::export::run(&module, &symbol),
        Command::Scan {
            module,
            pattern,
            mask,
        } => commands::scan::run(&module, &pattern, mask.as_deref()),
        Command::Resolve { name, signatures } => commands::resolve::run(&signatures, &name),
    }
}
