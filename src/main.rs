//! # Chora Spatium
//!
//! A lightweight code editor with a file tree, tabs, syntax highlighting and
//! an embedded terminal.
//!
//! ```bash
//! # Run the editor
//! cargo run
//!
//! # Open a file
//! cargo run -- src/main.rs
//!
//! # Open a folder in the file tree
//! cargo run -- --folder path/to/project -vv
//! ```

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chora_ui::{Flags, run};

/// Chora Spatium - a lightweight code editor
#[derive(Parser, Debug)]
#[command(name = "chora")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to open
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Folder to show in the file tree
    #[arg(short, long, value_name = "DIR")]
    folder: Option<PathBuf>,

    /// Verbose logging (-v info, -vv debug, -vvv trace); `RUST_LOG` overrides it
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn log_level(verbose: u8) -> tracing::Level {
    match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(log_level(args.verbose)).into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true),
        )
        .with(filter)
        .init();

    tracing::info!("Starting Chora v{}", env!("CARGO_PKG_VERSION"));

    let flags = Flags {
        file: args.file,
        folder: args.folder,
    };

    run(flags).map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["chora"]);
        assert!(args.file.is_none());
        assert!(args.folder.is_none());
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_args_with_file_and_folder() {
        let args = Args::parse_from(["chora", "main.cpp", "--folder", "/tmp/project", "-vv"]);
        assert_eq!(args.file, Some(PathBuf::from("main.cpp")));
        assert_eq!(args.folder, Some(PathBuf::from("/tmp/project")));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_log_level_from_verbosity() {
        assert_eq!(log_level(0), tracing::Level::WARN);
        assert_eq!(log_level(2), tracing::Level::DEBUG);
        assert_eq!(log_level(9), tracing::Level::TRACE);
    }
}
