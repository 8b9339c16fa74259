use super::app_config::LogLevel;
use crate::domain::entities::ImageSize;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "lazyimage",
    version,
    about = "Fetch remote images through a flat per-URL disk cache",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Cache directory.
    #[arg(long, value_name = "DIR", global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Resize images to this size before caching them.
    #[arg(long, value_name = "WxH", global = true)]
    pub cache_size: Option<ImageSize>,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load an image as a widget would and optionally write what it shows.
    Show {
        /// Image URL.
        url: String,

        /// Resize the shown image to this size (aspect-fill).
        #[arg(long, value_name = "WxH")]
        size: Option<ImageSize>,

        /// Placeholder shown until the image is ready.
        #[arg(long, value_name = "NAME")]
        placeholder: Option<String>,

        /// Show a spinner while downloading.
        #[arg(long)]
        spinner: bool,

        /// Download even if the image is cached.
        #[arg(long)]
        force: bool,

        /// Write the shown image to this file.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Download images into the cache.
    Prefetch {
        /// Image URLs.
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Remove cached images.
    Clear {
        /// Image URLs to remove.
        #[arg(required_unless_present = "all")]
        urls: Vec<String>,

        /// Remove every cached image.
        #[arg(long, conflicts_with = "urls")]
        all: bool,
    },

    /// Print the cache file path for a URL.
    Path {
        /// Image URL.
        url: String,
    },
}
