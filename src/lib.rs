//! Spotify Playlist Genre Splitter CLI Library
//!
//! This library splits one existing Spotify playlist into several new ones,
//! one per primary genre of each track's lead artist. It includes modules for
//! API communication, the splitting pipeline, CLI operations, configuration
//! management and token storage.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Typed error taxonomy for the splitting pipeline
//! - `management` - Bearer token storage
//! - `split` - The splitting pipeline (resolve, group, provision, populate)
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions

pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod split;
pub mod spotify;
pub mod types;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern for the CLI layer using a boxed
/// dynamic error trait object while maintaining Send + Sync bounds for async
/// contexts. The pipeline itself uses [`error::SplitError`] instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// This macro terminates the program with exit code 1 after printing. It is
/// only used in the CLI layer for unrecoverable errors; the pipeline reports
/// failures through [`error::SplitError`] instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues, like a cover image upload that failed while
/// the created playlist itself is fine.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
