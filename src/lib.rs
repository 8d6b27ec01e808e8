//! Tidal to Deezer Migration Library
//!
//! This library moves a user's music library from Tidal to Deezer: playlists
//! (optionally filtered by name), favorite artists, favorite albums and loved
//! tracks. Source entities are matched against Deezer by cleaned-name search,
//! the first search result wins, and anything that cannot be matched is
//! appended to an error log file instead of aborting the run.
//!
//! # Modules
//!
//! - `cli` - The four migration phases and the run orchestrator
//! - `config` - Configuration management and environment variables
//! - `deezer` - Deezer Web API client, token handling and request resilience
//! - `limiter` - Sliding-window rate limiter for outbound Deezer requests
//! - `management` - Credential persistence, playlist name filter, error log
//! - `matcher` - Query normalization and first-result matching
//! - `tidal` - Tidal Web API session (login, library access)
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use tidal2deezer::{cli, config};
//!
//! #[tokio::main]
//! async fn main() -> tidal2deezer::Res<()> {
//!     config::load_env().await?;
//!     cli::run(None).await
//! }
//! ```

pub mod cli;
pub mod config;
pub mod deezer;
pub mod limiter;
pub mod management;
pub mod matcher;
pub mod tidal;
pub mod types;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. This allows for flexible
/// error handling while maintaining Send + Sync bounds for async contexts.
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
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// This macro terminates the process with exit code 1 after printing. It
/// should only be used for fatal errors where recovery is not possible.
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
/// Used for recoverable issues or important information that users should
/// notice, without terminating the program.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
