use std::{io, path::PathBuf};

use futures_lite::io::AsyncWriteExt;

use crate::config;

/// One failed migration item, tagged with the entity kind it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    Playlist { name: String },
    Artist { name: String },
    Album { name: String, artist: String },
    Track { name: String, artist: String },
    /// Fallback for failures that fit no known category.
    Other { context: String },
}

impl LogEntry {
    /// Renders the entry as one `category: <identifying fields>` line.
    pub fn render(&self) -> String {
        match self {
            LogEntry::Playlist { name } => format!("playlist: {name}"),
            LogEntry::Artist { name } => format!("artist: {name}"),
            LogEntry::Album { name, artist } => format!("album: {name} by {artist}"),
            LogEntry::Track { name, artist } => format!("track: {name} by {artist}"),
            LogEntry::Other { context } => format!("unknown error about {context}"),
        }
    }
}

/// Append-only record of unmatched and failed items.
///
/// One UTF-8 line per entry; the file outlives the process and is never
/// truncated or rewritten by the migration, so reruns accumulate.
pub struct ErrorLog {
    path: PathBuf,
}

impl ErrorLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Opens the log at the configured location (`LOG_FILE` env override,
    /// `LogFile.txt` by default).
    pub fn open_default() -> Self {
        Self::new(config::log_file())
    }

    /// The file is opened in append mode for every write, so existing
    /// entries are never truncated, even when the process dies mid-write.
    pub async fn append(&self, entry: LogEntry) -> Result<(), io::Error> {
        let mut file = async_fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .await?;

        file.write_all(format!("{}\n", entry.render()).as_bytes())
            .await?;
        file.flush().await
    }
}
