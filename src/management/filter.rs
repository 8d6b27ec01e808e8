use std::path::Path;

use crate::{info, warning};

/// Optional allow-list of playlist names to migrate.
///
/// Loaded from a newline-delimited text file; blank lines are ignored and
/// matching is by exact name. An empty filter lets every playlist through.
pub struct NameFilter {
    names: Vec<String>,
}

impl NameFilter {
    /// Loads the filter file. A missing path or unreadable file means "no
    /// filter, process all playlists" and is never fatal.
    pub async fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::from_names(Vec::new());
        };

        match async_fs::read_to_string(path).await {
            Ok(content) => {
                let names: Vec<String> = content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(String::from)
                    .collect();
                if !names.is_empty() {
                    info!("Namefilter: {:?}", names);
                }
                Self::from_names(names)
            }
            Err(_) => {
                warning!("{} not found -> no filter", path.display());
                Self::from_names(Vec::new())
            }
        }
    }

    pub fn from_names(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn allows(&self, name: &str) -> bool {
        self.names.is_empty() || self.names.iter().any(|n| n == name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
