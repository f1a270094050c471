//! Auxiliary on-disc information used by some main title algorithms.
//!
//! Two things live here: the `disc.inf` hint file, which some discs carry
//! with a list of the playlists that are worth considering, and access to the
//! playlist files themselves (MPC-BE compares playlist file sizes).

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

/// Name of the hint file at the disc root.
pub const HINT_FILE: &str = "disc.inf";

const PLAYLISTS_KEY: &str = "playlists=";

/// Hints and file access for one disc. `root` is `None` when the disc content
/// is not reachable on the filesystem (e.g. an image that was not mounted).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuxHints {
    root: Option<PathBuf>,
    playlists: Option<Vec<String>>,
}

impl AuxHints {
    /// No filesystem access and no declared playlists.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(root: Option<PathBuf>, playlists: Option<Vec<String>>) -> Self {
        Self { root, playlists }
    }

    /// Loads `disc.inf` from the disc root, if there is one.
    pub fn load(root: Option<&Path>) -> Self {
        let Some(root) = root else {
            return Self::none();
        };
        let hint_path = root.join(HINT_FILE);
        let playlists = if hint_path.is_file() {
            match fs::read_to_string(&hint_path) {
                Ok(content) => {
                    let playlists = Self::parse_playlists(&content);
                    match &playlists {
                        Some(p) => debug!("{} found with obfuscated playlists {:?}", HINT_FILE, p),
                        None => debug!("No playlists found in {}", hint_path.display()),
                    }
                    playlists
                }
                Err(e) => {
                    warn!("Unable to read {}: {}", hint_path.display(), e);
                    None
                }
            }
        } else {
            debug!("No {} found in {}", HINT_FILE, root.display());
            None
        };
        Self::new(Some(root.to_path_buf()), playlists)
    }

    /// Extracts the playlist list from hint file content.
    ///
    /// Only the first `playlists=` line counts. Each number becomes a zero
    /// padded playlist file name (`800` -> `00800.mpls`).
    pub fn parse_playlists(content: &str) -> Option<Vec<String>> {
        let line = content
            .lines()
            .find(|line| line.starts_with(PLAYLISTS_KEY))?;
        let playlists = line[PLAYLISTS_KEY.len()..]
            .split(',')
            .filter_map(|value| match value.trim().parse::<u32>() {
                Ok(number) => Some(format!("{number:05}.mpls")),
                Err(_) => {
                    warn!("Ignoring invalid playlist number '{}' in {}", value.trim(), HINT_FILE);
                    None
                }
            })
            .collect();
        Some(playlists)
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Playlists declared by `disc.inf`, if the file declared any.
    pub fn playlists(&self) -> Option<&[String]> {
        self.playlists.as_deref()
    }

    /// Full path of a playlist file, `<root>/BDMV/PLAYLIST/<playlist>`.
    pub fn playlist_path(&self, playlist: &str) -> Option<PathBuf> {
        self.root
            .as_ref()
            .map(|root| root.join("BDMV").join("PLAYLIST").join(playlist))
    }

    /// Size of a playlist file in bytes, `None` when it cannot be read.
    pub fn playlist_size(&self, playlist: &str) -> Option<u64> {
        let path = self.playlist_path(playlist)?;
        fs::metadata(path).ok().map(|m| m.len())
    }
}
