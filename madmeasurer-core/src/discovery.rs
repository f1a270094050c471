//! Disc discovery.
//!
//! Finds BDMV folders (by their `BDMV/index.bdmv`) or ISO images below a
//! search path. The search depth counts folders between the search path and
//! the disc: with `Exact(2)` a folder disc is found at
//! `<path>/*/*/BDMV/index.bdmv` and an image at `<path>/*/*/*.iso`.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::disc::is_image_path;
use crate::error::{CoreError, CoreResult};

const INDEX_FILE: &str = "index.bdmv";
const BDMV_DIR: &str = "BDMV";

/// How deep below the search path discs may sit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchDepth {
    #[default]
    Unlimited,
    Exact(usize),
    Max(usize),
}

/// What to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetKind {
    #[default]
    Bdmv,
    Iso,
}

impl TargetKind {
    /// Walk depth of a matching file when the disc sits directly in the
    /// search path.
    fn file_offset(self) -> usize {
        match self {
            TargetKind::Bdmv => 2,
            TargetKind::Iso => 1,
        }
    }
}

/// A disc found by discovery.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DiscTarget {
    /// BDMV folder root or image file.
    pub path: PathBuf,
    /// True for a folder found by its index.bdmv.
    pub is_bdmv: bool,
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

fn is_index_file(path: &Path) -> bool {
    let named_index = path
        .file_name()
        .is_some_and(|name| name.eq_ignore_ascii_case(INDEX_FILE));
    let in_bdmv = path
        .parent()
        .and_then(Path::file_name)
        .is_some_and(|name| name.eq_ignore_ascii_case(BDMV_DIR));
    named_index && in_bdmv
}

fn target_for_file(path: &Path) -> Option<DiscTarget> {
    if is_index_file(path) {
        let root = path.parent()?.parent()?;
        Some(DiscTarget {
            path: absolute(root),
            is_bdmv: true,
        })
    } else if is_image_path(path) {
        Some(DiscTarget {
            path: absolute(path),
            is_bdmv: false,
        })
    } else {
        None
    }
}

/// Finds the discs at or below `path`.
///
/// A file path is taken as is: an `index.bdmv` names its disc folder, an
/// `.iso` is an image. Directories are walked for `kind` within `depth`.
///
/// # Errors
///
/// * `CoreError::NoFilesFound` when nothing matches
/// * `CoreError::Walkdir` when the search path itself cannot be read
pub fn find_disc_targets(
    path: &Path,
    depth: SearchDepth,
    kind: TargetKind,
) -> CoreResult<Vec<DiscTarget>> {
    if path.is_file() {
        return target_for_file(path)
            .map(|target| vec![target])
            .ok_or(CoreError::NoFilesFound);
    }

    let offset = kind.file_offset();
    let mut walker = WalkDir::new(path).follow_links(true).min_depth(offset);
    walker = match depth {
        SearchDepth::Unlimited => walker,
        SearchDepth::Exact(n) => walker.min_depth(n + offset).max_depth(n + offset),
        SearchDepth::Max(n) => walker.max_depth(n + offset),
    };
    info!("Searching {} for {:?} discs ({:?})", path.display(), kind, depth);

    let mut targets = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                warn!("Skipping unreadable entry below {}: {}", path.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let file = entry.path();
        let matches = match kind {
            TargetKind::Bdmv => is_index_file(file),
            TargetKind::Iso => is_image_path(file),
        };
        if matches {
            if let Some(target) = target_for_file(file) {
                debug!("Found {}", target.path.display());
                targets.push(target);
            }
        }
    }

    targets.sort();
    targets.dedup();
    if targets.is_empty() {
        return Err(CoreError::NoFilesFound);
    }
    Ok(targets)
}
