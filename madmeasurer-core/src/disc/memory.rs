//! In-memory disc, used once a disc description has been loaded and by tests.

use std::path::{Path, PathBuf};

use super::provider::DiscSource;
use super::{Title, TitleIndex};

/// A disc whose titles are already held in memory.
#[derive(Debug, Clone)]
pub struct MemoryDisc {
    path: PathBuf,
    titles: Vec<Title>,
    main_title: Option<TitleIndex>,
}

impl MemoryDisc {
    /// Creates a disc from titles. Indices are reassigned from the title order.
    pub fn new(path: impl Into<PathBuf>, titles: Vec<Title>) -> Self {
        let titles = titles
            .into_iter()
            .enumerate()
            .map(|(index, mut title)| {
                title.index = index;
                title
            })
            .collect();
        Self {
            path: path.into(),
            titles,
            main_title: None,
        }
    }

    /// Sets the native main title index; out of range indices are ignored.
    pub fn with_main_title(mut self, index: Option<TitleIndex>) -> Self {
        self.main_title = index.filter(|i| *i < self.titles.len());
        self
    }
}

impl DiscSource for MemoryDisc {
    fn path(&self) -> &Path {
        &self.path
    }

    fn title_count(&self) -> usize {
        self.titles.len()
    }

    fn title(&self, index: TitleIndex) -> Option<Title> {
        self.titles.get(index).cloned()
    }

    fn main_title_index(&self) -> Option<TitleIndex> {
        self.main_title
    }
}
