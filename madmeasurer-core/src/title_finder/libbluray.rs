//! The disc reader's own main title.

use crate::disc::{DiscSource, TitleIndex};

pub fn find_main_title<D: DiscSource + ?Sized>(disc: &D) -> Option<TitleIndex> {
    disc.main_title_index()
}
