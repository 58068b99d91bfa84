use std::cell::Cell;
use std::sync::Arc;

use leptos::prelude::*;

use crate::observer::IntersectionEntry;

/// Requests the next page, the fetch itself is up to the caller
pub type FetchNext = Arc<dyn Fn() + Send + Sync>;

/// Decides whether an intersection change of the trigger or fallback item requests the next page.
///
/// Shared by the primary and fallback observers of one `use_infinite_scroll` instance.
pub struct IntersectionHandler {
    fetch_next: FetchNext,
    fetch_more: Signal<bool>,
    item_ref_index: Signal<usize>,
    fallback_ref_index: Signal<usize>,
    last_fired_index: Cell<Option<usize>>,
}

impl IntersectionHandler {
    pub fn new(
        fetch_next: FetchNext,
        fetch_more: Signal<bool>,
        item_ref_index: Signal<usize>,
        fallback_ref_index: Signal<usize>,
    ) -> Self {
        Self {
            fetch_next,
            fetch_more,
            item_ref_index,
            fallback_ref_index,
            last_fired_index: Cell::new(None),
        }
    }

    /// Index for which the primary trigger last requested a page
    pub fn last_fired_index(&self) -> Option<usize> {
        self.last_fired_index.get()
    }

    pub fn on_intersection_change(&self, entry_vec: &[IntersectionEntry]) {
        // an empty batch carries no state, it must not be read as "not intersecting"
        let Some(entry) = entry_vec.last() else {
            return;
        };
        if !entry.is_intersecting || !self.fetch_more.try_get_untracked().unwrap_or(false) {
            return;
        }
        let index = match entry.get_item_index() {
            Ok(index) => index,
            Err(e) => {
                log::warn!("Ignoring intersection change: {}", e.error_detail());
                return;
            }
        };
        let (Some(item_ref_index), Some(fallback_ref_index)) = (
            self.item_ref_index.try_get_untracked(),
            self.fallback_ref_index.try_get_untracked(),
        ) else {
            return;
        };

        if index == item_ref_index {
            log::debug!("Trigger item {index} intersecting, fetching next page.");
            self.last_fired_index.set(Some(index));
            (self.fetch_next)();
        }
        if index == fallback_ref_index && self.last_fired_index.get() != Some(item_ref_index) {
            log::debug!("Fallback item {index} intersecting before trigger item {item_ref_index}, fetching next page.");
            (self.fetch_next)();
        }
    }
}
