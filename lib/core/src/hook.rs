use std::rc::Rc;
use std::sync::Arc;

use leptos::prelude::*;

use infiniscroll_utils::constants::DEFAULT_FETCH_MORE;

use crate::handler::{FetchNext, IntersectionHandler};
use crate::observer::{IntersectionBackend, IntersectionCallback, IntersectionEntry, ObserverOptions};
use crate::slot::{AttachmentHandle, ObserverSlot};
use crate::trigger::{get_fallback_index, get_trigger_index, TriggerPoint};
use crate::web::WebIntersectionBackend;

pub const PRIMARY_SLOT_NAME: &str = "primary";
pub const FALLBACK_SLOT_NAME: &str = "fallback";

/// Options of [`use_infinite_scroll`]
pub struct UseInfiniteScrollOptions {
    fetch_next: FetchNext,
    fetch_more: Signal<bool>,
    number_of_items: Signal<usize>,
    threshold: Option<f64>,
    root_margin: Option<String>,
    trigger_point: Signal<TriggerPoint>,
    trigger_index: Signal<Option<usize>>,
}

impl UseInfiniteScrollOptions {
    pub fn new(
        fetch_next: impl Fn() + Send + Sync + 'static,
        number_of_items: impl Into<Signal<usize>>,
    ) -> Self {
        Self {
            fetch_next: Arc::new(fetch_next),
            fetch_more: Signal::derive(|| DEFAULT_FETCH_MORE),
            number_of_items: number_of_items.into(),
            threshold: None,
            root_margin: None,
            trigger_point: Signal::derive(TriggerPoint::default),
            trigger_index: Signal::derive(|| None),
        }
    }

    /// Gate for page requests, typically cleared while a page is loading or once everything is loaded
    pub fn fetch_more(mut self, fetch_more: impl Into<Signal<bool>>) -> Self {
        self.fetch_more = fetch_more.into();
        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn root_margin(mut self, root_margin: impl Into<String>) -> Self {
        self.root_margin = Some(root_margin.into());
        self
    }

    pub fn trigger_point(mut self, trigger_point: impl Into<Signal<TriggerPoint>>) -> Self {
        self.trigger_point = trigger_point.into();
        self
    }

    /// Explicit trigger item, overrides the trigger point when set
    pub fn trigger_index(mut self, trigger_index: impl Into<Signal<Option<usize>>>) -> Self {
        self.trigger_index = trigger_index.into();
        self
    }
}

/// Return type of [`use_infinite_scroll`]
pub struct UseInfiniteScrollReturn<B: IntersectionBackend> {
    /// attaches the item at `item_ref_index`
    pub item_ref: AttachmentHandle<B>,
    /// attaches the last item
    pub fallback_ref: AttachmentHandle<B>,
    pub item_ref_index: Signal<usize>,
    pub fallback_ref_index: Signal<usize>,
}

/// Requests the next page when the trigger item, or failing that the last item, scrolls into view.
///
/// The returned handles must be attached to the elements at `item_ref_index` and `fallback_ref_index`, each
/// element carrying its index in a `data-index` attribute. Observers are released when the current reactive
/// owner is cleaned up.
pub fn use_infinite_scroll(options: UseInfiniteScrollOptions) -> UseInfiniteScrollReturn<WebIntersectionBackend> {
    use_infinite_scroll_with_backend(WebIntersectionBackend, options)
}

pub fn use_infinite_scroll_with_backend<B: IntersectionBackend>(
    backend: B,
    options: UseInfiniteScrollOptions,
) -> UseInfiniteScrollReturn<B> {
    let UseInfiniteScrollOptions {
        fetch_next,
        fetch_more,
        number_of_items,
        threshold,
        root_margin,
        trigger_point,
        trigger_index,
    } = options;

    let item_ref_index = Memo::new(move |_| get_trigger_index(number_of_items.get(), trigger_point.get(), trigger_index.get()));
    let fallback_ref_index = Memo::new(move |_| get_fallback_index(number_of_items.get()));
    let is_collapsed = Memo::new(move |_| item_ref_index.get() == fallback_ref_index.get());

    let handler = Rc::new(IntersectionHandler::new(
        fetch_next,
        fetch_more,
        item_ref_index.into(),
        fallback_ref_index.into(),
    ));
    let callback: IntersectionCallback = Rc::new(move |entry_vec: &[IntersectionEntry]| handler.on_intersection_change(entry_vec));
    let backend = Rc::new(backend);
    let observer_options = ObserverOptions { threshold, root_margin };

    let item_ref = AttachmentHandle::new(ObserverSlot::new(
        PRIMARY_SLOT_NAME,
        backend.clone(),
        callback.clone(),
        observer_options.clone(),
    ));
    let fallback_ref = AttachmentHandle::aliased(
        ObserverSlot::new(FALLBACK_SLOT_NAME, backend, callback, observer_options),
        &item_ref,
        is_collapsed.into(),
    );

    on_cleanup({
        let item_ref = item_ref.clone();
        let fallback_ref = fallback_ref.clone();
        move || {
            log::debug!("Releasing infinite scroll observers.");
            item_ref.release();
            fallback_ref.release();
        }
    });

    UseInfiniteScrollReturn {
        item_ref,
        fallback_ref,
        item_ref_index: item_ref_index.into(),
        fallback_ref_index: fallback_ref_index.into(),
    }
}
