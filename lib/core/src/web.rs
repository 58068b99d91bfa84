use leptos::html::ElementType;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use infiniscroll_utils::errors::ScrollError;
use infiniscroll_utils::node_utils::get_item_index_attribute;

use crate::observer::{IntersectionBackend, IntersectionCallback, IntersectionEntry, IntersectionObserve, ObserverOptions};
use crate::slot::AttachmentHandle;

/// Intersection observers of the browser
#[derive(Clone, Copy, Debug, Default)]
pub struct WebIntersectionBackend;

/// Browser `IntersectionObserver` together with the closure it calls back into
pub struct WebObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array)>,
}

impl IntersectionObserve for WebObserver {
    type Element = Element;

    fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }

    fn unobserve(&self, element: &Element) {
        self.observer.unobserve(element);
    }

    fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl Drop for WebObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

impl IntersectionBackend for WebIntersectionBackend {
    type Element = Element;
    type Observer = WebObserver;

    fn create(
        &self,
        callback: IntersectionCallback,
        options: &ObserverOptions,
    ) -> Result<WebObserver, ScrollError> {
        let js_callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entry_array: js_sys::Array| {
            let entry_vec: Vec<IntersectionEntry> = entry_array
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| IntersectionEntry::new(entry.is_intersecting(), get_item_index_attribute(&entry.target())))
                .collect();
            callback(&entry_vec);
        });

        let init = IntersectionObserverInit::new();
        if let Some(threshold) = options.threshold {
            init.set_threshold(&JsValue::from_f64(threshold));
        }
        if let Some(root_margin) = &options.root_margin {
            init.set_root_margin(root_margin);
        }
        let observer = IntersectionObserver::new_with_options(js_callback.as_ref().unchecked_ref(), &init)
            .map_err(|e| ScrollError::ObserverCreation(format!("{e:?}")))?;

        Ok(WebObserver {
            observer,
            _callback: js_callback,
        })
    }
}

/// Attaches the element of `node_ref` to `handle` whenever `is_target` holds.
///
/// Re-runs when the node is mounted, when signals read by `is_target` change or when `handle` switches between
/// its own and its aliased slot. The attachment is released before each re-run and when the effect is disposed
/// with its row.
pub fn bind_attachment<NR>(
    handle: AttachmentHandle<WebIntersectionBackend>,
    node_ref: NodeRef<NR>,
    is_target: impl Fn() -> bool + 'static,
)
where
    NR: ElementType,
    NR::Output: Clone + AsRef<Element> + JsCast + 'static,
{
    Effect::new(move |_| {
        handle.track_target();
        let node = node_ref.get();
        if is_target() {
            handle.attach_scoped(node.map(|node| node.as_ref().clone()));
        }
    });
}
