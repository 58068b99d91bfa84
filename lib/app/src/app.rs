use leptos::html;
use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_use::{signal_throttled_with_options, ThrottleOptions};
use strum::IntoEnumIterator;

use infiniscroll_core::slot::AttachmentHandle;
use infiniscroll_core::trigger::TriggerPoint;
use infiniscroll_core::web::{bind_attachment, WebIntersectionBackend};
use infiniscroll_core::{use_infinite_scroll, UseInfiniteScrollOptions, UseInfiniteScrollReturn};
use infiniscroll_utils::constants::{DEMO_MAX_ITEMS, DEMO_OBSERVER_THRESHOLD, DEMO_PAGE_SIZE, DEMO_ROOT_MARGIN, SCROLL_LOAD_THROTTLE_DELAY};
use infiniscroll_utils::unpack::handle_additional_load;

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Row {
    pub index: usize,
    pub label: String,
}

/// # Returns the rows of the page starting at `offset`, stopping at `max_items`
pub fn generate_row_page(offset: usize, page_size: usize, max_items: usize) -> Vec<Row> {
    let end = max_items.min(offset.saturating_add(page_size));
    (offset..end).map(|index| Row {
        index,
        label: format!("Item #{}", index + 1),
    }).collect()
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    let trigger_point = RwSignal::new(TriggerPoint::ThreeQuarters);

    view! {
        <Title text="Infinite scroll"/>
        <div class="flex flex-col h-screen w-full max-w-2xl mx-auto">
            <TriggerPointSelect trigger_point/>
            <InfiniteList trigger_point/>
        </div>
    }
}

/// Dropdown to choose the position at which the next page is loaded
#[component]
pub fn TriggerPointSelect(
    trigger_point: RwSignal<TriggerPoint>,
) -> impl IntoView {
    view! {
        <select
            class="select select-bordered m-2"
            on:change=move |ev| match TriggerPoint::parse(&event_target_value(&ev)) {
                Ok(value) => trigger_point.set(value),
                Err(e) => log::warn!("Ignoring trigger point selection: {}", e.error_detail()),
            }
        >
        {
            TriggerPoint::iter().map(|value| view! {
                <option value=value.to_string() selected=move || trigger_point.get() == value>
                    {value.to_string()}
                </option>
            }).collect_view()
        }
        </select>
    }
}

/// List of generated rows, loading the next page when scrolling reaches the trigger point
#[component]
pub fn InfiniteList(
    #[prop(into)]
    trigger_point: Signal<TriggerPoint>,
) -> impl IntoView {
    let row_vec = RwSignal::new(generate_row_page(0, DEMO_PAGE_SIZE, DEMO_MAX_ITEMS));
    let has_more = RwSignal::new(true);
    let is_loading = RwSignal::new(false);
    let additional_load_count = RwSignal::new(0);

    let additional_load_count_throttled: Signal<i32> = signal_throttled_with_options(
        additional_load_count,
        SCROLL_LOAD_THROTTLE_DELAY,
        ThrottleOptions::default().leading(true).trailing(false)
    );

    let _additional_row_resource = LocalResource::new(
        move || async move {
            if additional_load_count_throttled.get() > 0 {
                is_loading.set(true);
                let additional_row_vec = generate_row_page(row_vec.read_untracked().len(), DEMO_PAGE_SIZE, DEMO_MAX_ITEMS);
                handle_additional_load(additional_row_vec, row_vec, has_more, DEMO_PAGE_SIZE);
                is_loading.set(false);
            }
        }
    );

    let UseInfiniteScrollReturn {
        item_ref,
        fallback_ref,
        item_ref_index,
        fallback_ref_index,
    } = use_infinite_scroll(
        UseInfiniteScrollOptions::new(
            move || additional_load_count.update(|value| *value += 1),
            Signal::derive(move || row_vec.read().len()),
        )
            .fetch_more(Signal::derive(move || has_more.get() && !is_loading.get()))
            .trigger_point(trigger_point)
            .threshold(DEMO_OBSERVER_THRESHOLD)
            .root_margin(DEMO_ROOT_MARGIN)
    );

    view! {
        <ul class="flex flex-col overflow-y-auto w-full divide-y divide-base-content/20">
            <For
                each=move || row_vec.get().into_iter()
                key=|row| row.index
                children=move |row| view! {
                    <InfiniteListRow
                        row
                        item_ref=item_ref.clone()
                        fallback_ref=fallback_ref.clone()
                        item_ref_index
                        fallback_ref_index
                    />
                }
            />
        </ul>
        <LoadIndicators is_loading has_more/>
    }
}

/// Row of the list, attaching itself to the trigger or fallback observer when it sits at their index
#[component]
pub fn InfiniteListRow(
    row: Row,
    item_ref: AttachmentHandle<WebIntersectionBackend>,
    fallback_ref: AttachmentHandle<WebIntersectionBackend>,
    item_ref_index: Signal<usize>,
    fallback_ref_index: Signal<usize>,
) -> impl IntoView {
    let row_ref = NodeRef::<html::Li>::new();
    let index = row.index;
    bind_attachment(item_ref, row_ref, move || item_ref_index.get() == index);
    bind_attachment(fallback_ref, row_ref, move || fallback_ref_index.get() == index);

    view! {
        <li class="p-4" data-index=index.to_string() node_ref=row_ref>
            {row.label}
        </li>
    }
}

#[component]
pub fn LoadIndicators(
    #[prop(into)]
    is_loading: Signal<bool>,
    #[prop(into)]
    has_more: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="w-full min-h-9 flex justify-center py-2">
            <Show when=is_loading>
                <span class="loading loading-spinner"></span>
            </Show>
            <Show when=move || !has_more.get()>
                <span class="text-sm">"End of the list"</span>
            </Show>
        </div>
    }
}
