use leptos::prelude::*;

/// # Appends an additionally loaded batch to `loaded_vec`
///
/// A batch shorter than `batch_size` means the source is exhausted, `has_more` is then cleared so that the
/// consumer stops requesting further batches.
pub fn handle_additional_load<T: Send + Sync + 'static>(
    mut additional_vec: Vec<T>,
    loaded_vec: RwSignal<Vec<T>>,
    has_more: RwSignal<bool>,
    batch_size: usize,
) {
    if additional_vec.len() < batch_size {
        log::debug!("Received batch of {} items, expected {batch_size}: no more items to load.", additional_vec.len());
        has_more.set(false);
    }
    if !additional_vec.is_empty() {
        loaded_vec.update(|loaded_vec| loaded_vec.append(&mut additional_vec));
    }
}
