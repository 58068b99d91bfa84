pub mod handler;
pub mod hook;
pub mod observer;
pub mod slot;
pub mod trigger;
pub mod web;

pub use hook::{use_infinite_scroll, use_infinite_scroll_with_backend, UseInfiniteScrollOptions, UseInfiniteScrollReturn};
pub use trigger::TriggerPoint;
