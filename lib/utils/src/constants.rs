pub const ITEM_INDEX_ATTRIBUTE: &str = "data-index";
pub const DEFAULT_FETCH_MORE: bool = true;


pub const DEMO_PAGE_SIZE: usize = 20;
pub const DEMO_MAX_ITEMS: usize = 200;
pub const DEMO_OBSERVER_THRESHOLD: f64 = 0.1;
pub const DEMO_ROOT_MARGIN: &str = "0px 0px 200px 0px";
pub const SCROLL_LOAD_THROTTLE_DELAY: f64 = 500.0;
