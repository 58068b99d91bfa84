use std::rc::Rc;

use infiniscroll_utils::errors::ScrollError;
use infiniscroll_utils::node_utils::parse_item_index;

/// Settings forwarded untouched to every observer instance
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObserverOptions {
    /// visibility fraction of the target, between 0.0 and 1.0, at which intersection changes are reported
    pub threshold: Option<f64>,
    /// CSS margin around the scroll container, e.g. `"10px"`
    pub root_margin: Option<String>,
}

/// Intersection state change of an observed element
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IntersectionEntry {
    pub is_intersecting: bool,
    /// raw item index read from the element's `data-index` attribute
    pub item_index: Option<String>,
}

impl IntersectionEntry {
    pub fn new(is_intersecting: bool, item_index: Option<String>) -> Self {
        Self {
            is_intersecting,
            item_index,
        }
    }

    pub fn intersecting(item_index: impl ToString) -> Self {
        Self::new(true, Some(item_index.to_string()))
    }

    pub fn leaving(item_index: impl ToString) -> Self {
        Self::new(false, Some(item_index.to_string()))
    }

    pub fn get_item_index(&self) -> Result<usize, ScrollError> {
        parse_item_index(self.item_index.as_deref())
    }
}

/// Callback invoked by an observer with each batch of intersection changes
pub type IntersectionCallback = Rc<dyn Fn(&[IntersectionEntry])>;

/// A single viewport intersection observer instance
pub trait IntersectionObserve {
    type Element;

    fn observe(&self, element: &Self::Element);
    fn unobserve(&self, element: &Self::Element);
    /// Stops watching every element, the instance cannot be reused afterwards
    fn disconnect(&self);
}

/// Platform facility creating intersection observers
pub trait IntersectionBackend: 'static {
    type Element: Clone + PartialEq + 'static;
    type Observer: IntersectionObserve<Element = Self::Element> + 'static;

    fn create(
        &self,
        callback: IntersectionCallback,
        options: &ObserverOptions,
    ) -> Result<Self::Observer, ScrollError>;
}

#[cfg(test)]
mod tests {
    use infiniscroll_utils::errors::ScrollError;

    use crate::observer::IntersectionEntry;

    #[test]
    fn test_intersection_entry_constructors() {
        assert_eq!(IntersectionEntry::intersecting(7), IntersectionEntry::new(true, Some(String::from("7"))));
        assert_eq!(IntersectionEntry::leaving("9"), IntersectionEntry::new(false, Some(String::from("9"))));
        assert_eq!(IntersectionEntry::default(), IntersectionEntry::new(false, None));
    }

    #[test]
    fn test_intersection_entry_get_item_index() {
        assert_eq!(IntersectionEntry::intersecting(7).get_item_index(), Ok(7));
        assert_eq!(IntersectionEntry::new(true, None).get_item_index(), Err(ScrollError::MissingItemIndex));
        assert_eq!(
            IntersectionEntry::intersecting("7px").get_item_index(),
            Err(ScrollError::InvalidItemIndex(String::from("7px")))
        );
    }
}
