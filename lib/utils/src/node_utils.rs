use web_sys::Element;

use crate::constants::ITEM_INDEX_ATTRIBUTE;
use crate::errors::ScrollError;

/// # Returns the raw item index carried by `element` in its `data-index` attribute
pub fn get_item_index_attribute(element: &Element) -> Option<String> {
    element.get_attribute(ITEM_INDEX_ATTRIBUTE)
}

/// # Parses the item index read from an observed element
///
/// Surrounding whitespace is ignored, anything that is not a non-negative integer is rejected.
///
/// ```
/// use infiniscroll_utils::errors::ScrollError;
/// use infiniscroll_utils::node_utils::parse_item_index;
///
/// assert_eq!(parse_item_index(Some("7")), Ok(7));
/// assert_eq!(parse_item_index(Some(" 12 ")), Ok(12));
/// assert_eq!(parse_item_index(None), Err(ScrollError::MissingItemIndex));
/// assert_eq!(parse_item_index(Some("seven")), Err(ScrollError::InvalidItemIndex(String::from("seven"))));
/// assert_eq!(parse_item_index(Some("-1")), Err(ScrollError::InvalidItemIndex(String::from("-1"))));
/// ```
pub fn parse_item_index(value: Option<&str>) -> Result<usize, ScrollError> {
    let value = value.ok_or(ScrollError::MissingItemIndex)?;
    value.trim().parse::<usize>().map_err(|_| ScrollError::InvalidItemIndex(value.to_string()))
}
